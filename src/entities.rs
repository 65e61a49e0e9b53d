/// All game entity types — pure data, no logic.
use std::sync::Arc;

use crate::assets::Sprite;
use crate::sound::Clip;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }
}

/// Axis-aligned bounding rectangle in viewport cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(pos: Point, size: Size) -> Self {
        Rect {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }
}

// ── Entity kinds ──────────────────────────────────────────────────────────────

/// The closed set of things that live in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Background,
    Player,
    Enemy,
    Bullet,
    GameOver,
}

/// How an entity moves on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Never moves (background, overlays)
    Fixed,
    /// Moved only by player input
    Steered,
    /// Descends by its speed every `cadence` frames
    Falling,
    /// Climbs by its speed every frame
    Rising,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Background,
        EntityKind::Player,
        EntityKind::Enemy,
        EntityKind::Bullet,
        EntityKind::GameOver,
    ];

    /// Asset-table name of the sprite this kind draws with.
    pub fn sprite_name(&self) -> &'static str {
        match self {
            EntityKind::Background => "background",
            EntityKind::Player => "player",
            EntityKind::Enemy => "enemy",
            EntityKind::Bullet => "bullet",
            EntityKind::GameOver => "game_over",
        }
    }

    pub fn motion(&self) -> Motion {
        match self {
            EntityKind::Background | EntityKind::GameOver => Motion::Fixed,
            EntityKind::Player => Motion::Steered,
            EntityKind::Enemy => Motion::Falling,
            EntityKind::Bullet => Motion::Rising,
        }
    }

    /// Clip played on this kind's sound event (destroy, collision or spawn).
    pub fn sound(&self) -> Option<Clip> {
        match self {
            EntityKind::Background | EntityKind::GameOver => None,
            EntityKind::Player | EntityKind::Enemy => Some(Clip::Explosion),
            EntityKind::Bullet => Some(Clip::Missile),
        }
    }
}

// ── Game object ───────────────────────────────────────────────────────────────

/// One entity: shared fields for every kind, behaviour picked by `kind`.
#[derive(Clone, Debug)]
pub struct GameObject {
    pub kind: EntityKind,
    pub active: bool,
    /// Top-left corner in viewport cells.
    pub pos: Point,
    /// Cells per step.
    pub speed: i32,
    /// Frames between self-driven steps (only `Motion::Falling` uses it).
    pub cadence: u32,
    /// Frames this object has been updated.
    pub age: u64,
    pub sprite: Arc<Sprite>,
    /// Derived from the sprite at construction.
    pub size: Size,
    /// Viewport size.
    pub bounds: Size,
    /// Recomputed from `pos` and `size` on every update.
    pub rect: Rect,
    pub sound: Option<Clip>,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Logical commands held down during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

// ── Game status ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Running,
    GameOver,
}
