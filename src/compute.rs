/// Game-object behaviour.
///
/// Every entity shares the same fields; what differs between kinds is the
/// profile (speed and step cadence, from the settings) and the motion
/// policy (from `EntityKind::motion`). Side effects are limited to the
/// injected `SoundSink`.
use std::sync::Arc;

use crate::assets::Sprite;
use crate::entities::{EntityKind, GameObject, Motion, Point, Rect, Size};
use crate::settings::Settings;
use crate::sound::SoundSink;

// ── Behaviour table ──────────────────────────────────────────────────────────

/// Per-kind movement numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    pub speed: i32,
    pub cadence: u32,
}

pub fn profile(kind: EntityKind, settings: &Settings) -> Profile {
    match kind {
        EntityKind::Background | EntityKind::GameOver => Profile { speed: 0, cadence: 1 },
        EntityKind::Player => Profile { speed: settings.player_speed, cadence: 1 },
        EntityKind::Enemy => Profile {
            speed: settings.enemy_speed,
            cadence: settings.enemy_step_frames.max(1),
        },
        EntityKind::Bullet => Profile { speed: settings.bullet_speed, cadence: 1 },
    }
}

// ── Game object operations ───────────────────────────────────────────────────

impl GameObject {
    /// Build an active object. Its size comes from the sprite and its
    /// bounding rectangle is valid straight away.
    pub fn new(
        kind: EntityKind,
        sprite: Arc<Sprite>,
        bounds: Size,
        pos: Point,
        profile: Profile,
    ) -> Self {
        let size = sprite.size();
        GameObject {
            kind,
            active: true,
            pos,
            speed: profile.speed,
            cadence: profile.cadence.max(1),
            age: 0,
            sprite,
            size,
            bounds,
            rect: Rect::new(pos, size),
            sound: kind.sound(),
        }
    }

    /// Advance one frame: self-driven motion first, then refresh the
    /// bounding rectangle. Drawing is done separately by `raster::render`.
    pub fn update_object(&mut self) {
        self.age += 1;
        match self.kind.motion() {
            Motion::Rising => self.move_up(),
            Motion::Falling => {
                if self.age % self.cadence as u64 == 0 {
                    self.move_down();
                }
            }
            Motion::Fixed | Motion::Steered => {}
        }
        self.rect = Rect::new(self.pos, self.size);
    }

    fn max_x(&self) -> i32 {
        (self.bounds.width - self.size.width).max(0)
    }

    pub fn move_left(&mut self) {
        if self.pos.x > 0 {
            self.pos.x = (self.pos.x - self.speed).max(0);
        }
    }

    pub fn move_right(&mut self) {
        let max_x = self.max_x();
        if self.pos.x < max_x {
            self.pos.x = (self.pos.x + self.speed).min(max_x);
        }
    }

    /// Vertical moves are unclamped so objects can enter and leave the
    /// viewport through the top and bottom edges.
    pub fn move_up(&mut self) {
        self.pos.y -= self.speed;
    }

    pub fn move_down(&mut self) {
        self.pos.y += self.speed;
    }

    /// True once the object is entirely past any viewport edge, with a
    /// margin of its own size on that axis.
    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.y > self.bounds.height + self.size.height
            || self.pos.y < -self.size.height
            || self.pos.x > self.bounds.width + self.size.width
            || self.pos.x < -self.size.width
    }

    /// Rectangle overlap test. A hit plays this object's sound.
    pub fn is_colliding_with(&self, other: &GameObject, sink: &mut dyn SoundSink) -> bool {
        if self.rect.intersects(&other.rect) {
            self.play_sound(sink);
            true
        } else {
            false
        }
    }

    pub fn destroy(&mut self) {
        self.active = false;
    }

    pub fn play_sound(&self, sink: &mut dyn SoundSink) {
        if let Some(clip) = self.sound {
            sink.play(clip);
        }
    }

    /// Where a projectile of `projectile` size leaves this object:
    /// centred horizontally, directly above the top edge.
    pub fn muzzle(&self, projectile: Size) -> Point {
        Point::new(
            self.pos.x + (self.size.width - projectile.width) / 2,
            self.pos.y - projectile.height,
        )
    }
}
