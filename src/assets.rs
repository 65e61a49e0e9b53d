//! Embedded sprites and the clip table.
//!
//! Sprites are text art compiled into the binary. They are parsed and
//! validated once at startup; a missing or malformed sprite is fatal.

use std::sync::Arc;

use crate::entities::{EntityKind, Size};
use crate::error::AssetError;
use crate::raster::{Cell, Tint};

// ── Sprite art ────────────────────────────────────────────────────────────────

const BACKGROUND: &[&str] = &[
    "           .                                                ..  ",
    "        *                                                    *  ",
    "                   .                  .                         ",
    "          *        *  +.     .        .                         ",
    "                         .    *                    .            ",
    "                    .                                  *        ",
    "                     +         + .                      .       ",
    " *                .*             +      *  +.                   ",
    "   .                        .                    .              ",
    "                                                                ",
    " *    .               .            .                 *          ",
    "      *      *             *                            *       ",
    "     .   *     .                 .                     .        ",
    "                        +             .    +       .*  .        ",
    ".    .         .           .        . .                         ",
    "                           .                           *        ",
    "                       *             .   *               *      ",
    " *        **          .                       .          . *   .",
    "     .*                 *          .      .        . *          ",
    "                *  ..                +                          ",
    "           .                 *             +                    ",
    "       .          *             ..                *   .         ",
    "                **                                  *           ",
    "         *            *                       *                *",
    "                              *                             .   ",
    "                           .       .                   *  +     ",
    "           *          * .                   .                   ",
    "         +     *                        *         .    * *      ",
];

const PLAYER: &[&str] = &[
    "  ^  ",
    " /#\\ ",
    "<###>",
];

const ENEMY: &[&str] = &[
    "\\-o-/",
    " \\V/ ",
];

const BULLET: &[&str] = &["|"];

const GAME_OVER: &[&str] = &[
    "+--------------------------+",
    "|                          |",
    "|        GAME  OVER        |",
    "|                          |",
    "|   R - Play Again         |",
    "|   ESC - Quit             |",
    "|                          |",
    "+--------------------------+",
];

/// Raw description of a sprite before validation.
#[derive(Clone, Copy, Debug)]
pub struct SpriteSource {
    pub name: &'static str,
    pub tint: Tint,
    /// Opaque sprites draw their blanks; others treat ' ' as transparent.
    pub opaque: bool,
    pub rows: &'static [&'static str],
}

/// The sprites the game ships with.
pub const EMBEDDED: &[SpriteSource] = &[
    SpriteSource { name: "background", tint: Tint::DarkGrey, opaque: true, rows: BACKGROUND },
    SpriteSource { name: "player", tint: Tint::White, opaque: false, rows: PLAYER },
    SpriteSource { name: "enemy", tint: Tint::Green, opaque: false, rows: ENEMY },
    SpriteSource { name: "bullet", tint: Tint::Cyan, opaque: false, rows: BULLET },
    SpriteSource { name: "game_over", tint: Tint::Red, opaque: true, rows: GAME_OVER },
];

// ── Sprite ────────────────────────────────────────────────────────────────────

/// A validated, immutable bitmap of cells. `None` cells are transparent.
#[derive(Debug, PartialEq)]
pub struct Sprite {
    width: i32,
    height: i32,
    cells: Vec<Option<Cell>>,
}

impl Sprite {
    pub fn parse(source: &SpriteSource) -> Result<Self, AssetError> {
        let expected = match source.rows.first() {
            Some(row) => row.chars().count(),
            None => return Err(AssetError::Empty(source.name)),
        };
        if expected == 0 {
            return Err(AssetError::Empty(source.name));
        }

        let mut cells = Vec::with_capacity(expected * source.rows.len());
        for (row, text) in source.rows.iter().enumerate() {
            let found = text.chars().count();
            if found != expected {
                return Err(AssetError::Ragged { name: source.name, row, expected, found });
            }
            cells.extend(text.chars().map(|glyph| {
                if glyph == ' ' && !source.opaque {
                    None
                } else {
                    Some(Cell::new(glyph, source.tint))
                }
            }));
        }

        Ok(Sprite {
            width: expected as i32,
            height: source.rows.len() as i32,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.cells[(y * self.width + x) as usize]
    }
}

// ── Asset table ───────────────────────────────────────────────────────────────

/// Every sprite and clip the game uses, shared read-only for the whole run.
#[derive(Debug)]
pub struct AssetTable {
    background: Arc<Sprite>,
    player: Arc<Sprite>,
    enemy: Arc<Sprite>,
    bullet: Arc<Sprite>,
    game_over: Arc<Sprite>,
}

impl AssetTable {
    /// Parse the embedded sprites.
    pub fn load() -> Result<Self, AssetError> {
        Self::from_sources(EMBEDDED)
    }

    pub fn from_sources(sources: &[SpriteSource]) -> Result<Self, AssetError> {
        let find = |kind: EntityKind| -> Result<Arc<Sprite>, AssetError> {
            let name = kind.sprite_name();
            let source = sources
                .iter()
                .find(|s| s.name == name)
                .ok_or(AssetError::Missing(name))?;
            Ok(Arc::new(Sprite::parse(source)?))
        };

        let table = AssetTable {
            background: find(EntityKind::Background)?,
            player: find(EntityKind::Player)?,
            enemy: find(EntityKind::Enemy)?,
            bullet: find(EntityKind::Bullet)?,
            game_over: find(EntityKind::GameOver)?,
        };
        log::info!(
            "assets loaded: viewport {}x{}",
            table.background.width(),
            table.background.height()
        );
        Ok(table)
    }

    pub fn sprite(&self, kind: EntityKind) -> Arc<Sprite> {
        let sprite = match kind {
            EntityKind::Background => &self.background,
            EntityKind::Player => &self.player,
            EntityKind::Enemy => &self.enemy,
            EntityKind::Bullet => &self.bullet,
            EntityKind::GameOver => &self.game_over,
        };
        Arc::clone(sprite)
    }

    /// The viewport matches the background bitmap.
    pub fn viewport(&self) -> Size {
        self.background.size()
    }
}
