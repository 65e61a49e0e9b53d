//! The loop controller.
//!
//! `World` owns every entity, the off-screen raster and the two periodic
//! triggers (frame and enemy spawn). It runs the Idle → Running → GameOver
//! state machine and the per-frame update/collide/prune pass.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::assets::AssetTable;
use crate::compute::profile;
use crate::entities::{Controls, EntityKind, GameObject, GameStatus, Point, Size};
use crate::error::ConfigError;
use crate::raster::{render, Raster};
use crate::settings::Settings;
use crate::sound::SoundSink;
use crate::timing::Ticker;

/// Frame ticks processed per `pump` at most; the rest of a long stall is dropped.
pub const MAX_CATCH_UP_FRAMES: u32 = 8;

/// Spawn ticks processed per `pump` at most, so a stall does not stack
/// enemies on the spawn row.
pub const MAX_CATCH_UP_SPAWNS: u32 = 1;

pub struct World {
    settings: Settings,
    assets: Arc<AssetTable>,
    bounds: Size,
    /// Draw order: background first, overlays last.
    entities: Vec<GameObject>,
    background: GameObject,
    game_over: GameObject,
    raster: Raster,
    frame_timer: Ticker,
    spawn_timer: Ticker,
    status: GameStatus,
    can_shoot: bool,
    frame: u64,
    repaint: bool,
}

impl World {
    /// An idle world sized to the background sprite. Fails when the
    /// settings do not fit that viewport.
    pub fn new(settings: Settings, assets: Arc<AssetTable>) -> Result<Self, ConfigError> {
        let bounds = assets.viewport();
        settings.validate_for(bounds, assets.sprite(EntityKind::Enemy).size())?;
        let background = Self::build(&settings, &assets, bounds, EntityKind::Background, Point::new(0, 0));
        let overlay = assets.sprite(EntityKind::GameOver).size();
        let centre = Point::new(
            (bounds.width - overlay.width) / 2,
            (bounds.height - overlay.height) / 2,
        );
        let game_over = Self::build(&settings, &assets, bounds, EntityKind::GameOver, centre);

        Ok(World {
            frame_timer: Ticker::new(settings.frame_period()),
            spawn_timer: Ticker::new(settings.spawn_period()),
            raster: Raster::new(bounds),
            settings,
            assets,
            bounds,
            entities: Vec::new(),
            background,
            game_over,
            status: GameStatus::Idle,
            can_shoot: true,
            frame: 0,
            repaint: false,
        })
    }

    fn build(
        settings: &Settings,
        assets: &AssetTable,
        bounds: Size,
        kind: EntityKind,
        pos: Point,
    ) -> GameObject {
        GameObject::new(kind, assets.sprite(kind), bounds, pos, profile(kind, settings))
    }

    /// Construct an entity of `kind` at `pos`, tuned for this world.
    pub fn make(&self, kind: EntityKind, pos: Point) -> GameObject {
        Self::build(&self.settings, &self.assets, self.bounds, kind, pos)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn entities(&self) -> &[GameObject] {
        &self.entities
    }

    /// Direct access for scripted setups (tests, demos).
    pub fn entities_mut(&mut self) -> &mut Vec<GameObject> {
        &mut self.entities
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn player(&self) -> Option<&GameObject> {
        self.player_index().map(|i| &self.entities[i])
    }

    pub fn player_mut(&mut self) -> Option<&mut GameObject> {
        self.player_index().map(move |i| &mut self.entities[i])
    }

    fn player_index(&self) -> Option<usize> {
        self.entities
            .iter()
            .position(|e| e.kind == EntityKind::Player && e.active)
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn can_shoot(&self) -> bool {
        self.can_shoot
    }

    pub fn timers_running(&self) -> (bool, bool) {
        (self.frame_timer.is_running(), self.spawn_timer.is_running())
    }

    /// Returns whether a repaint was requested since the last call.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    /// Start position: horizontally centred, resting on the floor margin.
    pub fn player_start(&self) -> Point {
        let size = self.assets.sprite(EntityKind::Player).size();
        Point::new(
            (self.bounds.width - size.width) / 2,
            self.bounds.height - size.height - self.settings.player_floor,
        )
    }

    // ── State machine ────────────────────────────────────────────────────────

    /// Enter `Running` with a fresh background and a start-positioned player.
    pub fn start_game(&mut self) {
        self.entities.clear();
        self.entities.push(self.background.clone());
        let player = self.make(EntityKind::Player, self.player_start());
        self.entities.push(player);

        self.frame_timer.start();
        self.spawn_timer.start();
        self.can_shoot = true;
        self.frame = 0;
        self.status = GameStatus::Running;
        log::info!("game started ({}x{})", self.bounds.width, self.bounds.height);
    }

    /// Stop both triggers and leave only the background and the game-over
    /// overlay, drawn once.
    pub fn end_game(&mut self) {
        self.entities.clear();
        self.frame_timer.stop();
        self.spawn_timer.stop();

        for overlay in [&mut self.background, &mut self.game_over] {
            overlay.update_object();
            render(overlay, &mut self.raster);
        }
        self.entities.push(self.background.clone());
        self.entities.push(self.game_over.clone());

        self.status = GameStatus::GameOver;
        self.repaint = true;
        log::info!("game over after {} frames", self.frame);
    }

    /// Restart command; only honoured from `GameOver`.
    pub fn restart(&mut self) -> bool {
        if self.status != GameStatus::GameOver {
            return false;
        }
        self.start_game();
        true
    }

    // ── Triggers ─────────────────────────────────────────────────────────────

    /// Append one enemy at a random column just above the top edge.
    pub fn spawn_enemy(&mut self, rng: &mut impl Rng) {
        if self.status != GameStatus::Running {
            return;
        }
        let size = self.assets.sprite(EntityKind::Enemy).size();
        let margin = self.settings.spawn_margin;
        let low = margin;
        // Non-empty: checked by `Settings::validate_for` in `World::new`.
        let high = self.bounds.width - size.width - margin;
        let pos = Point::new(rng.gen_range(low..=high), -size.height);
        let enemy = self.make(EntityKind::Enemy, pos);
        log::debug!("enemy spawned at ({}, {})", pos.x, pos.y);
        self.entities.push(enemy);
    }

    /// Feed elapsed wall time to both triggers and run whatever fired.
    pub fn pump(
        &mut self,
        elapsed: Duration,
        controls: &Controls,
        rng: &mut impl Rng,
        sink: &mut dyn SoundSink,
    ) {
        let spawns = self.spawn_timer.advance(elapsed);
        if spawns > MAX_CATCH_UP_SPAWNS {
            log::warn!("dropping {} late spawns", spawns - MAX_CATCH_UP_SPAWNS);
        }
        for _ in 0..spawns.min(MAX_CATCH_UP_SPAWNS) {
            self.spawn_enemy(rng);
        }
        let frames = self.frame_timer.advance(elapsed);
        if frames > MAX_CATCH_UP_FRAMES {
            log::warn!("dropping {} late frames", frames - MAX_CATCH_UP_FRAMES);
        }
        for _ in 0..frames.min(MAX_CATCH_UP_FRAMES) {
            if self.status != GameStatus::Running {
                break;
            }
            self.game_loop(controls, sink);
        }
    }

    // ── Frame pass ───────────────────────────────────────────────────────────

    /// Move the player and handle the fire command. Firing is edge
    /// triggered: the fire key has to be released before the next shot.
    pub fn apply_input(&mut self, controls: &Controls, sink: &mut dyn SoundSink) {
        let Some(p) = self.player_index() else {
            return;
        };
        let player = &mut self.entities[p];
        if controls.left {
            player.move_left();
        }
        if controls.right {
            player.move_right();
        }
        if controls.up {
            player.move_up();
        }
        if controls.down {
            player.move_down();
        }

        if controls.fire && self.can_shoot {
            let muzzle = player.muzzle(self.assets.sprite(EntityKind::Bullet).size());
            let bullet = self.make(EntityKind::Bullet, muzzle);
            bullet.play_sound(sink);
            // Just after the background, so bullets draw under everything else.
            let at = self.entities.len().min(1);
            self.entities.insert(at, bullet);
            self.can_shoot = false;
        }
        if !controls.fire {
            self.can_shoot = true;
        }
    }

    /// One frame: prune, input, update + draw, collide, repaint.
    pub fn game_loop(&mut self, controls: &Controls, sink: &mut dyn SoundSink) {
        if self.status != GameStatus::Running {
            return;
        }
        self.frame += 1;
        self.entities.retain(|e| e.active);
        self.apply_input(controls, sink);

        for i in 0..self.entities.len() {
            let entity = &mut self.entities[i];
            entity.update_object();
            render(entity, &mut self.raster);
            if entity.is_out_of_bounds() {
                entity.destroy();
            }

            if entity.kind != EntityKind::Enemy || !entity.active {
                continue;
            }
            if self.enemy_hits_player(i, sink) {
                self.end_game();
                return;
            }
            self.resolve_bullet_hits(i, sink);
        }

        // The player flew off the viewport: nothing could end the run otherwise.
        if self.player_index().is_none() {
            log::debug!("player left the viewport");
            self.end_game();
            return;
        }

        log::trace!("frame {}: {} entities", self.frame, self.entities.len());
        self.repaint = true;
    }

    fn enemy_hits_player(&mut self, enemy: usize, sink: &mut dyn SoundSink) -> bool {
        let Some(p) = self.player_index() else {
            return false;
        };
        if !self.entities[enemy].is_colliding_with(&self.entities[p], sink) {
            return false;
        }
        let player = &mut self.entities[p];
        player.destroy();
        player.play_sound(sink);
        log::debug!("player hit at ({}, {})", player.pos.x, player.pos.y);
        true
    }

    /// Destroy the enemy and the first live bullet overlapping it. Unlike the
    /// classic game, which kept testing every bullet against an enemy it had
    /// already destroyed, an enemy consumes at most one bullet per frame.
    fn resolve_bullet_hits(&mut self, enemy: usize, sink: &mut dyn SoundSink) {
        for j in 0..self.entities.len() {
            let bullet = &self.entities[j];
            if bullet.kind != EntityKind::Bullet || !bullet.active {
                continue;
            }
            if self.entities[enemy].is_colliding_with(bullet, sink) {
                self.entities[enemy].destroy();
                self.entities[j].destroy();
                log::debug!("enemy destroyed at frame {}", self.frame);
                return;
            }
        }
    }
}
