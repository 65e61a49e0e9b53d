//! Geometric properties of game objects, checked over generated inputs.

use std::sync::Arc;

use arena_shooter::entities::*;
use arena_shooter::sound::{Clip, Muted};
use arena_shooter::{AssetTable, Settings, World};

use proptest::prelude::*;

const W: i32 = 64;
const H: i32 = 28;

fn make_world(player_speed: i32) -> World {
    let settings = Settings { player_speed, ..Settings::default() };
    World::new(settings, Arc::new(AssetTable::load().unwrap())).unwrap()
}

fn any_kind() -> impl Strategy<Value = EntityKind> {
    prop::sample::select(EntityKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn rect_tracks_position_after_update(
        kind in any_kind(),
        x in -100i32..100,
        y in -100i32..100,
    ) {
        let mut obj = make_world(1).make(kind, Point::new(x, y));
        obj.update_object();
        prop_assert_eq!(obj.rect, Rect::new(obj.pos, obj.sprite.size()));
    }

    #[test]
    fn horizontal_moves_stay_inside(
        speed in 1i32..12,
        x in 0i32..=(W - 5),
        moves in prop::collection::vec(any::<bool>(), 1..40),
    ) {
        let mut p = make_world(speed).make(EntityKind::Player, Point::new(x, 10));
        for right in moves {
            if right { p.move_right() } else { p.move_left() }
            prop_assert!(p.pos.x >= 0);
            prop_assert!(p.pos.x <= W - p.size.width);
            prop_assert_eq!(p.pos.y, 10);
        }
    }

    #[test]
    fn vertical_moves_are_never_clamped(
        speed in 1i32..12,
        y in -50i32..50,
        ups in 0i32..20,
    ) {
        let mut p = make_world(speed).make(EntityKind::Player, Point::new(10, y));
        for _ in 0..ups {
            p.move_up();
        }
        prop_assert_eq!(p.pos.y, y - speed * ups);
    }

    #[test]
    fn collision_is_symmetric(
        ax in -10i32..70, ay in -10i32..30,
        bx in -10i32..70, by in -10i32..30,
    ) {
        let world = make_world(1);
        let a = world.make(EntityKind::Enemy, Point::new(ax, ay));
        let b = world.make(EntityKind::Player, Point::new(bx, by));
        prop_assert_eq!(
            a.is_colliding_with(&b, &mut Muted),
            b.is_colliding_with(&a, &mut Muted)
        );
    }

    #[test]
    fn collision_sound_only_on_hit(
        ax in -10i32..70, ay in -10i32..30,
        bx in -10i32..70, by in -10i32..30,
    ) {
        let world = make_world(1);
        let a = world.make(EntityKind::Enemy, Point::new(ax, ay));
        let b = world.make(EntityKind::Bullet, Point::new(bx, by));
        let mut cues: Vec<Clip> = Vec::new();
        let hit = a.is_colliding_with(&b, &mut cues);
        prop_assert_eq!(cues.len(), usize::from(hit));
    }

    #[test]
    fn inside_the_margin_is_in_bounds(
        kind in prop::sample::select(vec![EntityKind::Player, EntityKind::Enemy, EntityKind::Bullet]),
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
    ) {
        let world = make_world(1);
        let size = world.make(kind, Point::new(0, 0)).size;
        // Every position in [-w, W + w] x [-h, H + h] is still in bounds
        let x = -size.width + (fx * f64::from(W + 2 * size.width)) as i32;
        let y = -size.height + (fy * f64::from(H + 2 * size.height)) as i32;
        prop_assert!(!world.make(kind, Point::new(x, y)).is_out_of_bounds());
    }

    #[test]
    fn past_the_margin_is_out_of_bounds(
        kind in prop::sample::select(vec![EntityKind::Player, EntityKind::Enemy, EntityKind::Bullet]),
        beyond in 1i32..50,
        edge in 0usize..4,
    ) {
        let world = make_world(1);
        let size = world.make(kind, Point::new(0, 0)).size;
        let pos = match edge {
            0 => Point::new(10, -size.height - beyond),
            1 => Point::new(10, H + size.height + beyond),
            2 => Point::new(-size.width - beyond, 10),
            _ => Point::new(W + size.width + beyond, 10),
        };
        prop_assert!(world.make(kind, pos).is_out_of_bounds());
    }

    #[test]
    fn destroy_twice_equals_destroy_once(kind in any_kind(), x in -20i32..80, y in -20i32..40) {
        let world = make_world(1);
        let mut once = world.make(kind, Point::new(x, y));
        once.destroy();
        let mut twice = world.make(kind, Point::new(x, y));
        twice.destroy();
        twice.destroy();
        prop_assert!(!once.active && !twice.active);
        prop_assert_eq!(once.pos, twice.pos);
        prop_assert_eq!(once.rect, twice.rect);
    }
}
