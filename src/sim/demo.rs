//! Built-in test level: four rooms, three doors, a few acid pools and
//! every enemy / pickup kind.

use glam::Vec2;
use hecs::World;

use super::mob::{spawn_enemy, spawn_pickup};
use crate::world::{Door, EnemyKind, MapError, PickupKind, TileMap};

pub const PLAYER_START: Vec2 = Vec2::new(2.5, 2.5);
pub const PLAYER_ANGLE: f32 = 0.0;

const LAYOUT: [&str; 24] = [
    "111111111111222222222222",
    "1..........12..........2",
    "1..........12..........2",
    "1...33.....12....~~~...2",
    "1...33.....12....~~~...2",
    "1..........8...........2",
    "1..........12..........2",
    "1..........12..........2",
    "144444.44441222222.22222",
    "5..........6...........7",
    "5..........6...........7",
    "5...~~.....6....66.....7",
    "5...~~.....8...........7",
    "5..........6....66.....7",
    "5..........6...........7",
    "5555558555566777777.7777",
    "5..........6...........7",
    "5..........6...........7",
    "5...77.....6....~~.....7",
    "5...77.....6....~~.....7",
    "5......................7",
    "5......................7",
    "5......................7",
    "555555555555777777777777",
];

/// (x, y, key)
const DOORS: [(i32, i32, u8); 3] = [(11, 5, 0), (11, 12, 1), (6, 15, 0)];

/// Raised dais in the bottom-right room.
const DAIS: (usize, usize, usize, usize) = (20, 21, 23, 23);
const DAIS_HEIGHT: f32 = 0.12;

pub fn level() -> Result<TileMap, MapError> {
    let mut map = TileMap::from_rows(&LAYOUT)?;
    for (x, y, key) in DOORS {
        map.add_door(Door::new(x, y, key))?;
    }
    let (x0, y0, x1, y1) = DAIS;
    for y in y0..y1 {
        for x in x0..x1 {
            map.set_floor_height(x, y, DAIS_HEIGHT);
        }
    }
    Ok(map)
}

pub fn populate(world: &mut World) {
    let enemies = [
        (EnemyKind::Grunt, 7.5, 2.5),
        (EnemyKind::Stalker, 15.5, 6.5),
        (EnemyKind::Brute, 20.5, 10.5),
        (EnemyKind::Wraith, 8.5, 13.5),
        (EnemyKind::Grunt, 5.5, 17.5),
        (EnemyKind::Stalker, 18.5, 20.5),
    ];
    for (i, (kind, x, y)) in enemies.into_iter().enumerate() {
        spawn_enemy(world, kind, Vec2::new(x, y), i as f32 * 0.9);
    }

    let pickups = [
        (PickupKind::Health, 3.5, 6.5),
        (PickupKind::Ammo, 9.5, 1.5),
        (PickupKind::Armor, 14.5, 2.5),
        (PickupKind::Key, 21.5, 13.5),
        (PickupKind::Invincibility, 2.5, 10.5),
        (PickupKind::DamageBoost, 14.5, 18.5),
    ];
    for (i, (kind, x, y)) in pickups.into_iter().enumerate() {
        spawn_pickup(world, kind, Vec2::new(x, y), i as f32 * 1.3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Position;
    use crate::world::MAX_MATERIAL;

    #[test]
    fn level_parses_with_every_material() {
        let map = level().unwrap();
        assert_eq!((map.width(), map.height()), (24, 24));
        assert_eq!(map.doors().len(), DOORS.len());
        for m in 1..=MAX_MATERIAL {
            let found = (0..24).any(|y| (0..24).any(|x| map.material(x, y) == Some(m)));
            assert!(found, "material {m} unused");
        }
        assert!(map.floor_height(21, 22) > 0.0);
        assert!(!map.is_solid(PLAYER_START));
    }

    #[test]
    fn spawns_sit_on_open_floor() {
        let map = level().unwrap();
        let mut world = World::new();
        populate(&mut world);
        let mut count = 0;
        for (_, pos) in world.query_mut::<&Position>() {
            assert!(!map.is_solid(pos.0), "spawn inside wall at {:?}", pos.0);
            count += 1;
        }
        assert_eq!(count, 12);
    }
}
