use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use rand::Rng;

use super::{Angle, Animation, Class, Lifetime, Position, Spin, Tint, Velocity, Vitals};
use crate::renderer::Rgba;
use crate::world::{BodyPartKind, EnemyKind, PickupKind, ProjectileKind};

pub const PROJECTILE_SPEED: f32 = 9.0;
pub const PROJECTILE_LIFE: f32 = 2.0;
pub const BOMB_FUSE: f32 = 2.2;

pub fn spawn_enemy(world: &mut World, kind: EnemyKind, pos: Vec2, phase: f32) -> Entity {
    let rate = match kind {
        EnemyKind::Wraith => 2.5,
        EnemyKind::Brute => 1.2,
        _ => 3.0,
    };
    world.spawn((
        Position(pos, 0.0),
        Class::Enemy(kind),
        Animation { phase, rate },
        Vitals::default(),
    ))
}

pub fn spawn_pickup(world: &mut World, kind: PickupKind, pos: Vec2, phase: f32) -> Entity {
    world.spawn((
        Position(pos, 0.0),
        Class::Pickup(kind),
        Animation { phase, rate: 3.0 },
    ))
}

pub fn spawn_projectile(world: &mut World, kind: ProjectileKind, pos: Vec2, dir: Vec2) -> Entity {
    let v = dir.normalize_or_zero() * PROJECTILE_SPEED;
    world.spawn((
        Position(pos, 0.5),
        Velocity(v.extend(0.0)),
        Class::Projectile(kind),
        Angle(0.0),
        Spin(9.0),
        Lifetime(PROJECTILE_LIFE),
    ))
}

/// Lobbed bomb: leaves at eye height with an upward kick.
pub fn spawn_bomb(world: &mut World, pos: Vec2, dir: Vec2) -> Entity {
    let v = dir.normalize_or_zero() * 4.0;
    world.spawn((
        Position(pos, 0.5),
        Velocity(Vec3::new(v.x, v.y, 2.5)),
        Class::Bomb,
        Angle(0.0),
        Spin(5.0),
        Lifetime(BOMB_FUSE),
    ))
}

/// Burst of tumbling body parts around `pos`.
pub fn spawn_gibs<R: Rng>(world: &mut World, rng: &mut R, pos: Vec2) {
    let kinds = [
        BodyPartKind::Head,
        BodyPartKind::Limb,
        BodyPartKind::Limb,
        BodyPartKind::Chunk,
        BodyPartKind::Chunk,
    ];
    for kind in kinds {
        let a = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(1.0..3.0);
        world.spawn((
            Position(pos, 0.4),
            Velocity(Vec3::new(a.cos() * speed, a.sin() * speed, rng.gen_range(2.0..4.0))),
            Class::BodyPart(kind),
            Angle(a),
            Spin(rng.gen_range(-12.0..12.0)),
            Lifetime(rng.gen_range(2.5..4.0)),
        ));
    }
}

/// `count` short-lived sparks of `color` flying out of `pos` at height `z`.
pub fn spawn_sparks<R: Rng>(
    world: &mut World,
    rng: &mut R,
    pos: Vec2,
    z: f32,
    color: Rgba,
    count: usize,
) {
    for _ in 0..count {
        let a = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(0.5..2.5);
        world.spawn((
            Position(pos, z),
            Velocity(Vec3::new(a.cos() * speed, a.sin() * speed, rng.gen_range(0.5..2.0))),
            Class::Spark,
            Tint(color),
            Lifetime(rng.gen_range(0.3..0.8)),
        ));
    }
}
