//! ECS → renderer hand-off.

use hecs::World;

use super::{Angle, Animation, Class, Collected, Lifetime, Position, Tint, Vitals};
use crate::world::{
    BodyPartSnapshot, BombSnapshot, EnemySnapshot, Particle, PickupSnapshot, ProjectileSnapshot,
    RenderableEntity,
};

/// Everything with a sprite, in no particular order.
pub fn entities(world: &World, out: &mut Vec<RenderableEntity>) {
    out.clear();
    let mut q = world.query::<(
        &Position,
        &Class,
        Option<&Animation>,
        Option<&Angle>,
        Option<&Lifetime>,
        Option<&Vitals>,
        Option<&Collected>,
    )>();
    for (_, (pos, class, anim, angle, life, vitals, collected)) in q.iter() {
        let phase = anim.map_or(0.0, |a| a.phase);
        let rotation = angle.map_or(0.0, |a| a.0);
        let life = life.map_or(1.0, |l| l.0);
        let snap = match *class {
            Class::Enemy(kind) => {
                let v = vitals.copied().unwrap_or_default();
                RenderableEntity::Enemy(EnemySnapshot {
                    pos: pos.0,
                    kind,
                    hurt_timer: v.hurt,
                    stunned: v.stunned > 0.0,
                    dead_for: v.dead_for,
                    phase,
                })
            }
            Class::Pickup(kind) => RenderableEntity::Pickup(PickupSnapshot {
                pos: pos.0,
                kind,
                bob_phase: phase,
                collected: collected.is_some(),
            }),
            Class::Projectile(kind) => RenderableEntity::Projectile(ProjectileSnapshot {
                pos: pos.0,
                kind,
                rotation,
                life,
            }),
            Class::Bomb => RenderableEntity::Bomb(BombSnapshot {
                pos: pos.0,
                z: pos.1,
                rotation,
                fuse: life,
            }),
            Class::BodyPart(kind) => RenderableEntity::BodyPart(BodyPartSnapshot {
                pos: pos.0,
                z: pos.1,
                kind,
                rotation,
                life,
            }),
            Class::Spark => continue,
        };
        out.push(snap);
    }
}

pub fn particles(world: &World, out: &mut Vec<Particle>) {
    out.clear();
    let mut q = world.query::<(&Position, &Tint, &Lifetime)>();
    out.extend(q.iter().map(|(_, (pos, tint, life))| Particle {
        pos: pos.0,
        z: pos.1,
        color: tint.0,
        life: life.0,
    }));
}
