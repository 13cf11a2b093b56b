//! Read-only snapshots of the dynamic things the renderer draws.
//!
//! The simulation owns the real entities; once per frame it hands the
//! renderer a slice of [`RenderableEntity`] values and forgets about them.

use glam::Vec2;

use crate::renderer::{Rgba, color::rgb};

/// Seconds a corpse stays visible after death.
pub const DEATH_GRACE: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Grunt,
    Stalker,
    Brute,
    Wraith,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Health,
    Ammo,
    Armor,
    Key,
    Invincibility,
    DamageBoost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    Plasma,
    Fireball,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyPartKind {
    Head,
    Limb,
    Chunk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    Plasma,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    pub pos: Vec2,
    pub kind: EnemyKind,
    /// Seconds of hurt flash left.
    pub hurt_timer: f32,
    pub stunned: bool,
    /// Seconds since death, `None` while alive.
    pub dead_for: Option<f32>,
    /// Walk / hover animation phase in radians.
    pub phase: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    pub pos: Vec2,
    pub kind: PickupKind,
    pub bob_phase: f32,
    pub collected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    pub pos: Vec2,
    pub kind: ProjectileKind,
    pub rotation: f32,
    /// Seconds left before it fizzles.
    pub life: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BombSnapshot {
    pub pos: Vec2,
    /// Height above the floor in wall units.
    pub z: f32,
    pub rotation: f32,
    /// Seconds until detonation.
    pub fuse: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPartSnapshot {
    pub pos: Vec2,
    pub z: f32,
    pub kind: BodyPartKind,
    pub rotation: f32,
    pub life: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderableEntity {
    Enemy(EnemySnapshot),
    Pickup(PickupSnapshot),
    Projectile(ProjectileSnapshot),
    Bomb(BombSnapshot),
    BodyPart(BodyPartSnapshot),
}

impl RenderableEntity {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        match self {
            Self::Enemy(e) => e.pos,
            Self::Pickup(p) => p.pos,
            Self::Projectile(p) => p.pos,
            Self::Bomb(b) => b.pos,
            Self::BodyPart(b) => b.pos,
        }
    }

    /// Collected pickups, long-dead enemies and expired debris are skipped.
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Enemy(e) => e.dead_for.is_none_or(|t| t <= DEATH_GRACE),
            Self::Pickup(p) => !p.collected,
            Self::Projectile(p) => p.life > 0.0,
            Self::Bomb(b) => b.fuse > 0.0,
            Self::BodyPart(b) => b.life > 0.0,
        }
    }

    #[inline]
    pub fn is_live_enemy(&self) -> bool {
        matches!(self, Self::Enemy(e) if e.dead_for.is_none())
    }

    /// Colour this entity glows with, if it emits light at all.
    pub fn glow(&self) -> Option<Rgba> {
        match self {
            Self::Pickup(p) if !p.collected => Some(match p.kind {
                PickupKind::Health => rgb(255, 60, 60),
                PickupKind::Ammo => rgb(200, 160, 60),
                PickupKind::Armor => rgb(60, 200, 90),
                PickupKind::Key => rgb(255, 210, 40),
                PickupKind::Invincibility => rgb(60, 230, 255),
                PickupKind::DamageBoost => rgb(255, 40, 20),
            }),
            Self::Projectile(p) if p.life > 0.0 => Some(match p.kind {
                ProjectileKind::Plasma => rgb(80, 160, 255),
                ProjectileKind::Fireball => rgb(255, 140, 30),
            }),
            Self::Bomb(b) if b.fuse > 0.0 && b.fuse < 1.0 => Some(rgb(255, 50, 30)),
            _ => None,
        }
    }
}

/// Short-lived spark / blood / smoke dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub z: f32,
    pub color: Rgba,
    pub life: f32,
}

/// First-person weapon drawn on top of the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewModel {
    pub weapon: WeaponKind,
    /// 0 = raised and ready, 1 = fully lowered (mid weapon switch).
    pub swap: f32,
    /// 0 = at rest, 1 = peak kick right after a shot.
    pub recoil: f32,
    pub bob_phase: f32,
    pub firing: bool,
}
