use glam::{Vec2, Vec3};

use crate::renderer::Rgba;
use crate::world::{BodyPartKind, EnemyKind, PickupKind, ProjectileKind, WeaponKind};

/// World-space position. z (height above the floor, wall units) is kept
/// separate because the map itself is flat.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2, pub f32);

#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec3);

impl Velocity {
    #[inline]
    pub fn zero_xy(&mut self) {
        self.0.x = 0.0;
        self.0.y = 0.0;
    }
}

/// Sprite rotation in radians (projectiles, bombs, gibs).
#[derive(Debug, Clone, Copy)]
pub struct Angle(pub f32);

/// Angular speed in rad/s.
#[derive(Debug, Clone, Copy)]
pub struct Spin(pub f32);

/// What an entity is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Enemy(EnemyKind),
    Pickup(PickupKind),
    Projectile(ProjectileKind),
    Bomb,
    BodyPart(BodyPartKind),
    Spark,
}

/// Free-running cosmetic phase (walk cycle, bob, hover).
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    pub phase: f32,
    pub rate: f32,
}

/// Seconds left before the entity expires (fuse for bombs).
#[derive(Debug, Clone, Copy)]
pub struct Lifetime(pub f32);

/// Enemy visual state driven by hits and blasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vitals {
    pub hurt: f32,
    pub stunned: f32,
    pub dead_for: Option<f32>,
}

/// Marks a pickup the player already walked over.
#[derive(Debug, Clone, Copy)]
pub struct Collected;

/// Particle colour.
#[derive(Debug, Clone, Copy)]
pub struct Tint(pub Rgba);

/// Everything about the player the camera and view model need.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub angle: f32,
    pub pitch: f32,
    /// Jump/crouch eye offset in wall units.
    pub z: f32,
    pub vz: f32,
    pub crouch: f32,
    pub aiming: bool,
    pub weapon: WeaponKind,
    /// 0 = ready, counts up to 1 while lowering, back down while raising.
    pub swap: f32,
    pub pending: Option<WeaponKind>,
    pub recoil: f32,
    pub bob_phase: f32,
    pub cooldown: f32,
    pub muzzle: f32,
    /// Seconds until standing in a hazard hurts again.
    pub hazard_tick: f32,
}

impl Player {
    pub fn new(angle: f32) -> Self {
        Self {
            angle,
            pitch: 0.0,
            z: 0.0,
            vz: 0.0,
            crouch: 0.0,
            aiming: false,
            weapon: WeaponKind::Pistol,
            swap: 0.0,
            pending: None,
            recoil: 0.0,
            bob_phase: 0.0,
            cooldown: 0.0,
            muzzle: 0.0,
            hazard_tick: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    pub forward: f32,       // –1 … +1
    pub strafe: f32,        // –1 … +1  (left / right)
    pub turn: f32,          // –1 … +1  (left / right)
    pub look: f32,          // –1 … +1  (down / up)
    pub run: bool,          // Shift
    pub fire: bool,         // Ctrl
    pub use_act: bool,      // Space
    pub jump: bool,         // J
    pub crouch: bool,       // C
    pub aim: bool,          // right mouse / Z
    pub throw: bool,        // B
    pub weapon: Option<u8>, // 1-3 if pressed this tic
}
