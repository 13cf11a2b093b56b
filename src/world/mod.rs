mod atmosphere;
mod camera;
mod entity;
mod map;
pub mod procgen;
mod texture;

pub use atmosphere::LevelAtmosphere;

pub use camera::{AIM_FOV_SCALE, CameraPose, FOV_SCALE, MAX_PITCH_DEG, NEAR_EPSILON};

pub use entity::{
    BodyPartKind, BodyPartSnapshot, BombSnapshot, DEATH_GRACE, EnemyKind, EnemySnapshot,
    Particle, PickupKind, PickupSnapshot, ProjectileKind, ProjectileSnapshot, RenderableEntity,
    ViewModel, WeaponKind,
};

pub use map::{
    DOOR_PASSABLE, DOOR_RAY_TRANSPARENT, Door, DoorId, MAX_MATERIAL, MapError, MaterialId,
    TileMap,
};

pub use texture::{
    CEILING_TEXTURE, FLOOR_TEXTURE, TEX_SIZE, Texture, TextureBank, TextureError, TextureId,
    wall_texture,
};
