mod collision;
mod components;
pub mod demo;
mod mob;
mod snapshot;
mod systems;
mod tic;

pub use collision::{MoveResult, PLAYER_RADIUS, blocked, slide_move};
pub use components::{
    Angle, Animation, Class, Collected, InputCmd, Lifetime, Player, Position, Spin, Tint,
    Velocity, Vitals,
};
pub use mob::{spawn_bomb, spawn_enemy, spawn_gibs, spawn_pickup, spawn_projectile, spawn_sparks};
pub use systems::{GRAVITY, LOOK_RATE, MOVE_SPEED, TURN_RATE};
pub use tic::{DT, SIM_FPS, TicRunner};
