use super::{Player, Position, Velocity, demo, snapshot, systems};
use crate::renderer::ScreenEffects;
use crate::sim::InputCmd;
use crate::world::{CameraPose, Particle, RenderableEntity, TileMap, ViewModel};
use glam::Vec2;
use hecs::{Entity, World};
use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 35;
pub const DT: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Owns the ECS world and drives all game-logic systems.
pub struct TicRunner {
    world: World,
    player: Entity,
    effects: ScreenEffects,
    rng: StdRng,
    time: f32,
    last: Instant,
}

impl TicRunner {
    pub fn new(start: Vec2, angle: f32, seed: u64) -> Self {
        let mut world = World::new();
        let player = world.spawn((Position(start, 0.0), Velocity::default(), Player::new(angle)));
        Self {
            world,
            player,
            effects: ScreenEffects::default(),
            rng: StdRng::seed_from_u64(seed),
            time: 0.0,
            last: Instant::now(),
        }
    }

    /// Player at the demo start, demo monsters and items spawned.
    pub fn demo(seed: u64) -> Self {
        let mut sim = Self::new(demo::PLAYER_START, demo::PLAYER_ANGLE, seed);
        demo::populate(&mut sim.world);
        debug!("demo populated with {} entities", sim.world.len());
        sim
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[inline]
    pub fn player(&self) -> Entity {
        self.player
    }

    #[inline]
    pub fn effects(&self) -> &ScreenEffects {
        &self.effects
    }

    #[inline]
    pub fn effects_mut(&mut self) -> &mut ScreenEffects {
        &mut self.effects
    }

    /// Simulated seconds since start.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance enough tics to synchronise simulation with real time.
    ///
    /// One-shot actions in `cmd` (use, weapon select) fire on the first
    /// tic only.
    pub fn pump(&mut self, map: &mut TileMap, cmd: InputCmd) {
        let mut cmd = cmd;
        while self.last.elapsed() >= TIC {
            self.tick(map, cmd);
            self.last += TIC;
            cmd.use_act = false;
            cmd.weapon = None;
        }
    }

    /* ---------------------------------------------------------------- */
    /* run one fixed-rate game tic                                       */
    /* ---------------------------------------------------------------- */
    pub fn tick(&mut self, map: &mut TileMap, cmd: InputCmd) {
        let world = &mut self.world;
        let player = self.player;

        systems::player_input(world, player, cmd, DT);
        systems::player_movement(world, player, map, DT);
        systems::player_actions(world, player, map, cmd, &mut self.rng, &mut self.effects, DT);
        systems::pickups(world, player, &mut self.effects);
        systems::hazards(world, player, map, &mut self.effects, DT);

        systems::timers(world, DT);
        systems::animation(world, DT);
        systems::projectiles(world, map, &mut self.rng, DT);
        systems::ballistics(world, map, DT);
        let listener = self.camera().pos;
        systems::detonate(&mut self.world, &mut self.rng, &mut self.effects, listener);
        systems::reap(&mut self.world);

        map.update_doors(DT);
        self.effects.tick(DT);
        self.time += DT;
    }

    /// Eye of the player; the origin if the player entity is gone.
    pub fn camera(&self) -> CameraPose {
        let mut q = match self.world.query_one::<(&Position, &Player)>(self.player) {
            Ok(q) => q,
            Err(_) => return CameraPose::new(Vec2::ZERO, 0.0),
        };
        let Some((pos, p)) = q.get() else {
            return CameraPose::new(Vec2::ZERO, 0.0);
        };
        let mut cam = CameraPose::new(pos.0, p.angle);
        cam.set_pitch(p.pitch);
        cam.z_offset = p.z - p.crouch;
        cam.aiming = p.aiming;
        cam
    }

    pub fn view_model(&self) -> Option<ViewModel> {
        let p = self.world.get::<&Player>(self.player).ok()?;
        Some(ViewModel {
            weapon: p.weapon,
            swap: p.swap,
            recoil: p.recoil,
            bob_phase: p.bob_phase,
            firing: p.muzzle > 0.0,
        })
    }

    pub fn muzzle_flash(&self) -> f32 {
        self.world
            .get::<&Player>(self.player)
            .map_or(0.0, |p| p.muzzle)
    }

    pub fn snapshot(&self, out: &mut Vec<RenderableEntity>) {
        snapshot::entities(&self.world, out);
    }

    pub fn particles(&self, out: &mut Vec<Particle>) {
        snapshot::particles(&self.world, out);
    }
}
