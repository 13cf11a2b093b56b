use std::f32::consts::{PI, TAU};

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use smallvec::SmallVec;

use super::collision::{PLAYER_RADIUS, slide_move};
use super::mob::{spawn_bomb, spawn_gibs, spawn_projectile, spawn_sparks};
use super::{
    Angle, Animation, Class, Collected, InputCmd, Lifetime, Player, Position, Spin, Velocity,
    Vitals,
};
use crate::renderer::{EffectTimer, Rgba, ScreenEffects, color::rgb};
use crate::world::{
    DEATH_GRACE, MAX_PITCH_DEG, PickupKind, ProjectileKind, TileMap, WeaponKind,
};

pub const MOVE_SPEED: f32 = 3.0; // map-units / second
pub const TURN_RATE: f32 = PI; // rad / second (180°/s)
pub const LOOK_RATE: f32 = 90.0; // degrees / second
pub const GRAVITY: f32 = 9.0; // wall-heights / s²
const JUMP_SPEED: f32 = 2.6;
const CROUCH_DEPTH: f32 = 0.25;
const CROUCH_RATE: f32 = 2.0;
const SWAP_RATE: f32 = 4.0;
const FIRE_COOLDOWN: f32 = 0.35;
const PICKUP_RADIUS: f32 = 0.5;
const HIT_RADIUS: f32 = 0.35;
const BLAST_RADIUS: f32 = 1.8;
const USE_RANGE: f32 = 1.5;

const BLOOD: Rgba = rgb(170, 10, 10);
const EMBER: Rgba = rgb(255, 170, 50);

/* ----------------------------------------------------------------- */
/*  Action queue – avoids mutable-borrow conflicts                    */
/* ----------------------------------------------------------------- */
enum Action {
    Despawn(Entity),
    Hurt(Entity),
    Sparks {
        pos: Vec2,
        z: f32,
        color: Rgba,
        count: usize,
    },
}
type Actions = SmallVec<[Action; 8]>;

fn apply<R: Rng>(world: &mut World, rng: &mut R, queue: Actions) {
    for act in queue {
        match act {
            Action::Despawn(e) => {
                world.despawn(e).ok();
            }
            Action::Hurt(e) => {
                if let Ok(mut v) = world.get::<&mut Vitals>(e) {
                    v.hurt = 0.3;
                }
            }
            Action::Sparks {
                pos,
                z,
                color,
                count,
            } => spawn_sparks(world, rng, pos, z, color, count),
        }
    }
}

/* ── Animation system ─────────────────────────────────────────────── */
pub fn animation(world: &mut World, dt: f32) {
    for (_, (anim, vitals)) in world.query_mut::<(&mut Animation, Option<&Vitals>)>() {
        // frozen while stunned or dead
        if vitals.is_some_and(|v| v.stunned > 0.0 || v.dead_for.is_some()) {
            continue;
        }
        anim.phase = (anim.phase + anim.rate * dt).rem_euclid(TAU);
    }
    for (_, (angle, spin)) in world.query_mut::<(&mut Angle, &Spin)>() {
        angle.0 = (angle.0 + spin.0 * dt).rem_euclid(TAU);
    }
}

/* ── Timers ───────────────────────────────────────────────────────── */
pub fn timers(world: &mut World, dt: f32) {
    for (_, v) in world.query_mut::<&mut Vitals>() {
        v.hurt = (v.hurt - dt).max(0.0);
        v.stunned = (v.stunned - dt).max(0.0);
        if let Some(t) = &mut v.dead_for {
            *t += dt;
        }
    }
    for (_, life) in world.query_mut::<&mut Lifetime>() {
        life.0 -= dt;
    }
}

/* ── Ballistics: bombs, body parts and sparks ─────────────────────── */
pub fn ballistics(world: &mut World, map: &TileMap, dt: f32) {
    for (_, (pos, vel, class)) in world.query_mut::<(&mut Position, &mut Velocity, &Class)>() {
        if matches!(class, Class::Projectile(_)) {
            continue;
        }
        vel.0.z -= GRAVITY * dt;
        let next = pos.0 + vel.0.truncate() * dt;
        if map.is_solid(next) {
            // bounce off the wall, losing half the speed
            vel.0.x *= -0.5;
            vel.0.y *= -0.5;
        } else {
            pos.0 = next;
        }
        pos.1 += vel.0.z * dt;
        if pos.1 <= 0.0 {
            pos.1 = 0.0;
            vel.0.z = -vel.0.z * 0.35;
            if vel.0.z < 0.3 {
                vel.0.z = 0.0;
            }
            vel.0.x *= 0.7;
            vel.0.y *= 0.7;
        }
    }
}

/* ── Projectiles: straight flight until a wall or an enemy ────────── */
pub fn projectiles<R: Rng>(world: &mut World, map: &TileMap, rng: &mut R, dt: f32) {
    let targets: SmallVec<[(Entity, Vec2); 16]> = world
        .query_mut::<(&Position, &Vitals)>()
        .into_iter()
        .filter(|(_, (_, v))| v.dead_for.is_none())
        .map(|(e, (p, _))| (e, p.0))
        .collect();

    let mut queue = Actions::new();
    for (e, (pos, vel, class)) in world.query_mut::<(&mut Position, &Velocity, &Class)>() {
        let Class::Projectile(kind) = *class else {
            continue;
        };
        let color = match kind {
            ProjectileKind::Plasma => rgb(120, 190, 255),
            ProjectileKind::Fireball => EMBER,
        };
        let next = pos.0 + vel.0.truncate() * dt;
        if map.is_solid(next) {
            queue.push(Action::Despawn(e));
            queue.push(Action::Sparks {
                pos: pos.0,
                z: pos.1,
                color,
                count: 8,
            });
            continue;
        }
        pos.0 = next;
        if let Some(&(hit, at)) = targets
            .iter()
            .find(|(_, t)| t.distance_squared(next) < HIT_RADIUS * HIT_RADIUS)
        {
            queue.push(Action::Despawn(e));
            queue.push(Action::Hurt(hit));
            queue.push(Action::Sparks {
                pos: at,
                z: 0.5,
                color: BLOOD,
                count: 6,
            });
        }
    }
    apply(world, rng, queue);
}

/* ── Bombs whose fuse ran out ─────────────────────────────────────── */
pub fn detonate<R: Rng>(world: &mut World, rng: &mut R, fx: &mut ScreenEffects, listener: Vec2) {
    let blasts: SmallVec<[(Entity, Vec2); 4]> = world
        .query_mut::<(&Position, &Class, &Lifetime)>()
        .into_iter()
        .filter(|(_, (_, c, l))| **c == Class::Bomb && l.0 <= 0.0)
        .map(|(e, (p, _, _))| (e, p.0))
        .collect();

    for (bomb, at) in blasts {
        world.despawn(bomb).ok();
        spawn_sparks(world, rng, at, 0.3, EMBER, 24);
        fx.shake = fx.shake.max(8.0 / (1.0 + at.distance(listener)));

        let mut killed: SmallVec<[Vec2; 4]> = SmallVec::new();
        for (_, (pos, v)) in world.query_mut::<(&Position, &mut Vitals)>() {
            if v.dead_for.is_some() {
                continue;
            }
            let d = pos.0.distance(at);
            if d < BLAST_RADIUS {
                v.dead_for = Some(0.0);
                killed.push(pos.0);
            } else if d < BLAST_RADIUS * 2.0 {
                v.stunned = 2.0;
            }
        }
        for p in killed {
            spawn_gibs(world, rng, p);
            fx.kill = EffectTimer::new(0.35);
        }
    }
}

/* ── Remove expired things ────────────────────────────────────────── */
pub fn reap(world: &mut World) {
    let gone: SmallVec<[Entity; 16]> = world
        .query_mut::<(&Class, Option<&Lifetime>, Option<&Vitals>)>()
        .into_iter()
        .filter(|(_, (c, l, v))| {
            let expired = **c != Class::Bomb && l.is_some_and(|l| l.0 <= 0.0);
            let rotted = v.is_some_and(|v| v.dead_for.is_some_and(|t| t > DEATH_GRACE + 0.5));
            expired || rotted
        })
        .map(|(e, _)| e)
        .collect();
    for e in gone {
        world.despawn(e).ok();
    }
}

/* ── Player ───────────────────────────────────────────────────────── */

/// Turn, look, crouch and wish-velocity from one input sample.
pub fn player_input(world: &mut World, player: Entity, cmd: InputCmd, dt: f32) {
    let Ok((vel, p)) = world.query_one_mut::<(&mut Velocity, &mut Player)>(player) else {
        return;
    };

    if cmd.turn != 0.0 {
        p.angle = (p.angle + cmd.turn * TURN_RATE * dt).rem_euclid(TAU);
    }
    p.pitch = (p.pitch + cmd.look * LOOK_RATE * dt).clamp(-MAX_PITCH_DEG, MAX_PITCH_DEG);
    p.aiming = cmd.aim;

    let target = if cmd.crouch { CROUCH_DEPTH } else { 0.0 };
    p.crouch += (target - p.crouch).clamp(-CROUCH_RATE * dt, CROUCH_RATE * dt);

    if cmd.jump && p.z <= 0.0 && p.crouch <= 0.0 {
        p.vz = JUMP_SPEED;
    }

    let mut speed = if cmd.run { MOVE_SPEED * 1.6 } else { MOVE_SPEED };
    if p.crouch > 0.0 || p.aiming {
        speed *= 0.6;
    }

    if cmd.forward != 0.0 || cmd.strafe != 0.0 {
        let (s, c) = p.angle.sin_cos();
        let fwd = Vec2::new(c, s);
        let right = fwd.perp();
        let wish = (fwd * cmd.forward + right * cmd.strafe).normalize_or_zero();
        vel.0.x = wish.x * speed;
        vel.0.y = wish.y * speed;
    } else {
        vel.zero_xy();
    }
}

/// Slide the player through the map and integrate the jump arc.
pub fn player_movement(world: &mut World, player: Entity, map: &TileMap, dt: f32) {
    let Ok((pos, vel, p)) =
        world.query_one_mut::<(&mut Position, &Velocity, &mut Player)>(player)
    else {
        return;
    };
    let step = vel.0.truncate() * dt;
    let moved = slide_move(map, pos.0, step, PLAYER_RADIUS);
    let travelled = moved.pos.distance(pos.0);
    pos.0 = moved.pos;
    if travelled > 0.0 {
        p.bob_phase = (p.bob_phase + travelled * 6.0).rem_euclid(TAU);
    }

    p.vz -= GRAVITY * dt;
    p.z += p.vz * dt;
    if p.z <= 0.0 {
        p.z = 0.0;
        p.vz = 0.0;
    }
}

fn weapon_for_slot(slot: u8) -> Option<WeaponKind> {
    match slot {
        1 => Some(WeaponKind::Pistol),
        2 => Some(WeaponKind::Shotgun),
        3 => Some(WeaponKind::Plasma),
        _ => None,
    }
}

/// Weapon swap, firing, throwing and using doors.
pub fn player_actions<R: Rng>(
    world: &mut World,
    player: Entity,
    map: &mut TileMap,
    cmd: InputCmd,
    rng: &mut R,
    fx: &mut ScreenEffects,
    dt: f32,
) {
    let (origin, fwd, weapon, shoot, throw) = {
        let Ok((pos, p)) = world.query_one_mut::<(&Position, &mut Player)>(player) else {
            return;
        };
        p.cooldown = (p.cooldown - dt).max(0.0);
        p.muzzle = (p.muzzle - dt * 8.0).max(0.0);
        p.recoil = (p.recoil - dt * 5.0).max(0.0);

        if let Some(w) = cmd.weapon.and_then(weapon_for_slot) {
            if w != p.weapon {
                p.pending = Some(w);
            }
        }
        match p.pending {
            Some(next) => {
                p.swap += dt * SWAP_RATE;
                if p.swap >= 1.0 {
                    p.swap = 1.0;
                    p.weapon = next;
                    p.pending = None;
                }
            }
            None => p.swap = (p.swap - dt * SWAP_RATE).max(0.0),
        }

        let ready = p.cooldown <= 0.0 && p.swap <= 0.0;
        let shoot = cmd.fire && ready;
        let throw = cmd.throw && ready && !shoot;
        if shoot {
            p.cooldown = FIRE_COOLDOWN;
            p.muzzle = 1.0;
            p.recoil = 1.0;
        } else if throw {
            p.cooldown = FIRE_COOLDOWN * 2.0;
        }
        let (s, c) = p.angle.sin_cos();
        (pos.0, Vec2::new(c, s), p.weapon, shoot, throw)
    };

    if shoot {
        fx.shake = fx.shake.max(1.5);
        let muzzle = origin + fwd * 0.3;
        match weapon {
            WeaponKind::Pistol => {
                spawn_projectile(world, ProjectileKind::Fireball, muzzle, fwd);
            }
            WeaponKind::Shotgun => {
                for spread in [-0.08_f32, 0.0, 0.08] {
                    let dir = Vec2::from_angle(spread).rotate(fwd);
                    spawn_projectile(world, ProjectileKind::Fireball, muzzle, dir);
                }
            }
            WeaponKind::Plasma => {
                spawn_projectile(world, ProjectileKind::Plasma, muzzle, fwd);
            }
        }
        spawn_sparks(world, rng, muzzle, 0.45, EMBER, 3);
    }
    if throw {
        spawn_bomb(world, origin + fwd * 0.3, fwd);
    }

    if cmd.use_act {
        toggle_door(map, origin, fwd);
    }
}

/// Open (or close) the first door within reach straight ahead.
fn toggle_door(map: &mut TileMap, origin: Vec2, fwd: Vec2) {
    let mut t = 0.25;
    while t <= USE_RANGE {
        let cell = (origin + fwd * t).floor().as_ivec2();
        if let Some(id) = map.doors().iter().position(|d| d.cell == cell) {
            let id = id as u16;
            let shut = map.doors()[id as usize].open_amount < 0.5;
            if shut {
                map.open_door(id);
            } else {
                map.close_door(id);
            }
            return;
        }
        t += 0.25;
    }
}

/// Collect pickups the player touches; the screen reacts with a tint.
pub fn pickups(world: &mut World, player: Entity, fx: &mut ScreenEffects) {
    let Ok(at) = world.get::<&Position>(player).map(|p| p.0) else {
        return;
    };
    let touched: SmallVec<[(Entity, PickupKind); 4]> = world
        .query_mut::<(&Position, &Class)>()
        .without::<&Collected>()
        .into_iter()
        .filter_map(|(e, (p, c))| match *c {
            Class::Pickup(kind) if p.0.distance(at) < PICKUP_RADIUS => Some((e, kind)),
            _ => None,
        })
        .collect();

    for (e, kind) in touched {
        world.insert_one(e, Collected).ok();
        match kind {
            PickupKind::Invincibility => fx.invincibility = 8.0,
            PickupKind::DamageBoost => fx.damage_boost = 8.0,
            _ => fx.kill = EffectTimer::new(0.2),
        }
    }
}

/// Standing in a hazard hurts about once a second.
pub fn hazards(world: &mut World, player: Entity, map: &TileMap, fx: &mut ScreenEffects, dt: f32) {
    let Ok((pos, p)) = world.query_one_mut::<(&Position, &mut Player)>(player) else {
        return;
    };
    let cell = pos.0.floor().as_ivec2();
    p.hazard_tick = (p.hazard_tick - dt).max(0.0);
    if !map.is_hazard(cell.x, cell.y) || p.z > 0.0 || fx.invincibility > 0.0 {
        return;
    }
    if p.hazard_tick <= 0.0 {
        p.hazard_tick = 1.0;
        fx.damage = EffectTimer::new(0.6);
        fx.heartbeat = EffectTimer::new(0.8);
        fx.shake = fx.shake.max(3.0);
    }
}
