//! Procedural sprite shaders.
//!
//! Every dynamic thing is drawn by a plain function from normalised local
//! coordinates to an optional colour; nothing is sampled from a bitmap.
//! Functions are looked up by [`ShaderKey`] in a [`ShaderRegistry`], so a new
//! kind of entity only needs a new function and a `register` call.
//!
//! Local coordinates: `u` grows right, `v` grows down, both roughly in
//! `-0.5..0.5` across the sprite's bounding box.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use glam::Vec3;
use once_cell::sync::Lazy;

use crate::renderer::{
    Rgba,
    color::{lerp, pack, rgb, scale},
};
use crate::world::{BodyPartKind, EnemyKind, PickupKind, ProjectileKind, WeaponKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderKey {
    Enemy(EnemyKind),
    Pickup(PickupKind),
    Projectile(ProjectileKind),
    Bomb,
    BodyPart(BodyPartKind),
    Particle,
    Weapon(WeaponKind),
    /// Free slot for shaders registered by the embedding game.
    Custom(u16),
}

/// Kind-specific visual sub-state forwarded to the shader.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShaderParams {
    /// Hurt flash left, 0‥1.
    pub hurt: f32,
    pub stunned: bool,
    pub dead: bool,
    /// Walk / bob / wobble phase in radians.
    pub phase: f32,
    pub rotation: f32,
    /// Remaining life or fuse in seconds.
    pub life: f32,
    /// Base colour for tinted shaders (particles).
    pub tint: Rgba,
    pub swap: f32,
    pub recoil: f32,
    pub firing: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct ShaderInput {
    pub u: f32,
    pub v: f32,
    pub time: f32,
    pub p: ShaderParams,
}

/// `None` = transparent.
pub type ShaderFn = fn(&ShaderInput) -> Option<Rgba>;

#[derive(Clone, Default)]
pub struct ShaderRegistry {
    map: HashMap<ShaderKey, ShaderFn>,
}

static BUILTIN: Lazy<ShaderRegistry> = Lazy::new(|| {
    let mut r = ShaderRegistry::default();
    r.register(ShaderKey::Enemy(EnemyKind::Grunt), grunt);
    r.register(ShaderKey::Enemy(EnemyKind::Stalker), stalker);
    r.register(ShaderKey::Enemy(EnemyKind::Brute), brute);
    r.register(ShaderKey::Enemy(EnemyKind::Wraith), wraith);

    r.register(ShaderKey::Pickup(PickupKind::Health), health);
    r.register(ShaderKey::Pickup(PickupKind::Ammo), ammo);
    r.register(ShaderKey::Pickup(PickupKind::Armor), armor);
    r.register(ShaderKey::Pickup(PickupKind::Key), key);
    r.register(ShaderKey::Pickup(PickupKind::Invincibility), invincibility);
    r.register(ShaderKey::Pickup(PickupKind::DamageBoost), damage_boost);

    r.register(ShaderKey::Projectile(ProjectileKind::Plasma), plasma_bolt);
    r.register(ShaderKey::Projectile(ProjectileKind::Fireball), fireball);
    r.register(ShaderKey::Bomb, bomb);

    r.register(ShaderKey::BodyPart(BodyPartKind::Head), gib_head);
    r.register(ShaderKey::BodyPart(BodyPartKind::Limb), gib_limb);
    r.register(ShaderKey::BodyPart(BodyPartKind::Chunk), gib_chunk);
    r.register(ShaderKey::Particle, particle);

    r.register(ShaderKey::Weapon(WeaponKind::Pistol), pistol);
    r.register(ShaderKey::Weapon(WeaponKind::Shotgun), shotgun);
    r.register(ShaderKey::Weapon(WeaponKind::Plasma), plasma_rifle);
    r
});

impl ShaderRegistry {
    /// Registry pre-filled with every built-in kind.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Add or replace the shader for `key`, returning the previous one.
    pub fn register(&mut self, key: ShaderKey, f: ShaderFn) -> Option<ShaderFn> {
        self.map.insert(key, f)
    }

    #[inline]
    pub fn get(&self, key: ShaderKey) -> Option<ShaderFn> {
        self.map.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/*──────────────────────── shape helpers ────────────────────────────*/

#[inline(always)]
fn circle(u: f32, v: f32, cx: f32, cy: f32, r: f32) -> bool {
    let (dx, dy) = (u - cx, v - cy);
    dx * dx + dy * dy < r * r
}

#[inline(always)]
fn ellipse(u: f32, v: f32, cx: f32, cy: f32, rx: f32, ry: f32) -> bool {
    let (dx, dy) = ((u - cx) / rx, (v - cy) / ry);
    dx * dx + dy * dy < 1.0
}

#[inline(always)]
fn rect(u: f32, v: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
    u >= x0 && u < x1 && v >= y0 && v < y1
}

/// Inside the circle sector spanning angles `a0..a1` (radians, atan2 of v/u).
#[inline(always)]
fn wedge(u: f32, v: f32, cx: f32, cy: f32, r: f32, a0: f32, a1: f32) -> bool {
    if !circle(u, v, cx, cy, r) {
        return false;
    }
    let a = (v - cy).atan2(u - cx);
    let a = (a - a0).rem_euclid(TAU);
    a <= (a1 - a0).rem_euclid(TAU)
}

#[inline(always)]
fn rotate(u: f32, v: f32, a: f32) -> (f32, f32) {
    let (s, c) = a.sin_cos();
    (u * c - v * s, u * s + v * c)
}

#[inline(always)]
fn radius(u: f32, v: f32) -> f32 {
    (u * u + v * v).sqrt()
}

/// Blend toward white while the hurt timer runs.
#[inline]
fn hurt_flash(c: Rgba, p: &ShaderParams) -> Rgba {
    if p.hurt > 0.0 {
        lerp(c, rgb(255, 255, 255), (p.hurt * 1.5).min(0.8))
    } else {
        c
    }
}

/// Radial glow: bright core fading to `edge` at radius `r`.
#[inline]
fn glow(u: f32, v: f32, r: f32, core: Vec3, edge: Vec3) -> Option<Rgba> {
    let d = radius(u, v) / r;
    if d >= 1.0 {
        return None;
    }
    Some(pack(core.lerp(edge, d * d)))
}

/// Three small stars orbiting above the head of a stunned enemy.
#[inline]
fn stun_stars(i: &ShaderInput, head_y: f32) -> Option<Rgba> {
    if !i.p.stunned {
        return None;
    }
    for k in 0..3 {
        let a = i.time * 6.0 + k as f32 * TAU / 3.0;
        let (sx, sy) = (a.cos() * 0.16, head_y - 0.12 + a.sin() * 0.04);
        if circle(i.u, i.v, sx, sy, 0.03) {
            return Some(rgb(255, 230, 80));
        }
    }
    None
}

/// Body sprawled in a pool, used for every dead enemy.
fn corpse(i: &ShaderInput, body: Rgba) -> Option<Rgba> {
    let (u, v) = (i.u, i.v);
    if ellipse(u, v, -0.3, 0.05, 0.1, 0.18) {
        return Some(scale(body, 1.1));
    }
    if ellipse(u, v, 0.05, 0.1, 0.32, 0.2) {
        return Some(scale(body, 0.85));
    }
    if ellipse(u, v, 0.0, 0.28, 0.48, 0.18) {
        return Some(rgb(110, 10, 12));
    }
    None
}

/*──────────────────────── enemies ──────────────────────────────────*/

fn grunt(i: &ShaderInput) -> Option<Rgba> {
    const UNIFORM: Rgba = rgb(92, 104, 60);
    if i.p.dead {
        return corpse(i, UNIFORM);
    }
    let (u, v) = (i.u, i.v);
    if let Some(c) = stun_stars(i, -0.34) {
        return Some(c);
    }
    let stride = i.p.phase.sin() * 0.06;
    let c = if circle(u, v, 0.0, -0.32, 0.1) {
        if circle(u, v, -0.04, -0.33, 0.02) || circle(u, v, 0.04, -0.33, 0.02) {
            rgb(255, 40, 30)
        } else if v < -0.36 {
            rgb(60, 70, 40) // helmet
        } else {
            rgb(186, 146, 112)
        }
    } else if rect(u, v, -0.15, -0.22, 0.15, 0.12) {
        if rect(u, v, -0.15, 0.04, 0.15, 0.07) {
            rgb(50, 40, 30) // belt
        } else {
            UNIFORM
        }
    } else if rect(u, v, -0.22, -0.2, -0.15, 0.08 + stride)
        || rect(u, v, 0.15, -0.2, 0.22, 0.08 - stride)
    {
        scale(UNIFORM, 0.8)
    } else if rect(u, v, 0.1, -0.05, 0.32, 0.0) {
        rgb(40, 40, 44) // rifle
    } else if rect(u, v, -0.13, 0.12, -0.02, 0.5 + stride.min(0.0))
        || rect(u, v, 0.02, 0.12, 0.13, 0.5 - stride.max(0.0))
    {
        rgb(54, 58, 40)
    } else {
        return None;
    };
    Some(hurt_flash(c, &i.p))
}

fn stalker(i: &ShaderInput) -> Option<Rgba> {
    const HIDE: Rgba = rgb(40, 36, 48);
    if i.p.dead {
        return corpse(i, HIDE);
    }
    let (u, v) = (i.u, i.v);
    if let Some(c) = stun_stars(i, -0.2) {
        return Some(c);
    }
    let lean = (i.p.phase * 0.5).sin() * 0.03;
    let c = if circle(u, v, lean, -0.2, 0.11) {
        if circle(u, v, lean - 0.045, -0.21, 0.022) || circle(u, v, lean + 0.045, -0.21, 0.022) {
            rgb(120, 255, 90)
        } else {
            scale(HIDE, 1.2)
        }
    } else if ellipse(u, v, lean * 0.5, 0.05, 0.16, 0.2) {
        HIDE
    } else if wedge(u, v, -0.18, 0.0, 0.22, PI * 0.45, PI * 0.6)
        || wedge(u, v, 0.18, 0.0, 0.22, PI * 0.4, PI * 0.55)
    {
        rgb(200, 200, 190) // claws
    } else if rect(u, v, -0.1, 0.2, -0.04, 0.5) || rect(u, v, 0.04, 0.2, 0.1, 0.5) {
        scale(HIDE, 0.8)
    } else {
        return None;
    };
    Some(hurt_flash(c, &i.p))
}

fn brute(i: &ShaderInput) -> Option<Rgba> {
    const SKIN: Rgba = rgb(150, 50, 40);
    if i.p.dead {
        return corpse(i, SKIN);
    }
    let (u, v) = (i.u, i.v);
    if let Some(c) = stun_stars(i, -0.3) {
        return Some(c);
    }
    let breathe = (i.time * 2.0 + i.p.phase).sin() * 0.01;
    let c = if wedge(u, v, -0.1, -0.32, 0.14, PI * 1.1, PI * 1.3)
        || wedge(u, v, 0.1, -0.32, 0.14, PI * 1.7, PI * 1.9)
    {
        rgb(230, 220, 190) // horns
    } else if circle(u, v, 0.0, -0.28, 0.1) {
        if rect(u, v, -0.06, -0.3, 0.06, -0.27) {
            rgb(255, 200, 40)
        } else {
            scale(SKIN, 1.15)
        }
    } else if ellipse(u, v, 0.0, -0.02, 0.3 + breathe, 0.22) {
        if rect(u, v, -0.05, -0.12, 0.05, 0.1) {
            scale(SKIN, 0.75)
        } else {
            SKIN
        }
    } else if circle(u, v, -0.32, 0.12, 0.09) || circle(u, v, 0.32, 0.12, 0.09) {
        scale(SKIN, 0.9) // fists
    } else if rect(u, v, -0.2, 0.18, -0.04, 0.5) || rect(u, v, 0.04, 0.18, 0.2, 0.5) {
        rgb(70, 40, 30)
    } else {
        return None;
    };
    Some(hurt_flash(c, &i.p))
}

fn wraith(i: &ShaderInput) -> Option<Rgba> {
    const ECTO: Vec3 = Vec3::new(150.0, 190.0, 230.0);
    if i.p.dead {
        // dissolves into a fading puddle of light
        return ellipse(i.u, i.v, 0.0, 0.3, 0.4, 0.12).then(|| rgb(90, 120, 170));
    }
    let (u, v) = (i.u, i.v);
    if let Some(c) = stun_stars(i, -0.3) {
        return Some(c);
    }
    let hem = 0.38 + (u * 22.0 + i.time * 5.0).sin() * 0.05;
    if v > hem || !ellipse(u, v, 0.0, 0.0, 0.3, 0.48) {
        return None;
    }
    // dithered translucency
    if ((u * 90.0).sin() * (v * 90.0).sin()) > 0.55 {
        return None;
    }
    if circle(u, v, -0.09, -0.18, 0.05) || circle(u, v, 0.09, -0.18, 0.05) {
        return Some(rgb(10, 10, 30));
    }
    if ellipse(u, v, 0.0, -0.02, 0.06, 0.09 + (i.time * 3.0).sin().abs() * 0.03) {
        return Some(rgb(20, 20, 40));
    }
    let shade = 1.0 - radius(u, v) * 0.8;
    Some(hurt_flash(pack(ECTO * shade.max(0.3)), &i.p))
}

/*──────────────────────── pickups ──────────────────────────────────*/

fn health(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = (i.u, i.v);
    if !rect(u, v, -0.38, -0.3, 0.38, 0.38) {
        return None;
    }
    let cross = rect(u, v, -0.08, -0.22, 0.08, 0.3) || rect(u, v, -0.26, -0.04, 0.26, 0.12);
    if cross {
        let pulse = 0.85 + 0.15 * (i.time * 4.0).sin();
        return Some(pack(Vec3::new(235.0, 30.0, 30.0) * pulse));
    }
    if !rect(u, v, -0.34, -0.26, 0.34, 0.34) {
        return Some(rgb(170, 170, 170));
    }
    Some(rgb(235, 235, 230))
}

fn ammo(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = (i.u, i.v);
    for k in 0..3 {
        let cx = -0.22 + k as f32 * 0.22;
        if circle(u, v, cx, -0.12, 0.07) && v < -0.12 {
            return Some(rgb(200, 120, 60)); // copper tip
        }
        if rect(u, v, cx - 0.07, -0.12, cx + 0.07, 0.3) {
            let shine = 1.0 - ((u - cx) / 0.07).abs() * 0.4;
            return Some(pack(Vec3::new(210.0, 170.0, 70.0) * shine));
        }
    }
    rect(u, v, -0.34, 0.3, 0.34, 0.4).then(|| rgb(70, 60, 40))
}

fn armor(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = (i.u, i.v);
    if !rect(u, v, -0.32, -0.3, 0.32, 0.38) {
        return None;
    }
    // neck cut-out and arm holes
    if wedge(u, v, 0.0, -0.3, 0.16, 0.0, PI)
        || circle(u, v, -0.34, -0.12, 0.1)
        || circle(u, v, 0.34, -0.12, 0.1)
    {
        return None;
    }
    let plate = ((v + 0.3) * 12.0).floor() as i32 % 2 == 0;
    let base = if plate {
        rgb(60, 170, 80)
    } else {
        rgb(40, 130, 60)
    };
    let sheen = ((i.time * 2.0 + u * 6.0).sin() * 0.5 + 0.5).powi(6) * 0.4;
    Some(lerp(base, rgb(220, 255, 220), sheen))
}

fn key(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = rotate(i.u, i.v, (i.time * 1.5).sin() * 0.3);
    const GOLD: Rgba = rgb(240, 200, 50);
    if circle(u, v, 0.0, -0.2, 0.16) && !circle(u, v, 0.0, -0.2, 0.08) {
        return Some(GOLD);
    }
    if rect(u, v, -0.035, -0.06, 0.035, 0.36) {
        return Some(scale(GOLD, 0.9));
    }
    if rect(u, v, 0.035, 0.18, 0.12, 0.23) || rect(u, v, 0.035, 0.28, 0.1, 0.33) {
        return Some(scale(GOLD, 0.8));
    }
    None
}

fn invincibility(i: &ShaderInput) -> Option<Rgba> {
    let pulse = 0.32 + (i.time * 5.0).sin() * 0.04;
    let r = radius(i.u, i.v);
    if (pulse - 0.03..pulse).contains(&r) {
        return Some(rgb(150, 250, 255));
    }
    glow(i.u, i.v, 0.26, Vec3::new(230.0, 255.0, 255.0), Vec3::new(20.0, 160.0, 220.0))
}

fn damage_boost(i: &ShaderInput) -> Option<Rgba> {
    let spin = i.time * 2.0;
    for k in 0..6 {
        let a = spin + k as f32 * TAU / 6.0;
        if wedge(i.u, i.v, 0.0, 0.0, 0.42, a - 0.12, a + 0.12) && radius(i.u, i.v) > 0.2 {
            return Some(rgb(160, 20, 20));
        }
    }
    glow(i.u, i.v, 0.24, Vec3::new(255.0, 200.0, 160.0), Vec3::new(200.0, 20.0, 10.0))
}

/*──────────────────────── projectiles ──────────────────────────────*/

fn plasma_bolt(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = rotate(i.u, i.v, i.p.rotation);
    let swirl = (v.atan2(u) * 3.0 + i.time * 12.0).sin() * 0.06;
    glow(u, v, 0.42 + swirl, Vec3::new(240.0, 250.0, 255.0), Vec3::new(40.0, 90.0, 255.0))
}

fn fireball(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = rotate(i.u, i.v, i.p.rotation);
    let core = Vec3::new(255.0, 250.0, 200.0);
    if let Some(c) = glow(u, v, 0.3, core, Vec3::new(255.0, 120.0, 20.0)) {
        return Some(c);
    }
    for k in 0..5 {
        let a = k as f32 * TAU / 5.0 + (i.time * 9.0 + k as f32).sin() * 0.3;
        if wedge(u, v, 0.0, 0.0, 0.48, a - 0.2, a + 0.2) {
            return Some(rgb(240, 80, 10));
        }
    }
    None
}

fn bomb(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = (i.u, i.v);
    // spark blinks faster as the fuse burns down
    let rate = 4.0 + 20.0 / (i.p.life + 0.2);
    if (i.time * rate).sin() > 0.0 && circle(u, v, 0.14, -0.42, 0.06) {
        return Some(rgb(255, 220, 80));
    }
    let (fu, fv) = rotate(u - 0.06, v + 0.3, i.p.rotation * 0.2);
    if rect(fu, fv, -0.02, -0.1, 0.02, 0.05) {
        return Some(rgb(150, 120, 80));
    }
    if circle(u, v, 0.0, 0.05, 0.34) {
        if circle(u, v, -0.1, -0.06, 0.07) {
            return Some(rgb(140, 140, 160));
        }
        let band = (rotate(u, v, i.p.rotation).0 * 10.0).sin() > 0.9;
        return Some(if band { rgb(70, 20, 20) } else { rgb(34, 34, 40) });
    }
    None
}

/*──────────────────────── body parts ───────────────────────────────*/

fn gib_head(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = rotate(i.u, i.v, i.p.rotation);
    if !circle(u, v, 0.0, 0.0, 0.36) {
        return None;
    }
    if circle(u, v, -0.12, -0.05, 0.06) || circle(u, v, 0.12, -0.05, 0.06) {
        return Some(rgb(30, 10, 10));
    }
    if v > 0.2 {
        return Some(rgb(140, 10, 10));
    }
    Some(rgb(180, 140, 110))
}

fn gib_limb(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = rotate(i.u, i.v, i.p.rotation);
    if rect(u, v, -0.4, -0.1, 0.3, 0.1) {
        return Some(rgb(175, 135, 105));
    }
    circle(u, v, 0.32, 0.0, 0.14).then(|| rgb(150, 15, 15))
}

fn gib_chunk(i: &ShaderInput) -> Option<Rgba> {
    let (u, v) = rotate(i.u, i.v, i.p.rotation);
    let a = v.atan2(u);
    let r = 0.3 + (a * 5.0).sin() * 0.06 + (a * 3.0 + 1.0).cos() * 0.05;
    if radius(u, v) >= r {
        return None;
    }
    Some(if (a * 7.0).sin() > 0.6 {
        rgb(220, 200, 190)
    } else {
        rgb(130, 15, 20)
    })
}

fn particle(i: &ShaderInput) -> Option<Rgba> {
    (i.u.abs() < 0.5 && i.v.abs() < 0.5).then_some(i.p.tint)
}

/*──────────────────────── weapons ──────────────────────────────────*/
// The weapon box spans the lower-centre of the screen; v = 0.5 is its bottom.

/// Star-shaped muzzle flash centred at `(cx, cy)`.
#[inline]
fn muzzle(i: &ShaderInput, cx: f32, cy: f32) -> Option<Rgba> {
    if !i.p.firing {
        return None;
    }
    for k in 0..8 {
        let a = k as f32 * TAU / 8.0 + i.time * 30.0;
        if wedge(i.u, i.v, cx, cy, 0.16, a - 0.15, a + 0.15) {
            return Some(rgb(255, 230, 140));
        }
    }
    let (u, v) = (i.u - cx, i.v - cy);
    glow(u, v, 0.08, Vec3::splat(255.0), Vec3::new(255.0, 170.0, 40.0))
}

fn pistol(i: &ShaderInput) -> Option<Rgba> {
    if let Some(c) = muzzle(i, 0.0, -0.22) {
        return Some(c);
    }
    let (u, v) = (i.u, i.v);
    if rect(u, v, -0.07, -0.12, 0.07, 0.25) {
        let edge = ((u / 0.07).abs() > 0.8) as i32 as f32;
        return Some(scale(rgb(70, 72, 80), 1.0 - edge * 0.3));
    }
    if rect(u, v, -0.09, 0.2, 0.09, 0.5) {
        return Some(rgb(40, 34, 30)); // grip
    }
    if ellipse(u, v, 0.0, 0.45, 0.2, 0.1) {
        return Some(rgb(190, 150, 120)); // hand
    }
    None
}

fn shotgun(i: &ShaderInput) -> Option<Rgba> {
    if let Some(c) = muzzle(i, 0.0, -0.32) {
        return Some(c);
    }
    let (u, v) = (i.u, i.v);
    if rect(u, v, -0.09, -0.24, -0.005, 0.2) || rect(u, v, 0.005, -0.24, 0.09, 0.2) {
        let bore = circle(u, v, -0.047, -0.22, 0.025) || circle(u, v, 0.047, -0.22, 0.025);
        return Some(if bore { rgb(10, 10, 10) } else { rgb(60, 62, 70) });
    }
    if rect(u, v, -0.12, 0.05, 0.12, 0.18) {
        return Some(rgb(110, 70, 35)); // pump
    }
    if rect(u, v, -0.14, 0.2, 0.14, 0.5) {
        let grain = ((v * 60.0 + u * 8.0).sin() * 0.5 + 0.5) * 0.2;
        return Some(scale(rgb(120, 78, 40), 0.9 + grain));
    }
    None
}

fn plasma_rifle(i: &ShaderInput) -> Option<Rgba> {
    if let Some(c) = muzzle(i, 0.0, -0.3) {
        return Some(c);
    }
    let (u, v) = (i.u, i.v);
    if rect(u, v, -0.05, -0.28, 0.05, -0.05) {
        return Some(rgb(80, 90, 100));
    }
    if rect(u, v, -0.13, -0.05, 0.13, 0.5) {
        // glowing coil band
        if (v * 40.0 - i.time * 10.0).sin() > 0.6 && u.abs() < 0.1 {
            let k = 0.7 + 0.3 * (i.time * 6.0).sin();
            return Some(pack(Vec3::new(80.0, 230.0, 255.0) * k));
        }
        return Some(rgb(40, 70, 80));
    }
    None
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
