//! Procedural texture synthesis.
//!
//! Every texel is a pure function of `(material, x, y, seed)`: fractal value
//! noise over a hashed integer lattice plus a rule-based overlay per
//! material. Nothing here keeps state, so two calls with the same seed are
//! bit-identical.

use glam::Vec3;
use log::debug;

use crate::renderer::color::pack;
use crate::world::map::{MAX_MATERIAL, MaterialId};
use crate::world::texture::{TEX_SIZE, Texture, TextureBank, TextureError};

/// Names of the wall textures, indexed by `material - 1`.
pub const WALL_NAMES: [&str; MAX_MATERIAL as usize] = [
    "BRICK", "RIVETS", "CIRCUIT", "RUST", "WOOD", "SKULL", "MOSS", "DOOR",
];

/*──────────────────────────── noise ───────────────────────────────*/

/// Parameters of one fractal-noise field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    pub seed: u32,
    pub octaves: u32,
    /// Lattice cells across the texture for the first octave.
    pub period: u32,
    /// Amplitude factor between octaves.
    pub persistence: f32,
}

impl NoiseParams {
    pub fn new(seed: u32, octaves: u32, period: u32) -> Self {
        Self {
            seed,
            octaves,
            period,
            persistence: 0.5,
        }
    }
}

/// Integer avalanche hash (murmur3 finaliser) of a lattice point.
#[inline]
fn hash(x: i32, y: i32, seed: u32) -> u32 {
    let mut h = seed
        ^ (x as u32).wrapping_mul(0x27D4_EB2D)
        ^ (y as u32).wrapping_mul(0x1656_67B1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^ (h >> 16)
}

#[inline]
fn lattice(x: i32, y: i32, seed: u32) -> f32 {
    (hash(x, y, seed) >> 8) as f32 / (1u32 << 24) as f32
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Smoothstep-interpolated value noise in [0,1), tiling every `period`
/// lattice cells.
pub fn value_noise(x: f32, y: f32, period: i32, seed: u32) -> f32 {
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (smoothstep(x - x0), smoothstep(y - y0));
    let period = period.max(1);
    let ix0 = (x0 as i32).rem_euclid(period);
    let iy0 = (y0 as i32).rem_euclid(period);
    let ix1 = (ix0 + 1) % period;
    let iy1 = (iy0 + 1) % period;

    let a = lattice(ix0, iy0, seed);
    let b = lattice(ix1, iy0, seed);
    let c = lattice(ix0, iy1, seed);
    let d = lattice(ix1, iy1, seed);

    let top = a + (b - a) * fx;
    let bot = c + (d - c) * fx;
    top + (bot - top) * fy
}

/// Fractal sum of octaves at texture coordinate `(u, v) ∈ [0,1)²`,
/// normalised back to [0,1).
pub fn fbm(u: f32, v: f32, p: &NoiseParams) -> f32 {
    let mut sum = 0.0;
    let mut norm = 0.0;
    let mut amp = 1.0;
    let mut period = p.period.max(1);
    for o in 0..p.octaves.max(1) {
        let f = period as f32;
        sum += value_noise(u * f, v * f, period as i32, p.seed.wrapping_add(o * 0x9E37)) * amp;
        norm += amp;
        amp *= p.persistence;
        period *= 2;
    }
    sum / norm
}

/*──────────────────────────── textures ────────────────────────────*/

type Texel = fn(x: usize, y: usize, seed: u32) -> Vec3;

const WALL_SHADERS: [Texel; MAX_MATERIAL as usize] = [
    brick, rivets, circuit, rust, wood, skull, moss, door,
];

/// Generate the 64×64 wall texture for `material` (`1..=8`).
pub fn wall(material: MaterialId, seed: u32) -> Result<Texture, TextureError> {
    let idx = (material.clamp(1, MAX_MATERIAL) - 1) as usize;
    let salt = seed.wrapping_add(idx as u32 * 0x1000_0193);
    synth(WALL_NAMES[idx], WALL_SHADERS[idx], salt)
}

pub fn floor(seed: u32) -> Result<Texture, TextureError> {
    synth("FLOOR", floor_texel, seed ^ 0xF100_0000)
}

pub fn ceiling(seed: u32) -> Result<Texture, TextureError> {
    synth("CEILING", ceiling_texel, seed ^ 0xCE11_0000)
}

/// Build the full atlas: eight walls, then floor and ceiling.
pub fn build_bank(seed: u32) -> Result<TextureBank, TextureError> {
    let mut bank = TextureBank::new();
    for m in 1..=MAX_MATERIAL {
        bank.insert(wall(m, seed)?)?;
    }
    bank.insert(floor(seed)?)?;
    bank.insert(ceiling(seed)?)?;
    debug!("generated {} procedural textures (seed {seed:#010x})", bank.len());
    Ok(bank)
}

fn synth(name: &str, texel: Texel, seed: u32) -> Result<Texture, TextureError> {
    let mut pixels = Vec::with_capacity(TEX_SIZE * TEX_SIZE);
    for y in 0..TEX_SIZE {
        for x in 0..TEX_SIZE {
            pixels.push(pack(texel(x, y, seed)));
        }
    }
    Texture::new(name, TEX_SIZE, TEX_SIZE, pixels)
}

#[inline]
fn uv(x: usize, y: usize) -> (f32, f32) {
    (x as f32 / TEX_SIZE as f32, y as f32 / TEX_SIZE as f32)
}

#[inline]
fn noise(x: usize, y: usize, seed: u32, octaves: u32, period: u32) -> f32 {
    let (u, v) = uv(x, y);
    fbm(u, v, &NoiseParams::new(seed, octaves, period))
}

/// Offset-row brick bond with recessed mortar.
fn brick(x: usize, y: usize, seed: u32) -> Vec3 {
    const BH: usize = 16;
    const BW: usize = 32;
    let row = y / BH;
    let xo = (x + if row % 2 == 1 { BW / 2 } else { 0 }) % TEX_SIZE;
    let n = noise(x, y, seed, 4, 4);
    let mortar = y % BH < 2 || xo % BW < 2;
    if mortar {
        return Vec3::new(105.0, 100.0, 92.0) * (0.8 + 0.3 * n);
    }
    // per-brick tint so the wall does not read as one flat colour
    let brick_id = (row * 2 + xo / BW) as i32;
    let tint = 0.85 + 0.3 * lattice(brick_id, row as i32, seed);
    Vec3::new(150.0, 62.0, 45.0) * tint * (0.7 + 0.5 * n)
}

/// Steel plates with seams and corner rivets.
fn rivets(x: usize, y: usize, seed: u32) -> Vec3 {
    const PLATE: usize = 32;
    let streak = noise(x, y * 4, seed, 3, 8);
    let base = Vec3::new(112.0, 118.0, 128.0) * (0.75 + 0.4 * streak);
    let (px, py) = (x % PLATE, y % PLATE);
    if px == 0 || py == 0 {
        return base * 0.45;
    }
    if px == PLATE - 1 || py == PLATE - 1 {
        return base * 1.25;
    }
    for (cx, cy) in [(4, 4), (PLATE - 5, 4), (4, PLATE - 5), (PLATE - 5, PLATE - 5)] {
        let dx = px as f32 - cx as f32;
        let dy = py as f32 - cy as f32;
        let d2 = dx * dx + dy * dy;
        if d2 <= 4.5 {
            // lit from the top-left
            let light = 1.3 - (dx + dy) * 0.12;
            return Vec3::new(150.0, 155.0, 165.0) * light;
        }
    }
    base
}

/// Dark circuit board with traces and glowing pads.
fn circuit(x: usize, y: usize, seed: u32) -> Vec3 {
    const CELL: usize = 8;
    let n = noise(x, y, seed, 3, 8);
    let mut c = Vec3::new(18.0, 48.0, 44.0) * (0.7 + 0.6 * n);
    let (cx, cy) = ((x / CELL) as i32, (y / CELL) as i32);
    let (lx, ly) = (x % CELL, y % CELL);
    let h = hash(cx, cy, seed);
    let horizontal = h & 1 == 1 && ly == CELL / 2;
    let vertical = h & 2 == 2 && lx == CELL / 2;
    if horizontal || vertical {
        c = Vec3::new(60.0, 170.0, 90.0);
    }
    if h & 12 == 12 {
        let dx = lx as f32 - 3.5;
        let dy = ly as f32 - 3.5;
        if dx * dx + dy * dy < 3.0 {
            c = Vec3::new(120.0, 255.0, 140.0);
        }
    }
    c
}

/// Painted metal eaten by rust blotches.
fn rust(x: usize, y: usize, seed: u32) -> Vec3 {
    let grain = noise(x, y, seed, 4, 8);
    let blotch = noise(x, y, seed ^ 0x5151, 3, 2);
    let paint = Vec3::new(70.0, 88.0, 96.0) * (0.8 + 0.3 * grain);
    let rust = Vec3::new(140.0, 70.0, 30.0) * (0.6 + 0.7 * grain);
    let t = ((blotch - 0.45) * 6.0).clamp(0.0, 1.0);
    paint.lerp(rust, t)
}

/// Horizontal planks with warped growth rings.
fn wood(x: usize, y: usize, seed: u32) -> Vec3 {
    const PLANK: usize = 16;
    if y % PLANK == 0 {
        return Vec3::new(40.0, 24.0, 12.0);
    }
    let warp = noise(x, y, seed, 3, 4) * 18.0;
    let plank = (y / PLANK) as f32 * 7.3;
    let rings = ((y as f32 + warp + plank) * 0.9).sin() * 0.5 + 0.5;
    let fine = noise(x, y * 6, seed ^ 0xAB, 2, 16);
    Vec3::new(120.0, 74.0, 38.0) * (0.7 + 0.25 * rings + 0.15 * fine)
}

/// Stone block with a carved skull in the middle.
fn skull(x: usize, y: usize, seed: u32) -> Vec3 {
    let n = noise(x, y, seed, 4, 4);
    let stone = Vec3::splat(96.0) * (0.7 + 0.5 * n);
    let (fx, fy) = (x as f32 - 31.5, y as f32 - 28.0);

    // cranium + jaw silhouette
    let cranium = fx * fx + fy * fy < 14.0 * 14.0;
    let jaw = fx.abs() < 8.0 && (10.0..20.0).contains(&fy);
    if !(cranium || jaw) {
        // frame around the carving
        if x < 3 || y < 3 || x >= TEX_SIZE - 3 || y >= TEX_SIZE - 3 {
            return stone * 0.6;
        }
        return stone;
    }
    let bone = Vec3::new(200.0, 190.0, 160.0) * (0.8 + 0.3 * n);
    let eye = |ex: f32| {
        let dx = fx - ex;
        let dy = fy + 1.0;
        dx * dx + dy * dy < 16.0
    };
    if eye(-5.5) || eye(5.5) {
        return Vec3::new(20.0, 10.0, 10.0);
    }
    // nose wedge
    if (3.0..7.0).contains(&fy) && fx.abs() < (fy - 3.0) * 0.6 + 0.5 {
        return Vec3::new(30.0, 20.0, 20.0);
    }
    // teeth gaps
    if jaw && fy > 13.0 && (x % 3 == 0) {
        return bone * 0.4;
    }
    bone
}

/// Cobbles with moss creeping in from the noise field.
fn moss(x: usize, y: usize, seed: u32) -> Vec3 {
    const CELL: usize = 16;
    let (cx, cy) = (x / CELL, y / CELL);
    let jitter = lattice(cx as i32, cy as i32, seed);
    let (lx, ly) = (x % CELL, y % CELL);
    let edge = lx.min(ly).min(CELL - 1 - lx).min(CELL - 1 - ly);
    let n = noise(x, y, seed, 4, 8);
    let mut c = Vec3::splat(85.0 + 40.0 * jitter) * (0.7 + 0.4 * n);
    if edge == 0 {
        c *= 0.4;
    } else if edge == 1 {
        c *= 0.75;
    }
    let growth = noise(x, y, seed ^ 0x3C3C, 3, 4);
    let t = ((growth - 0.5) * 5.0).clamp(0.0, 1.0);
    c.lerp(Vec3::new(50.0, 110.0, 40.0) * (0.6 + 0.6 * n), t)
}

/// Framed metal door with a hazard-striped band.
fn door(x: usize, y: usize, seed: u32) -> Vec3 {
    let n = noise(x, y, seed, 3, 8);
    let frame = x < 4 || x >= TEX_SIZE - 4 || y < 4 || y >= TEX_SIZE - 4;
    if frame {
        return Vec3::new(70.0, 70.0, 76.0) * (0.8 + 0.3 * n);
    }
    if (28..36).contains(&y) {
        let stripe = ((x + y) / 6) % 2 == 0;
        return if stripe {
            Vec3::new(220.0, 180.0, 30.0)
        } else {
            Vec3::new(25.0, 25.0, 25.0)
        };
    }
    // handle
    if (50..55).contains(&x) && (38..44).contains(&y) {
        return Vec3::new(190.0, 190.0, 200.0);
    }
    Vec3::new(100.0, 104.0, 112.0) * (0.75 + 0.35 * n)
}

/// Worn stone slabs with grout lines.
fn floor_texel(x: usize, y: usize, seed: u32) -> Vec3 {
    const SLAB: usize = 32;
    let n = noise(x, y, seed, 5, 4);
    if x % SLAB == 0 || y % SLAB == 0 {
        return Vec3::new(45.0, 42.0, 40.0);
    }
    let slab = lattice((x / SLAB) as i32, (y / SLAB) as i32, seed);
    Vec3::new(92.0, 86.0, 78.0) * (0.75 + 0.2 * slab + 0.35 * n)
}

/// Dark ceiling panels with a faint lit seam.
fn ceiling_texel(x: usize, y: usize, seed: u32) -> Vec3 {
    const PANEL: usize = 16;
    let n = noise(x, y, seed, 3, 4);
    if x % PANEL == 0 || y % PANEL == 0 {
        return Vec3::new(26.0, 26.0, 30.0);
    }
    if y % PANEL == 1 {
        return Vec3::new(70.0, 70.0, 78.0);
    }
    Vec3::new(48.0, 48.0, 54.0) * (0.8 + 0.4 * n)
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::texture::{CEILING_TEXTURE, FLOOR_TEXTURE};

    #[test]
    fn generation_is_bit_identical() {
        for m in 1..=MAX_MATERIAL {
            assert_eq!(wall(m, 42), wall(m, 42), "material {m} not deterministic");
        }
        assert_eq!(floor(7), floor(7));
        assert_eq!(ceiling(7), ceiling(7));
    }

    #[test]
    fn seed_changes_output() {
        assert_ne!(wall(1, 1).unwrap().pixels(), wall(1, 2).unwrap().pixels());
    }

    #[test]
    fn materials_differ() {
        assert_ne!(wall(1, 9).unwrap().pixels(), wall(2, 9).unwrap().pixels());
    }

    #[test]
    fn value_noise_in_unit_range_and_tiles() {
        for i in 0..200 {
            let x = i as f32 * 0.37;
            let y = i as f32 * 0.11;
            let v = value_noise(x, y, 4, 3);
            assert!((0.0..1.0).contains(&v), "noise {v} out of range");
            // period 4 → shifting by 4 cells lands on the same value
            assert!((v - value_noise(x + 4.0, y, 4, 3)).abs() < 1e-3);
        }
    }

    #[test]
    fn fbm_is_normalised() {
        let p = NoiseParams::new(11, 5, 4);
        for i in 0..64 {
            let f = fbm(i as f32 / 64.0, 0.3, &p);
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn bank_layout() {
        let bank = build_bank(5).unwrap();
        assert_eq!(bank.len(), 10);
        assert_eq!(bank.id("BRICK"), Some(0));
        assert_eq!(bank.id("DOOR"), Some(7));
        assert_eq!(bank.id("FLOOR"), Some(FLOOR_TEXTURE));
        assert_eq!(bank.id("CEILING"), Some(CEILING_TEXTURE));
        for id in 0..bank.len() as u16 {
            let t = bank.texture(id).unwrap();
            assert_eq!((t.width(), t.height()), (TEX_SIZE, TEX_SIZE));
            assert!(t.pixels().iter().all(|p| p >> 24 == 0xFF), "texels must be opaque");
        }
    }
}
