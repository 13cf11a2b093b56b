//! Transient point lights, ambient, flicker and distance fog.
//!
//! Lights live for exactly one frame: [`collect_lights`] rebuilds the list
//! from the scene, the three drawers read it through [`Shading`].

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::renderer::{
    Rgba, Scene,
    color::{pack, unpack},
};
use crate::world::LevelAtmosphere;

/// Lights farther than this (squared, map units) contribute nothing.
pub const LIGHT_RADIUS_SQ: f32 = 16.0;
/// Channel value a unit-intensity light adds at distance 0.
const LIGHT_GAIN: f32 = 170.0;
/// A glow colour needs one channel at least this bright to cast light.
const BRIGHT_CHANNEL: f32 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub pos: Vec2,
    /// Per-channel weights in 0‥1.
    pub color: Vec3,
    pub intensity: f32,
}

pub type Lights = SmallVec<[LightSource; 12]>;

/// Split a colour into light weights if it is bright enough to glow.
pub fn classify_glow(c: Rgba) -> Option<Vec3> {
    let v = unpack(c);
    let peak = v.max_element();
    if peak < BRIGHT_CHANNEL {
        return None;
    }
    Some(v / peak)
}

/// Muzzle flash first, then the `max` nearest glowing entities/particles.
pub fn collect_lights(scene: &Scene<'_>, max: usize) -> Lights {
    let mut lights = Lights::new();
    let cam = scene.camera;

    if scene.muzzle_flash > 0.0 {
        lights.push(LightSource {
            pos: cam.pos + cam.forward() * 0.6,
            color: Vec3::new(1.0, 0.8, 0.45),
            intensity: 1.6 * scene.muzzle_flash,
        });
    }

    let mut glowing: SmallVec<[(f32, LightSource); 32]> = SmallVec::new();
    let entities = scene.entities.iter().filter_map(|e| {
        let color = classify_glow(e.glow()?)?;
        Some((e.pos(), color, 0.9))
    });
    let particles = scene.particles.iter().filter(|p| p.life > 0.0).filter_map(|p| {
        let color = classify_glow(p.color)?;
        Some((p.pos, color, 0.35))
    });
    for (pos, color, intensity) in entities.chain(particles) {
        let d2 = (pos - cam.pos).length_squared();
        glowing.push((
            d2,
            LightSource {
                pos,
                color,
                intensity,
            },
        ));
    }
    glowing.sort_by(|a, b| a.0.total_cmp(&b.0));
    lights.extend(glowing.into_iter().take(max).map(|(_, l)| l));
    lights
}

/// Shared per-frame flicker multiplier in `[1 - amount, 1]`.
pub fn flicker_scalar(amount: f32, time: f32) -> f32 {
    if amount <= 0.0 {
        return 1.0;
    }
    let s = (time * 11.0).sin() * (time * 3.7 + 0.6).sin();
    1.0 - amount * 0.5 * (1.0 - s)
}

/// Lighting terms that are constant across one wall column or sprite.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    light: Vec3,
    fog: f32,
    fully_fogged: bool,
}

/// Per-frame shading state read by every drawer.
pub struct Shading<'a> {
    atmo: &'a LevelAtmosphere,
    lights: &'a [LightSource],
    flicker: f32,
    fog_color: Vec3,
}

impl<'a> Shading<'a> {
    pub fn new(atmo: &'a LevelAtmosphere, lights: &'a [LightSource], time: f32) -> Self {
        Self {
            atmo,
            lights,
            flicker: flicker_scalar(atmo.flicker, time),
            fog_color: unpack(atmo.fog_color),
        }
    }

    #[inline]
    pub fn flicker(&self) -> f32 {
        self.flicker
    }

    /// Blend factor toward the fog colour at `dist`.
    #[inline]
    pub fn fog_factor(&self, dist: f32) -> f32 {
        (self.atmo.fog_base + self.atmo.fog_density * dist).min(self.atmo.max_fog)
    }

    /// Summed light added at world point `p`.
    #[inline]
    pub fn light_at(&self, p: Vec2) -> Vec3 {
        let mut sum = Vec3::ZERO;
        for l in self.lights {
            let d2 = (l.pos - p).length_squared();
            if d2 > LIGHT_RADIUS_SQ {
                continue;
            }
            sum += l.color * (LIGHT_GAIN * l.intensity / (1.0 + d2));
        }
        sum
    }

    /// Precompute the light/fog terms for a point at camera distance `dist`.
    #[inline]
    pub fn surface(&self, p: Vec2, dist: f32) -> Surface {
        if dist >= self.atmo.fog_cutoff {
            return Surface {
                light: Vec3::ZERO,
                fog: 1.0,
                fully_fogged: true,
            };
        }
        Surface {
            light: self.light_at(p),
            fog: self.fog_factor(dist),
            fully_fogged: false,
        }
    }

    /// Shade one texel: ambient × face shade, plus lights, times flicker,
    /// then toward fog. Flicker scales the lit colour only, so the fog
    /// colour stays steady and far surfaces still saturate to it.
    #[inline(always)]
    pub fn apply(&self, texel: Rgba, s: &Surface, face: f32) -> Rgba {
        if s.fully_fogged {
            return self.atmo.fog_color;
        }
        let lit = (unpack(texel) * self.atmo.ambient * face + s.light) * self.flicker;
        pack(lit.lerp(self.fog_color, s.fog))
    }

    /// One-shot helper for callers that shade a single pixel.
    #[inline]
    pub fn shade(&self, texel: Rgba, p: Vec2, dist: f32, face: f32) -> Rgba {
        self.apply(texel, &self.surface(p, dist), face)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
