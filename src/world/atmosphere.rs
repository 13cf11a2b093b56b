use glam::Vec3;

use crate::renderer::{Rgba, color::rgb};

/// Level-wide fog / ambient settings, fixed when a stage loads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelAtmosphere {
    pub fog_color: Rgba,
    /// Fog added per map unit of distance.
    pub fog_density: f32,
    /// Fog already present at distance 0.
    pub fog_base: f32,
    /// Upper bound of the blend factor below `fog_cutoff`.
    pub max_fog: f32,
    /// Beyond this distance a surface is replaced by the fog colour.
    pub fog_cutoff: f32,
    /// Per-channel multiplier applied to every texel (1,1,1 = neutral).
    pub ambient: Vec3,
    /// 0 = steady light, 1 = heavy flicker.
    pub flicker: f32,
}

impl Default for LevelAtmosphere {
    fn default() -> Self {
        Self {
            fog_color: rgb(20, 18, 24),
            fog_density: 0.045,
            fog_base: 0.05,
            max_fog: 0.85,
            fog_cutoff: 24.0,
            ambient: Vec3::ONE,
            flicker: 0.0,
        }
    }
}

impl LevelAtmosphere {
    /// Fog and ambient disabled; shading only applies lights and side shade.
    pub fn clear() -> Self {
        Self {
            fog_density: 0.0,
            fog_base: 0.0,
            max_fog: 0.0,
            fog_cutoff: f32::INFINITY,
            ..Self::default()
        }
    }

    /// Thick blue-grey fog, cold ambient, flickering torches.
    pub fn crypt() -> Self {
        Self {
            fog_color: rgb(14, 16, 26),
            fog_density: 0.08,
            fog_base: 0.1,
            max_fog: 0.9,
            fog_cutoff: 16.0,
            ambient: Vec3::new(0.8, 0.85, 1.0),
            flicker: 0.35,
        }
    }

    /// Sickly green haze.
    pub fn toxic() -> Self {
        Self {
            fog_color: rgb(24, 40, 18),
            fog_density: 0.06,
            fog_base: 0.08,
            max_fog: 0.88,
            fog_cutoff: 20.0,
            ambient: Vec3::new(0.85, 1.05, 0.8),
            flicker: 0.1,
        }
    }
}
