use bitflags::bitflags;
use log::debug;

bitflags! {
    /// Post-processing passes, applied in declaration order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PostFx: u8 {
        /// Damage / kill / heartbeat / death overlays.
        const OVERLAYS  = 0x01;
        /// Power-up tint pulses.
        const TINTS     = 0x02;
        /// Screen-shake offset for the presenter.
        const SHAKE     = 0x04;
        const VIGNETTE  = 0x08;
        const GRADING   = 0x10;
        const SCANLINES = 0x20;
        const CHROMATIC = 0x40;
    }
}

/// Where the texture noise seed comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSeed {
    /// Same textures on every run.
    Fixed(u32),
    /// Fresh textures each session; still fixed for the rest of the process.
    Random,
}

impl TextureSeed {
    pub fn resolve(self) -> u32 {
        match self {
            TextureSeed::Fixed(s) => s,
            TextureSeed::Random => {
                let s = rand::random::<u32>();
                debug!("random texture seed {s:#010x}");
                s
            }
        }
    }
}

impl Default for TextureSeed {
    fn default() -> Self {
        TextureSeed::Fixed(0x5EED_CA57)
    }
}

/// Tunables of the software renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub texture_seed: TextureSeed,
    pub post_fx: PostFx,
    pub vignette_strength: f32,
    pub vignette_power: f32,
    /// Darken every `scanline_period`-th row.
    pub scanline_period: usize,
    pub scanline_dim: f32,
    /// Contrast gain around 50 % grey.
    pub contrast: f32,
    /// Damage-timer seconds above which chromatic aberration kicks in.
    pub chroma_threshold: f32,
    /// Channel offset in pixels at the screen corners.
    pub chroma_max_offset: f32,
    /// Floor/ceiling rows farther than this are not sampled.
    pub plane_cutoff: f32,
    /// Lights taken from bright entities and particles per frame.
    pub max_lights: usize,
    pub minimap_cell: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            texture_seed: TextureSeed::default(),
            post_fx: PostFx::all(),
            vignette_strength: 0.55,
            vignette_power: 2.2,
            scanline_period: 3,
            scanline_dim: 0.88,
            contrast: 1.08,
            chroma_threshold: 0.25,
            chroma_max_offset: 6.0,
            plane_cutoff: 24.0,
            max_lights: 8,
            minimap_cell: 4,
        }
    }
}

impl RenderConfig {
    /// No post-processing; handy for tests that compare raw shading.
    pub fn raw() -> Self {
        Self {
            post_fx: PostFx::empty(),
            ..Self::default()
        }
    }
}
