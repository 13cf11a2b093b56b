use std::collections::HashSet;

use glam::{IVec2, Vec2};
use log::{debug, trace, warn};

use crate::{
    renderer::{
        RenderConfig, Renderer, Rgba, Scene,
        software::{
            lighting::{Shading, collect_lights},
            shaders::{ShaderKey, ShaderRegistry},
            sprites::VisSprite,
        },
    },
    world::{CEILING_TEXTURE, TextureBank},
};

/// Eye height stays this far inside the floor‥ceiling span (wall units from
/// mid-height).
const EYE_LIMIT: f32 = 0.45;

/// Counters for the last finished frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub wall_columns: usize,
    pub plane_rows_skipped: usize,
    pub sprites_drawn: usize,
    pub sprite_pixels: usize,
    pub lights: usize,
}

/// Projection constants shared by every drawer for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct View {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
    pub fov_scale: f32,
    /// Screen row of eye level.
    pub horizon: f32,
    /// Pixels per unit of height at depth 1.
    pub focal_y: f32,
    /// Eye height relative to mid-wall, in wall units.
    pub eye_z: f32,
}

/// The render context: every buffer a frame writes lives here.
pub struct Software {
    pub(super) config: RenderConfig,
    pub(super) scratch: Vec<Rgba>,
    pub(super) zbuffer: Vec<f32>,
    pub(super) post_scratch: Vec<Rgba>,
    /// Normalised distance of every pixel from the screen centre.
    pub(super) radial: Vec<f32>,
    pub(super) sprites: Vec<VisSprite>,
    pub(super) shaders: ShaderRegistry,
    /// Keys already reported as unregistered.
    pub(super) missing_shaders: HashSet<ShaderKey>,

    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) width_f: f32,
    pub(super) height_f: f32,
    pub(super) half_w: f32,
    pub(super) half_h: f32,

    pub(super) view: View,
    pub(super) shake: IVec2,
    pub(super) stats: FrameStats,
}

impl Default for Software {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Software {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            scratch: Vec::new(),
            zbuffer: Vec::new(),
            post_scratch: Vec::new(),
            radial: Vec::new(),
            sprites: Vec::new(),
            shaders: ShaderRegistry::builtin(),
            missing_shaders: HashSet::new(),
            width: 0,
            height: 0,
            width_f: 0.0,
            height_f: 0.0,
            half_w: 0.0,
            half_h: 0.0,
            view: View::default(),
            shake: IVec2::ZERO,
            stats: FrameStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Integer screen-shake translation the presenter should apply.
    #[inline]
    pub fn shake_offset(&self) -> IVec2 {
        self.shake
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Perpendicular wall distance per column of the last frame.
    #[inline]
    pub fn zbuffer(&self) -> &[f32] {
        &self.zbuffer
    }

    /// Sprites of the last frame in draw order (farthest first).
    #[inline]
    pub fn sprites(&self) -> &[VisSprite] {
        &self.sprites
    }

    pub fn shaders_mut(&mut self) -> &mut ShaderRegistry {
        &mut self.shaders
    }

    /// Finished frame (valid after `draw_scene`).
    #[inline]
    pub fn frame(&self) -> &[Rgba] {
        &self.scratch
    }

    fn resize(&mut self, w: usize, h: usize) {
        debug!("software renderer resized to {w}x{h}");
        self.width = w;
        self.height = h;
        self.width_f = w as f32;
        self.height_f = h as f32;
        self.half_w = self.width_f * 0.5;
        self.half_h = self.height_f * 0.5;
        self.scratch.resize(w * h, 0);
        self.post_scratch.resize(w * h, 0);
        self.zbuffer.resize(w, f32::INFINITY);

        // corners sit at 1.0
        let max_r = Vec2::new(self.half_w, self.half_h).length().max(1.0);
        self.radial.clear();
        self.radial.reserve(w * h);
        for y in 0..h {
            for x in 0..w {
                let d = Vec2::new(x as f32 + 0.5 - self.half_w, y as f32 + 0.5 - self.half_h);
                self.radial.push(d.length() / max_r);
            }
        }
    }

    fn setup_view(&mut self, scene: &Scene<'_>) {
        let cam = scene.camera;
        let cell = cam.pos.floor().as_ivec2();
        let eye_z = (cam.z_offset + scene.map.floor_height(cell.x, cell.y))
            .clamp(-EYE_LIMIT, EYE_LIMIT);
        self.view = View {
            pos: cam.pos,
            dir: cam.forward(),
            plane: cam.plane(),
            fov_scale: cam.fov_scale(),
            horizon: cam.horizon(self.height),
            focal_y: cam.focal_y(self.height),
            eye_z,
        };
    }

    /// Screen column of normalised camera-space lateral offset `x / depth`.
    #[inline(always)]
    pub(super) fn screen_x(&self, lateral_over_depth: f32) -> f32 {
        self.half_w * (1.0 + lateral_over_depth)
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.resize(w, h);
        }
        self.scratch.fill(0xFF_000000);
        self.zbuffer.fill(f32::INFINITY);
        self.sprites.clear();
        self.shake = IVec2::ZERO;
        self.stats = FrameStats::default();
    }

    fn draw_scene(&mut self, scene: &Scene<'_>, bank: &TextureBank) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        // bank ids are dense, so the ceiling slot implies every wall slot
        if bank.texture(CEILING_TEXTURE).is_err() {
            warn!("texture bank has {} entries, nothing drawn", bank.len());
            return;
        }

        self.setup_view(scene);

        let lights = collect_lights(scene, self.config.max_lights);
        self.stats.lights = lights.len();
        let shading = Shading::new(scene.atmosphere, &lights, scene.time);

        self.draw_planes(scene, bank, &shading);
        self.draw_walls(scene, bank, &shading);

        self.collect_sprites(scene);
        self.draw_sprites(scene.time, &shading);

        if let Some(vm) = &scene.view_model {
            self.draw_view_model(vm, scene.time);
        }

        self.post_process(scene);

        trace!("frame stats {:?}", self.stats);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::{RendererExt, ScreenEffects},
        world::{CameraPose, LevelAtmosphere, TileMap, procgen},
    };

    fn room() -> TileMap {
        TileMap::from_rows(&[
            "11111111", //
            "1......1", //
            "1......1", //
            "1......1", //
            "11111111",
        ])
        .unwrap()
    }

    #[test]
    fn frame_is_handed_over_once_with_right_size() {
        let map = room();
        let cam = CameraPose::new(Vec2::new(2.5, 2.5), 0.0);
        let atmo = LevelAtmosphere::default();
        let fx = ScreenEffects::default();
        let bank = procgen::build_bank(1).unwrap();
        let scene = Scene {
            map: &map,
            camera: &cam,
            atmosphere: &atmo,
            entities: &[],
            particles: &[],
            view_model: None,
            muzzle_flash: 0.0,
            effects: &fx,
            time: 0.0,
        };

        let mut sw = Software::new(RenderConfig::raw());
        let mut calls = 0;
        sw.draw_frame(64, 40, &scene, &bank, |fb, w, h| {
            calls += 1;
            assert_eq!((w, h), (64, 40));
            assert_eq!(fb.len(), 64 * 40);
            assert!(fb.iter().all(|&px| px >> 24 == 0xFF), "alpha must be opaque");
        });
        assert_eq!(calls, 1);
        assert_eq!(sw.stats().wall_columns, 64);
        assert!(sw.zbuffer().iter().all(|d| d.is_finite() && *d > 0.0));
    }

    #[test]
    fn resize_reallocates_every_buffer() {
        let mut sw = Software::default();
        sw.begin_frame(32, 20);
        sw.begin_frame(16, 8);
        assert_eq!(sw.scratch.len(), 16 * 8);
        assert_eq!(sw.post_scratch.len(), 16 * 8);
        assert_eq!(sw.radial.len(), 16 * 8);
        assert_eq!(sw.zbuffer().len(), 16);
        assert!(sw.radial.iter().all(|r| (0.0..=1.0).contains(r)));
    }

    #[test]
    fn empty_bank_draws_nothing() {
        let map = room();
        let cam = CameraPose::new(Vec2::new(2.5, 2.5), 0.0);
        let atmo = LevelAtmosphere::default();
        let fx = ScreenEffects::default();
        let scene = Scene {
            map: &map,
            camera: &cam,
            atmosphere: &atmo,
            entities: &[],
            particles: &[],
            view_model: None,
            muzzle_flash: 0.0,
            effects: &fx,
            time: 0.0,
        };
        let mut sw = Software::default();
        sw.draw_frame(8, 8, &scene, &TextureBank::new(), |fb, _, _| {
            assert!(fb.iter().all(|&px| px == 0xFF_000000));
        });
    }

    #[test]
    fn floor_height_raises_eye_within_limits() {
        let mut map = room();
        map.set_floor_height(2, 2, 2.0);
        let cam = CameraPose::new(Vec2::new(2.5, 2.5), 0.0);
        let atmo = LevelAtmosphere::default();
        let fx = ScreenEffects::default();
        let scene = Scene {
            map: &map,
            camera: &cam,
            atmosphere: &atmo,
            entities: &[],
            particles: &[],
            view_model: None,
            muzzle_flash: 0.0,
            effects: &fx,
            time: 0.0,
        };
        let mut sw = Software::default();
        sw.begin_frame(16, 16);
        sw.setup_view(&scene);
        assert_eq!(sw.view.eye_z, EYE_LIMIT);
    }
}
