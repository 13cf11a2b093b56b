//! Full-frame compositor passes, run once after world and weapon drawing.
//!
//! Order matters, later passes see earlier output:
//! overlays → tints → shake → vignette → grading → scanlines → chromatic.

use glam::{IVec2, Vec3};

use crate::renderer::{
    PostFx, Rgba, ScreenEffects, Scene,
    color::{luma, pack, unpack},
    software::Software,
};

const DAMAGE_RED: Vec3 = Vec3::new(200.0, 0.0, 0.0);
const KILL_FLASH: Vec3 = Vec3::new(255.0, 240.0, 200.0);
const HEART_RED: Vec3 = Vec3::new(120.0, 0.0, 0.0);
const DEATH_RED: Vec3 = Vec3::new(90.0, 0.0, 0.0);
const INVULN_CYAN: Vec3 = Vec3::new(0.0, 220.0, 255.0);
const BOOST_RED: Vec3 = Vec3::new(255.0, 30.0, 30.0);

/// Rewrite every pixel through `f(index, rgb)`.
#[inline]
fn map_pixels<F: FnMut(usize, Vec3) -> Vec3>(buf: &mut [Rgba], mut f: F) {
    for (i, px) in buf.iter_mut().enumerate() {
        *px = pack(f(i, unpack(*px)));
    }
}

/// Deterministic pixel jitter for a shake of amplitude `amp` at `time`.
pub fn shake_offset(amp: f32, time: f32) -> IVec2 {
    if amp <= 0.0 {
        return IVec2::ZERO;
    }
    IVec2::new(
        (amp * (time * 47.0).sin()).round() as i32,
        (amp * (time * 53.0 + 1.7).cos()).round() as i32,
    )
}

impl Software {
    pub(super) fn post_process(&mut self, scene: &Scene<'_>) {
        let flags = self.config.post_fx;
        let fx = scene.effects;
        let t = scene.time;

        if flags.contains(PostFx::OVERLAYS) {
            self.overlays(fx);
        }
        if flags.contains(PostFx::TINTS) {
            self.tints(fx, t);
        }
        if flags.contains(PostFx::SHAKE) {
            self.shake = shake_offset(fx.shake, t);
        }
        if flags.contains(PostFx::VIGNETTE) {
            self.vignette();
        }
        if flags.contains(PostFx::GRADING) {
            self.grade();
        }
        if flags.contains(PostFx::SCANLINES) {
            self.scanlines();
        }
        if flags.contains(PostFx::CHROMATIC) && fx.damage.remaining > self.config.chroma_threshold {
            self.chromatic(fx.damage.strength());
        }
    }

    fn overlays(&mut self, fx: &ScreenEffects) {
        let damage = fx.damage.strength();
        let kill = fx.kill.strength();
        let heart = fx.heartbeat.strength();
        let death = fx.death_progress();
        if damage <= 0.0 && kill <= 0.0 && heart <= 0.0 && death <= 0.0 {
            return;
        }
        let radial = &self.radial;
        map_pixels(&mut self.scratch, |i, mut c| {
            if damage > 0.0 {
                c = c.lerp(DAMAGE_RED, 0.4 * damage);
            }
            if kill > 0.0 {
                c = c.lerp(KILL_FLASH, 0.25 * kill);
            }
            if heart > 0.0 {
                c = c.lerp(HEART_RED, 0.5 * heart * radial[i].powf(1.5));
            }
            if death > 0.0 {
                let grey = Vec3::splat(luma(c) * 255.0);
                c = c.lerp(grey, death) * (1.0 - 0.7 * death);
                c = c.lerp(DEATH_RED, 0.3 * death);
            }
            c
        });
    }

    fn tints(&mut self, fx: &ScreenEffects, t: f32) {
        let pulse = 0.5 + 0.5 * (t * 6.0).sin();
        if fx.invincibility > 0.0 {
            let k = 0.12 + 0.1 * pulse;
            map_pixels(&mut self.scratch, |_, c| c.lerp(INVULN_CYAN, k));
        }
        if fx.damage_boost > 0.0 {
            let k = 0.08 + 0.08 * pulse;
            map_pixels(&mut self.scratch, |_, c| c.lerp(BOOST_RED, k));
        }
    }

    fn vignette(&mut self) {
        let (s, p) = (self.config.vignette_strength, self.config.vignette_power);
        let radial = &self.radial;
        map_pixels(&mut self.scratch, |i, c| c * (1.0 - s * radial[i].powf(p)).max(0.0));
    }

    fn grade(&mut self) {
        let contrast = self.config.contrast;
        map_pixels(&mut self.scratch, |_, c| {
            let l = luma(c);
            // cool shadows, warm highlights
            let toned = c + Vec3::new(-4.0, 2.0, 8.0) * (1.0 - l) + Vec3::new(8.0, 4.0, -6.0) * l;
            (toned - 128.0) * contrast + 128.0
        });
    }

    fn scanlines(&mut self) {
        let period = self.config.scanline_period;
        if period == 0 {
            return;
        }
        let dim = self.config.scanline_dim;
        let w = self.width;
        for row in self.scratch.chunks_exact_mut(w).skip(period - 1).step_by(period) {
            map_pixels(row, |_, c| c * dim);
        }
    }

    /// Red and blue sampled sideways, farther out toward the edges.
    fn chromatic(&mut self, strength: f32) {
        let max_off = self.config.chroma_max_offset * strength;
        if max_off < 0.5 {
            return;
        }
        self.post_scratch.copy_from_slice(&self.scratch);
        let (w, h) = (self.width, self.height);
        let last = w as i32 - 1;
        for y in 0..h {
            let row = y * w;
            for x in 0..w {
                let i = row + x;
                let off = (self.radial[i] * max_off).round() as i32;
                if off == 0 {
                    continue;
                }
                let out = if (x as f32) < self.half_w { -off } else { off };
                let xr = (x as i32 + out).clamp(0, last) as usize;
                let xb = (x as i32 - out).clamp(0, last) as usize;
                let r = self.post_scratch[row + xr] & 0x00FF_0000;
                let g = self.post_scratch[i] & 0x0000_FF00;
                let b = self.post_scratch[row + xb] & 0x0000_00FF;
                self.scratch[i] = 0xFF_000000 | r | g | b;
            }
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{EffectTimer, RenderConfig, Renderer, color::rgb};
    use crate::world::{CameraPose, LevelAtmosphere, TileMap};
    use glam::Vec2;

    const W: usize = 40;
    const H: usize = 30;

    fn run(flags: PostFx, fx: &ScreenEffects, fill: impl Fn(usize, usize) -> Rgba) -> Software {
        let map = TileMap::new(4, 4);
        let cam = CameraPose::new(Vec2::new(1.5, 1.5), 0.0);
        let atmo = LevelAtmosphere::default();
        let scene = Scene {
            map: &map,
            camera: &cam,
            atmosphere: &atmo,
            entities: &[],
            particles: &[],
            view_model: None,
            muzzle_flash: 0.0,
            effects: fx,
            time: 0.7,
        };
        let mut sw = Software::new(RenderConfig {
            post_fx: flags,
            ..RenderConfig::default()
        });
        sw.begin_frame(W, H);
        for y in 0..H {
            for x in 0..W {
                sw.scratch[y * W + x] = fill(x, y);
            }
        }
        sw.post_process(&scene);
        sw
    }

    fn grey(_: usize, _: usize) -> Rgba {
        rgb(128, 128, 128)
    }

    #[test]
    fn no_flags_is_identity() {
        let mut fx = ScreenEffects::default();
        fx.damage = EffectTimer::new(1.0);
        fx.shake = 5.0;
        let sw = run(PostFx::empty(), &fx, grey);
        assert!(sw.frame().iter().all(|&px| px == rgb(128, 128, 128)));
        assert_eq!(sw.shake_offset(), IVec2::ZERO);
    }

    #[test]
    fn damage_overlay_reddens() {
        let mut fx = ScreenEffects::default();
        fx.damage = EffectTimer::new(1.0);
        let c = unpack(run(PostFx::OVERLAYS, &fx, grey).frame()[0]);
        assert!(c.x > c.y && c.x > c.z);
    }

    #[test]
    fn finished_death_is_dark_and_grey_red() {
        let mut fx = ScreenEffects::default();
        fx.death = Some(EffectTimer {
            remaining: 0.0,
            duration: 1.0,
        });
        let sw = run(PostFx::OVERLAYS, &fx, |x, _| {
            if x % 2 == 0 {
                rgb(0, 200, 0)
            } else {
                rgb(0, 0, 200)
            }
        });
        let c = unpack(sw.frame()[W * 10 + 3]);
        assert!(c.y < 60.0 && c.z < 60.0, "{c:?}");
        assert!(c.x >= c.y);
    }

    #[test]
    fn tints_pulse_toward_colour() {
        let fx = ScreenEffects {
            invincibility: 3.0,
            ..Default::default()
        };
        let c = unpack(run(PostFx::TINTS, &fx, grey).frame()[0]);
        assert!(c.z > c.x, "invincibility tint should be cyan: {c:?}");
    }

    #[test]
    fn shake_offset_bounded_and_zero_at_rest() {
        assert_eq!(shake_offset(0.0, 1.0), IVec2::ZERO);
        for i in 0..200 {
            let o = shake_offset(4.0, i as f32 * 0.013);
            assert!(o.x.abs() <= 4 && o.y.abs() <= 4);
        }
        let fx = ScreenEffects {
            shake: 6.0,
            ..Default::default()
        };
        let sw = run(PostFx::SHAKE, &fx, grey);
        assert_eq!(sw.shake_offset(), shake_offset(6.0, 0.7));
        // the pixels themselves are not shifted
        assert!(sw.frame().iter().all(|&px| px == rgb(128, 128, 128)));
    }

    #[test]
    fn vignette_darkens_corners_more() {
        let sw = run(PostFx::VIGNETTE, &ScreenEffects::default(), grey);
        let centre = unpack(sw.frame()[(H / 2) * W + W / 2]).x;
        let corner = unpack(sw.frame()[0]).x;
        assert!(corner < centre);
    }

    #[test]
    fn scanlines_dim_every_nth_row() {
        let sw = run(PostFx::SCANLINES, &ScreenEffects::default(), grey);
        let period = sw.config().scanline_period;
        for y in 0..H {
            let px = sw.frame()[y * W + 5];
            if y % period == period - 1 {
                assert!(unpack(px).x < 128.0, "row {y} not dimmed");
            } else {
                assert_eq!(px, rgb(128, 128, 128), "row {y} dimmed");
            }
        }
    }

    #[test]
    fn grading_stretches_contrast() {
        let sw = run(PostFx::GRADING, &ScreenEffects::default(), |x, _| {
            if x < W / 2 { rgb(30, 30, 30) } else { rgb(220, 220, 220) }
        });
        assert!(unpack(sw.frame()[0]).y < 30.0);
        assert!(unpack(sw.frame()[W - 1]).y > 220.0);
    }

    #[test]
    fn chromatic_only_above_threshold() {
        let stripes = |x: usize, _: usize| if x % 3 == 0 { rgb(255, 0, 0) } else { rgb(0, 0, 255) };
        let mut fx = ScreenEffects::default();
        fx.damage = EffectTimer {
            remaining: 0.1,
            duration: 1.0,
        };
        let calm = run(PostFx::CHROMATIC, &fx, stripes);
        assert!((0..W * H).all(|i| calm.frame()[i] == stripes(i % W, i / W)));

        fx.damage.remaining = 0.9;
        let hit = run(PostFx::CHROMATIC, &fx, stripes);
        assert!((0..W * H).any(|i| hit.frame()[i] != stripes(i % W, i / W)));
        // the centre barely moves
        let c = (H / 2) * W + W / 2;
        assert_eq!(hit.frame()[c], stripes(W / 2, H / 2));
    }
}
