//! Floor / ceiling caster: one affine world-space walk per scanline.

use glam::{Vec2, Vec3};

use crate::{
    renderer::{
        Rgba, Scene,
        color::pack,
        software::{Software, lighting::Shading},
    },
    world::{CEILING_TEXTURE, FLOOR_TEXTURE, TextureBank},
};

/// Ceilings read a touch darker than floors.
const CEILING_SHADE: f32 = 0.85;

/// Animated glow of a hazard tile at world point `p`.
#[inline]
fn hazard_texel(p: Vec2, time: f32) -> Rgba {
    let swell = (p.x * 3.1 + time * 2.3).sin() * (p.y * 2.7 - time * 1.9).sin();
    let bubble = ((p.x * 7.0 + p.y * 5.0 + time * 4.0).sin() * 0.5 + 0.5).powi(8);
    pack(Vec3::new(
        40.0 + 60.0 * bubble,
        150.0 + 60.0 * swell + 60.0 * bubble,
        30.0 + 20.0 * swell,
    ))
}

impl Software {
    pub(super) fn draw_planes(&mut self, scene: &Scene<'_>, bank: &TextureBank, shading: &Shading) {
        let (Ok(floor), Ok(ceiling)) = (bank.texture(FLOOR_TEXTURE), bank.texture(CEILING_TEXTURE))
        else {
            return;
        };
        let v = self.view;
        let w = self.width;
        let left = v.dir - v.plane;
        let right = v.dir + v.plane;
        let cutoff = self.config.plane_cutoff.min(scene.atmosphere.fog_cutoff);
        let fog = scene.atmosphere.fog_color;

        for y in 0..self.height {
            let row = y * w;
            let dy = y as f32 + 0.5 - v.horizon;
            let is_floor = dy > 0.0;
            let eye = if is_floor {
                0.5 + v.eye_z
            } else {
                0.5 - v.eye_z
            };
            let row_dist = v.focal_y * eye / dy.abs();

            // also catches dy == 0 (infinite distance)
            if !(row_dist <= cutoff) {
                self.scratch[row..row + w].fill(fog);
                self.stats.plane_rows_skipped += 1;
                continue;
            }

            let (tex, face) = if is_floor {
                (floor, 1.0)
            } else {
                (ceiling, CEILING_SHADE)
            };
            let (tw, th) = (tex.width() as f32, tex.height() as f32);
            let step = (right - left) * (row_dist / self.width_f);
            let mut p = v.pos + left * row_dist + step * 0.5;

            for x in 0..w {
                let cell = p.floor().as_ivec2();
                let texel = if is_floor && scene.map.is_hazard(cell.x, cell.y) {
                    hazard_texel(p, scene.time)
                } else {
                    tex.sample((p.x * tw).floor() as i32, (p.y * th).floor() as i32)
                };
                self.scratch[row + x] = shading.shade(texel, p, row_dist, face);
                p += step;
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
    use crate::{
        renderer::{RenderConfig, RendererExt, ScreenEffects, color::rgb},
        world::{CameraPose, LevelAtmosphere, MAX_MATERIAL, Texture, TileMap, procgen},
    };

    const FLOOR_GREEN: Rgba = rgb(0, 200, 0);

    /// First floor row and last ceiling row of a plain-colour open room.
    fn plane_bounds(cam: &CameraPose) -> (usize, usize) {
        let mut bank = TextureBank::new();
        let mut add = |name: String, c: Rgba| {
            bank.insert(Texture::new(name, 2, 2, vec![c; 4]).unwrap()).unwrap();
        };
        for m in 1..=MAX_MATERIAL {
            add(format!("W{m}"), rgb(200, 0, 0));
        }
        add("FLOOR".into(), FLOOR_GREEN);
        add("CEILING".into(), rgb(0, 0, 200));

        let map = TileMap::new(128, 128);
        let atmo = LevelAtmosphere::clear();
        let fx = ScreenEffects::default();
        let scene = Scene {
            map: &map,
            camera: cam,
            atmosphere: &atmo,
            entities: &[],
            particles: &[],
            view_model: None,
            muzzle_flash: 0.0,
            effects: &fx,
            time: 0.0,
        };
        let mut sw = Software::new(RenderConfig::raw());
        sw.draw_frame(32, 256, &scene, &bank, |_, _, _| {});
        let col: Vec<Rgba> = (0..256).map(|y| sw.frame()[y * 32 + 16]).collect();
        // fog is dark, so only the ceiling texel has a bright blue channel
        let first_floor = col.iter().position(|&c| c == FLOOR_GREEN).unwrap();
        let last_ceiling = col.iter().rposition(|&c| c & 0xFF > 100).unwrap();
        (first_floor, last_ceiling)
    }

    fn render(map: &TileMap, atmo: &LevelAtmosphere, time: f32) -> Software {
        let cam = CameraPose::new(Vec2::new(32.5, 32.5), 0.4);
        let fx = ScreenEffects::default();
        let bank = procgen::build_bank(11).unwrap();
        let scene = Scene {
            map,
            camera: &cam,
            atmosphere: atmo,
            entities: &[],
            particles: &[],
            view_model: None,
            muzzle_flash: 0.0,
            effects: &fx,
            time,
        };
        let mut sw = Software::new(RenderConfig::raw());
        sw.draw_frame(48, 64, &scene, &bank, |_, _, _| {});
        sw
    }

    #[test]
    fn rows_past_cutoff_are_fog() {
        let atmo = LevelAtmosphere::default();
        let sw = render(&TileMap::new(64, 64), &atmo, 0.0);
        assert!(sw.stats().plane_rows_skipped > 0);
        // the rows hugging the horizon are far beyond the cutoff
        let row = 31 * sw.width;
        assert!(sw.frame()[row..row + sw.width].iter().all(|&px| px == atmo.fog_color));
        // the bottom row is close and textured
        let last = 63 * sw.width;
        assert!(sw.frame()[last..].iter().any(|&px| px != atmo.fog_color));
    }

    #[test]
    fn hazard_floor_is_animated() {
        let mut map = TileMap::new(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                map.set_hazard(x, y, true);
            }
        }
        let atmo = LevelAtmosphere::clear();
        let plain = render(&TileMap::new(64, 64), &atmo, 0.0);
        let a = render(&map, &atmo, 0.0);
        let b = render(&map, &atmo, 1.3);
        let last = 63 * a.width;
        assert_ne!(plain.frame()[last..], a.frame()[last..]);
        assert_ne!(a.frame()[last..], b.frame()[last..]);
    }

    #[test]
    fn eye_height_changes_row_distance() {
        let level = CameraPose::new(Vec2::new(64.5, 64.5), 0.0);
        let mut raised = level;
        raised.z_offset = 0.3;
        // cutoff 24: |dy| ≥ focal · eye / 24 with focal 256, horizon 128
        assert_eq!(plane_bounds(&level), (133, 122));
        // floor eye 0.8 pushes floor rows away, ceiling eye 0.2 pulls them in
        assert_eq!(plane_bounds(&raised), (137, 125));
    }

    #[test]
    fn pitch_drops_first_floor_row_below_level_horizon() {
        let mut cam = CameraPose::new(Vec2::new(64.5, 64.5), 0.0);
        cam.set_pitch(20.0);
        let (first_floor, last_ceiling) = plane_bounds(&cam);
        // horizon 128 → 156.4
        assert_eq!(first_floor, 162);
        assert!(last_ceiling > 128);
    }

    #[test]
    fn hazard_texel_is_greenish() {
        for i in 0..20 {
            let p = Vec2::splat(i as f32 * 0.37);
            let c = crate::renderer::color::unpack(hazard_texel(p, i as f32));
            assert!(c.y > c.x && c.y > c.z, "{c:?}");
        }
    }
}
