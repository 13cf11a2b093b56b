//! Wall caster: one DDA ray per screen column.

use glam::{IVec2, Vec2};

use crate::{
    renderer::software::{Software, lighting::Shading},
    renderer::Scene,
    world::{MaterialId, TextureBank, TextureId, TileMap, wall_texture},
};

/// Shade multiplier for faces hit on a Y grid line.
const SIDE_SHADE: f32 = 0.75;

/// Which grid line family the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Vertical line (x = const), east/west face.
    X,
    /// Horizontal line (y = const), north/south face.
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    /// Distance projected on the camera forward axis (for a ray built from a
    /// unit forward vector plus a plane offset).
    pub perp: f32,
    pub side: Side,
    pub cell: IVec2,
    pub material: MaterialId,
    pub tex_id: TextureId,
    /// Position across the face in 0‥1, mirrored so textures read the same
    /// from both sides.
    pub wall_x: f32,
    pub point: Vec2,
}

/// Per-axis DDA setup: (step, delta distance, initial side distance).
#[inline(always)]
fn axis(origin: f32, dir: f32, cell: i32) -> (i32, f32, f32) {
    if dir == 0.0 {
        // never crosses a line on this axis
        return (0, f32::INFINITY, f32::INFINITY);
    }
    let delta = (1.0 / dir).abs();
    if dir < 0.0 {
        (-1, delta, (origin - cell as f32) * delta)
    } else {
        (1, delta, (cell as f32 + 1.0 - origin) * delta)
    }
}

/// March `dir` from `origin` through the grid until a cell stops it.
///
/// Returns `None` only if the ray never leaves its cell (zero direction).
pub fn cast_ray(map: &TileMap, origin: Vec2, dir: Vec2) -> Option<WallHit> {
    let mut cell = origin.floor().as_ivec2();
    let (step_x, delta_x, mut side_x) = axis(origin.x, dir.x, cell.x);
    let (step_y, delta_y, mut side_y) = axis(origin.y, dir.y, cell.y);
    if step_x == 0 && step_y == 0 {
        return None;
    }

    // crossing every row and column once is enough to leave the grid
    let max_steps = map.width() + map.height() + 2;
    for _ in 0..max_steps {
        let side = if side_x < side_y {
            side_x += delta_x;
            cell.x += step_x;
            Side::X
        } else {
            side_y += delta_y;
            cell.y += step_y;
            Side::Y
        };

        let Some(material) = map.ray_blocker(cell.x, cell.y) else {
            continue;
        };

        let perp = match side {
            Side::X => side_x - delta_x,
            Side::Y => side_y - delta_y,
        };
        let point = origin + dir * perp;
        let along = match side {
            Side::X => point.y,
            Side::Y => point.x,
        };
        let mut wall_x = along - along.floor();
        if (side == Side::X && dir.x > 0.0) || (side == Side::Y && dir.y < 0.0) {
            wall_x = 1.0 - wall_x;
        }
        if let Some(door) = map.door_at(cell.x, cell.y) {
            let slid = wall_x + door.open_amount;
            wall_x = slid - slid.floor();
        }

        return Some(WallHit {
            perp,
            side,
            cell,
            material,
            tex_id: wall_texture(material),
            wall_x,
            point,
        });
    }
    None
}

impl Software {
    /// Cast every column, draw its textured slice and record its depth.
    pub(super) fn draw_walls(&mut self, scene: &Scene<'_>, bank: &TextureBank, shading: &Shading) {
        let v = self.view;
        let h = self.height as i32;

        for x in 0..self.width {
            let cam_x = 2.0 * x as f32 / self.width_f - 1.0;
            let dir = v.dir + v.plane * cam_x;
            let Some(hit) = cast_ray(scene.map, v.pos, dir) else {
                continue;
            };
            // never divide by a zero distance when hugging a wall
            let perp = hit.perp.max(1e-4);
            // the wall occludes sprites even if its texture is missing
            self.zbuffer[x] = perp;
            let Ok(tex) = bank.texture(hit.tex_id) else {
                continue;
            };
            self.stats.wall_columns += 1;

            let line_h = v.focal_y / perp;
            // floor at z = 0, ceiling at z = 1, eye at 0.5 + eye_z
            let top = v.horizon - (0.5 - v.eye_z) * line_h;
            let bottom = v.horizon + (0.5 + v.eye_z) * line_h;
            let y0 = (top.ceil() as i32).clamp(0, h);
            let y1 = (bottom.ceil() as i32).clamp(0, h);
            if y0 >= y1 {
                continue;
            }

            let tex_x = (hit.wall_x * tex.width() as f32) as i32;
            let step = tex.height() as f32 / line_h;
            let mut tex_pos = (y0 as f32 + 0.5 - top) * step;

            let surface = shading.surface(hit.point, perp);
            let face = if hit.side == Side::Y { SIDE_SHADE } else { 1.0 };
            for y in y0..y1 {
                let texel = tex.sample(tex_x, tex_pos as i32);
                tex_pos += step;
                self.scratch[y as usize * self.width + x] = shading.apply(texel, &surface, face);
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
        renderer::{RenderConfig, RendererExt, Rgba, ScreenEffects, color::rgb},
        world::{CameraPose, Door, LevelAtmosphere, MAX_MATERIAL, Texture, procgen},
    };

    const WALL_RED: Rgba = rgb(200, 0, 0);

    /// Solid red walls over green floor and blue ceiling.
    fn solid_bank() -> TextureBank {
        let mut bank = TextureBank::new();
        let mut add = |name: String, c: Rgba| {
            bank.insert(Texture::new(name, 2, 2, vec![c; 4]).unwrap()).unwrap();
        };
        for m in 1..=MAX_MATERIAL {
            add(format!("W{m}"), WALL_RED);
        }
        add("FLOOR".into(), rgb(0, 200, 0));
        add("CEILING".into(), rgb(0, 0, 200));
        bank
    }

    /// Rows `[first, last + 1)` of column `x` painted with the wall colour.
    fn wall_span(cam: &CameraPose, x: usize) -> (usize, usize) {
        let mut map = TileMap::new(16, 3);
        map.set_wall(12, 1, 1);
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
        sw.draw_frame(32, 64, &scene, &solid_bank(), |_, _, _| {});
        let rows: Vec<usize> = (0..64)
            .filter(|&y| sw.frame()[y * 32 + x] == WALL_RED)
            .collect();
        (rows[0], rows[rows.len() - 1] + 1)
    }

    fn pillar_map() -> TileMap {
        let mut map = TileMap::new(24, 24);
        for y in 2..=10 {
            map.set_wall(5, y, 1);
        }
        map
    }

    /// Brute-force reference: tiny fixed steps along the ray.
    fn march(map: &TileMap, origin: Vec2, dir: Vec2) -> f32 {
        let mut t = 0.0;
        while t < 100.0 {
            let p = origin + dir * t;
            if map.ray_blocker(p.x.floor() as i32, p.y.floor() as i32).is_some() {
                return t;
            }
            t += 0.0005;
        }
        f32::INFINITY
    }

    #[test]
    fn straight_ahead_hits_pillar_with_first_texture() {
        let map = pillar_map();
        let cam = CameraPose::new(Vec2::new(2.5, 2.5), 0.0);
        let hit = cast_ray(&map, cam.pos, cam.ray(0.0)).unwrap();
        assert!(hit.perp.is_finite() && hit.perp > 0.0);
        assert!((hit.perp - 2.5).abs() < 1e-5);
        assert_eq!(hit.side, Side::X);
        assert_eq!(hit.cell, IVec2::new(5, 2));
        assert_eq!(hit.tex_id, 0);
    }

    #[test]
    fn axis_aligned_rays_survive_infinite_steps() {
        let map = TileMap::from_rows(&["111", "1.1", "111"]).unwrap();
        let o = Vec2::new(1.5, 1.5);
        for dir in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
            let hit = cast_ray(&map, o, dir).unwrap();
            assert!((hit.perp - 0.5).abs() < 1e-6, "{dir:?} -> {}", hit.perp);
        }
        assert_eq!(cast_ray(&map, o, Vec2::ZERO), None);
    }

    #[test]
    fn open_map_edge_acts_as_wall() {
        let map = TileMap::new(4, 4);
        let hit = cast_ray(&map, Vec2::new(1.5, 1.5), Vec2::X).unwrap();
        assert_eq!(hit.cell, IVec2::new(4, 1));
        assert!((hit.perp - 2.5).abs() < 1e-6);
    }

    #[test]
    fn zbuffer_matches_brute_force_march() {
        let map = TileMap::from_rows(&[
            "1111111111",
            "1........1",
            "1..2.....1",
            "1......3.1",
            "1..4.....1",
            "1........1",
            "1111111111",
        ])
        .unwrap();
        let cam = CameraPose::new(Vec2::new(1.7, 3.2), 0.35);
        for i in 0..41 {
            let cam_x = i as f32 / 20.0 - 1.0;
            let dir = cam.ray(cam_x);
            let hit = cast_ray(&map, cam.pos, dir).unwrap();
            let reference = march(&map, cam.pos, dir);
            assert!(
                (hit.perp - reference).abs() < 2e-3,
                "column {cam_x}: dda {} vs march {reference}",
                hit.perp
            );
        }
    }

    #[test]
    fn flat_wall_has_no_fisheye() {
        // facing a straight wall, every column reports the same distance
        let mut map = TileMap::new(20, 20);
        for y in 0..20 {
            map.set_wall(10, y, 2);
        }
        let cam = CameraPose::new(Vec2::new(4.5, 10.5), 0.0);
        for i in 0..=10 {
            let hit = cast_ray(&map, cam.pos, cam.ray(i as f32 / 5.0 - 1.0)).unwrap();
            assert!((hit.perp - 5.5).abs() < 1e-4, "perp {}", hit.perp);
        }
    }

    #[test]
    fn door_threshold_for_rays() {
        let mut map = TileMap::new(8, 3);
        map.set_wall(4, 1, 8);
        map.set_wall(6, 1, 1);
        let id = map.add_door(Door::new(4, 1, 0)).unwrap();
        let o = Vec2::new(1.5, 1.5);

        map.door_mut(id).unwrap().open_amount = 0.5;
        assert_eq!(cast_ray(&map, o, Vec2::X).unwrap().cell, IVec2::new(4, 1));
        assert!(map.is_solid(Vec2::new(4.5, 1.5)));

        map.door_mut(id).unwrap().open_amount = 0.95;
        assert_eq!(cast_ray(&map, o, Vec2::X).unwrap().cell, IVec2::new(6, 1));
        assert!(!map.is_solid(Vec2::new(4.5, 1.5)));
    }

    #[test]
    fn texture_column_consistent_from_both_sides() {
        let mut map = TileMap::new(9, 3);
        map.set_wall(4, 1, 1);
        let from_west = cast_ray(&map, Vec2::new(1.5, 1.3), Vec2::X).unwrap();
        let from_east = cast_ray(&map, Vec2::new(7.5, 1.3), Vec2::NEG_X).unwrap();
        // seen from opposite sides, the same world row maps to mirrored columns
        assert!((from_west.wall_x - (1.0 - from_east.wall_x)).abs() < 1e-5);
    }

    #[test]
    fn closer_wall_is_taller() {
        let mut map = TileMap::new(16, 3);
        map.set_wall(12, 1, 1);
        let atmo = LevelAtmosphere::clear();
        let fx = ScreenEffects::default();
        let bank = procgen::build_bank(3).unwrap();
        let mut heights = Vec::new();
        for x in [9.5, 3.5] {
            let cam = CameraPose::new(Vec2::new(x, 1.5), 0.0);
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
            sw.draw_frame(32, 64, &scene, &bank, |_, _, _| {});
            let perp = sw.zbuffer()[16];
            heights.push(sw.view.focal_y / perp);
        }
        assert!(heights[0] > heights[1]);
    }

    #[test]
    fn raised_eye_shifts_wall_slice_down() {
        let level = CameraPose::new(Vec2::new(9.5, 1.5), 0.0);
        let mut jumping = level;
        jumping.z_offset = 0.3;
        let (top0, bottom0) = wall_span(&level, 16);
        let (top1, bottom1) = wall_span(&jumping, 16);
        // perp 2.5, line_h 25.6: top 19.2 → 26.9, bottom 44.8 → 52.5
        assert_eq!((top0, bottom0), (20, 45));
        assert_eq!((top1, bottom1), (27, 53));
        assert!((bottom1 - top1).abs_diff(bottom0 - top0) <= 1, "same slice height");
    }

    #[test]
    fn pitch_moves_slice_with_horizon() {
        let level = CameraPose::new(Vec2::new(9.5, 1.5), 0.0);
        let mut looking_up = level;
        looking_up.set_pitch(20.0);
        let (top0, bottom0) = wall_span(&level, 16);
        let (top1, bottom1) = wall_span(&looking_up, 16);
        // horizon 32 → 39.1
        assert_eq!(top1 - top0, 7);
        assert_eq!(bottom1 - bottom0, 7);
    }

    #[test]
    fn every_material_maps_to_a_wall_texture() {
        let mut map = TileMap::new(9, 3);
        map.set_wall(4, 1, MAX_MATERIAL);
        let hit = cast_ray(&map, Vec2::new(1.5, 1.5), Vec2::X).unwrap();
        assert_eq!(hit.tex_id, wall_texture(MAX_MATERIAL));
        assert!(hit.tex_id < crate::world::FLOOR_TEXTURE);
    }
}
