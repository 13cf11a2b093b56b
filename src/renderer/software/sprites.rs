//! Billboard sprites: projection, depth sort and Z-buffered drawing.

use glam::Vec2;
use log::warn;

use crate::{
    renderer::{
        Scene,
        software::{
            Software,
            lighting::Shading,
            shaders::{ShaderFn, ShaderInput, ShaderKey, ShaderParams},
        },
    },
    world::{BodyPartKind, EnemyKind, NEAR_EPSILON, RenderableEntity},
};

/// One projected billboard, ready to rasterise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisSprite {
    pub key: ShaderKey,
    pub params: ShaderParams,
    pub world: Vec2,
    /// Camera-space depth along the forward axis.
    pub depth: f32,
    /// Screen column of the sprite centre.
    pub screen_x: f32,
    pub center_y: f32,
    pub w_px: f32,
    pub h_px: f32,
}

/// World-space footprint of a billboard.
#[derive(Clone, Copy, Debug)]
struct Billboard {
    key: ShaderKey,
    params: ShaderParams,
    pos: Vec2,
    width: f32,
    height: f32,
    /// Height of the sprite centre above the floor, wall units.
    z_center: f32,
}

fn enemy_size(kind: EnemyKind) -> (f32, f32) {
    match kind {
        EnemyKind::Grunt => (0.6, 0.9),
        EnemyKind::Stalker => (0.6, 0.85),
        EnemyKind::Brute => (0.85, 1.15),
        EnemyKind::Wraith => (0.6, 0.85),
    }
}

fn billboard(e: &RenderableEntity) -> Billboard {
    match *e {
        RenderableEntity::Enemy(en) => {
            let params = ShaderParams {
                hurt: (en.hurt_timer * 4.0).min(1.0),
                stunned: en.stunned,
                dead: en.dead_for.is_some(),
                phase: en.phase,
                ..Default::default()
            };
            let (w, h) = enemy_size(en.kind);
            let (width, height, z_center) = if params.dead {
                // lying flat on the floor
                (w * 1.6, 0.4, 0.12)
            } else if en.kind == EnemyKind::Wraith {
                (w, h, 0.6 + en.phase.sin() * 0.05)
            } else {
                (w, h, h * 0.5)
            };
            Billboard {
                key: ShaderKey::Enemy(en.kind),
                params,
                pos: en.pos,
                width,
                height,
                z_center,
            }
        }
        RenderableEntity::Pickup(p) => Billboard {
            key: ShaderKey::Pickup(p.kind),
            params: ShaderParams {
                phase: p.bob_phase,
                ..Default::default()
            },
            pos: p.pos,
            width: 0.4,
            height: 0.4,
            z_center: 0.22 + p.bob_phase.sin() * 0.05,
        },
        RenderableEntity::Projectile(p) => Billboard {
            key: ShaderKey::Projectile(p.kind),
            params: ShaderParams {
                rotation: p.rotation,
                life: p.life,
                ..Default::default()
            },
            pos: p.pos,
            width: 0.25,
            height: 0.25,
            z_center: 0.5,
        },
        RenderableEntity::Bomb(b) => Billboard {
            key: ShaderKey::Bomb,
            params: ShaderParams {
                rotation: b.rotation,
                life: b.fuse,
                ..Default::default()
            },
            pos: b.pos,
            width: 0.3,
            height: 0.3,
            z_center: b.z + 0.15,
        },
        RenderableEntity::BodyPart(b) => {
            let size = match b.kind {
                BodyPartKind::Head => 0.25,
                BodyPartKind::Limb => 0.35,
                BodyPartKind::Chunk => 0.2,
            };
            Billboard {
                key: ShaderKey::BodyPart(b.kind),
                params: ShaderParams {
                    rotation: b.rotation,
                    life: b.life,
                    ..Default::default()
                },
                pos: b.pos,
                width: size,
                height: size,
                z_center: b.z + size * 0.5,
            }
        }
    }
}

impl Software {
    /// Project every visible entity and particle, farthest first.
    pub(super) fn collect_sprites(&mut self, scene: &Scene<'_>) {
        self.sprites.clear();

        let entities = scene
            .entities
            .iter()
            .filter(|e| e.is_visible())
            .map(billboard);
        let particles = scene.particles.iter().filter(|p| p.life > 0.0).map(|p| Billboard {
            key: ShaderKey::Particle,
            params: ShaderParams {
                tint: p.color,
                life: p.life,
                ..Default::default()
            },
            pos: p.pos,
            width: 0.06,
            height: 0.06,
            z_center: p.z,
        });

        for b in entities.chain(particles) {
            if let Some(s) = self.project(scene, &b) {
                self.sprites.push(s);
            }
        }

        // painter's order
        self.sprites.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }

    fn project(&self, scene: &Scene<'_>, b: &Billboard) -> Option<VisSprite> {
        let c = scene.camera.to_cam(b.pos);
        if c.y <= NEAR_EPSILON {
            return None;
        }
        let v = self.view;
        let depth = c.y;
        Some(VisSprite {
            key: b.key,
            params: b.params,
            world: b.pos,
            depth,
            screen_x: self.screen_x(c.x / depth),
            center_y: v.horizon + (0.5 + v.eye_z - b.z_center) * v.focal_y / depth,
            w_px: b.width * self.half_w / (v.fov_scale * depth),
            h_px: b.height * v.focal_y / depth,
        })
    }

    pub(super) fn shader_for(&mut self, key: ShaderKey) -> Option<ShaderFn> {
        let f = self.shaders.get(key);
        if f.is_none() && self.missing_shaders.insert(key) {
            warn!("no shader registered for {key:?}; sprite skipped");
        }
        f
    }

    pub(super) fn draw_sprites(&mut self, time: f32, shading: &Shading) {
        let sprites = std::mem::take(&mut self.sprites);
        for s in &sprites {
            self.draw_sprite(s, time, shading);
        }
        self.sprites = sprites;
    }

    fn draw_sprite(&mut self, s: &VisSprite, time: f32, shading: &Shading) {
        let Some(shader) = self.shader_for(s.key) else {
            return;
        };
        if s.w_px <= 0.0 || s.h_px <= 0.0 {
            return;
        }
        let (w, h) = (self.width as i32, self.height as i32);
        let x0 = ((s.screen_x - s.w_px * 0.5).ceil() as i32).clamp(0, w);
        let x1 = ((s.screen_x + s.w_px * 0.5).ceil() as i32).clamp(0, w);
        let y0 = ((s.center_y - s.h_px * 0.5).ceil() as i32).clamp(0, h);
        let y1 = ((s.center_y + s.h_px * 0.5).ceil() as i32).clamp(0, h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let surface = shading.surface(s.world, s.depth);
        let mut written = 0;
        for x in x0..x1 {
            let col = x as usize;
            // occluded by a nearer wall in this column
            if s.depth >= self.zbuffer[col] {
                continue;
            }
            let u = (x as f32 + 0.5 - s.screen_x) / s.w_px;
            for y in y0..y1 {
                let input = ShaderInput {
                    u,
                    v: (y as f32 + 0.5 - s.center_y) / s.h_px,
                    time,
                    p: s.params,
                };
                if let Some(c) = shader(&input) {
                    self.scratch[y as usize * self.width + col] = shading.apply(c, &surface, 1.0);
                    written += 1;
                }
            }
        }
        if written > 0 {
            self.stats.sprites_drawn += 1;
            self.stats.sprite_pixels += written;
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
        world::{
            CameraPose, DEATH_GRACE, EnemySnapshot, LevelAtmosphere, Particle, PickupKind,
            PickupSnapshot, TextureBank, TileMap, procgen,
        },
    };

    const W: usize = 64;
    const H: usize = 48;

    fn pickup(x: f32, y: f32) -> RenderableEntity {
        RenderableEntity::Pickup(PickupSnapshot {
            pos: Vec2::new(x, y),
            kind: PickupKind::Health,
            bob_phase: 0.0,
            collected: false,
        })
    }

    fn grunt(x: f32, y: f32, dead_for: Option<f32>) -> RenderableEntity {
        RenderableEntity::Enemy(EnemySnapshot {
            pos: Vec2::new(x, y),
            kind: EnemyKind::Grunt,
            hurt_timer: 0.0,
            stunned: false,
            dead_for,
            phase: 0.0,
        })
    }

    fn no_lights() -> RenderConfig {
        RenderConfig {
            max_lights: 0,
            ..RenderConfig::raw()
        }
    }

    fn render(
        sw: &mut Software,
        map: &TileMap,
        entities: &[RenderableEntity],
        particles: &[Particle],
        bank: &TextureBank,
    ) -> Vec<u32> {
        let cam = CameraPose::new(Vec2::new(2.5, 2.5), 0.0);
        let atmo = LevelAtmosphere::default();
        let fx = ScreenEffects::default();
        let scene = Scene {
            map,
            camera: &cam,
            atmosphere: &atmo,
            entities,
            particles,
            view_model: None,
            muzzle_flash: 0.0,
            effects: &fx,
            time: 0.0,
        };
        let mut out = Vec::new();
        sw.draw_frame(W, H, &scene, bank, |fb, _, _| out.extend_from_slice(fb));
        out
    }

    #[test]
    fn pickup_ahead_renders_centred() {
        let map = TileMap::new(24, 24);
        let bank = procgen::build_bank(5).unwrap();
        let mut sw = Software::new(no_lights());
        let empty = render(&mut sw, &map, &[], &[], &bank);
        let with = render(&mut sw, &map, &[pickup(5.5, 2.5)], &[], &bank);

        let s = sw.sprites()[0];
        assert!((s.depth - 3.0).abs() < 1e-4);
        assert!((s.screen_x - W as f32 / 2.0).abs() < 1.0);

        let cols: Vec<usize> = (0..W)
            .filter(|&x| (0..H).any(|y| empty[y * W + x] != with[y * W + x]))
            .collect();
        assert!(cols.contains(&(W / 2)), "centre column untouched: {cols:?}");
        let mid = (cols[0] + cols[cols.len() - 1]) as f32 / 2.0;
        assert!((mid - W as f32 / 2.0).abs() <= 2.0, "footprint centred at {mid}");
    }

    #[test]
    fn wall_in_between_hides_pickup() {
        let mut map = TileMap::new(24, 24);
        map.set_wall(4, 2, 3);
        let bank = procgen::build_bank(5).unwrap();
        let mut sw = Software::new(RenderConfig::raw());
        render(&mut sw, &map, &[pickup(5.5, 2.5)], &[], &bank);
        assert_eq!(sw.sprites().len(), 1, "projected but occluded");
        assert!(sw.zbuffer()[W / 2] < sw.sprites()[0].depth);
        assert_eq!(sw.stats().sprite_pixels, 0);
    }

    #[test]
    fn behind_and_too_close_are_rejected() {
        let map = TileMap::new(24, 24);
        let bank = procgen::build_bank(5).unwrap();
        let mut sw = Software::new(RenderConfig::raw());
        render(
            &mut sw,
            &map,
            &[pickup(0.5, 2.5), pickup(2.5 + NEAR_EPSILON * 0.5, 2.5)],
            &[],
            &bank,
        );
        assert!(sw.sprites().is_empty());
    }

    #[test]
    fn sorted_farthest_first() {
        let map = TileMap::new(24, 24);
        let bank = procgen::build_bank(5).unwrap();
        let mut sw = Software::new(RenderConfig::raw());
        let ents = [
            pickup(4.0, 2.5),
            grunt(9.0, 3.0, None),
            pickup(6.0, 2.0),
            grunt(3.5, 2.4, None),
        ];
        let sparks = [Particle {
            pos: Vec2::new(7.0, 2.5),
            z: 0.5,
            color: rgb(255, 200, 50),
            life: 0.3,
        }];
        render(&mut sw, &map, &ents, &sparks, &bank);
        assert_eq!(sw.sprites().len(), 5);
        assert!(
            sw.sprites().windows(2).all(|w| w[0].depth >= w[1].depth),
            "depths not descending"
        );
    }

    #[test]
    fn invisible_entities_skipped() {
        let map = TileMap::new(24, 24);
        let bank = procgen::build_bank(5).unwrap();
        let mut sw = Software::new(RenderConfig::raw());
        let gone = RenderableEntity::Pickup(PickupSnapshot {
            pos: Vec2::new(5.0, 2.5),
            kind: PickupKind::Ammo,
            bob_phase: 0.0,
            collected: true,
        });
        render(
            &mut sw,
            &map,
            &[gone, grunt(6.0, 2.5, Some(DEATH_GRACE + 1.0)), grunt(7.0, 2.5, Some(0.5))],
            &[],
            &bank,
        );
        assert_eq!(sw.sprites().len(), 1);
        assert!(sw.sprites()[0].params.dead);
    }

    #[test]
    fn corpse_lies_lower_than_live_enemy() {
        let live = billboard(&grunt(0.0, 0.0, None));
        let dead = billboard(&grunt(0.0, 0.0, Some(0.1)));
        assert!(dead.z_center < live.z_center);
        assert!(dead.height < live.height);
    }

    #[test]
    fn missing_shader_draws_nothing() {
        let map = TileMap::new(24, 24);
        let bank = procgen::build_bank(5).unwrap();
        let mut sw = Software::new(RenderConfig::raw());
        *sw.shaders_mut() = Default::default();
        render(&mut sw, &map, &[grunt(5.0, 2.5, None), grunt(6.0, 2.5, None)], &[], &bank);
        render(&mut sw, &map, &[grunt(5.0, 2.5, None)], &[], &bank);
        assert_eq!(sw.stats().sprite_pixels, 0);
        assert_eq!(sw.missing_shaders.len(), 1);
    }
}
