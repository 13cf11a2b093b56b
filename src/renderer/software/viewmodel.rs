use crate::{
    renderer::software::{
        Software,
        shaders::{ShaderInput, ShaderKey, ShaderParams},
    },
    world::ViewModel,
};

/// Weapon box size as a fraction of the screen.
const BOX_W: f32 = 0.34;
const BOX_H: f32 = 0.46;

impl Software {
    /// First-person weapon, drawn over the world without depth test or fog.
    pub(super) fn draw_view_model(&mut self, vm: &ViewModel, time: f32) {
        let Some(shader) = self.shader_for(ShaderKey::Weapon(vm.weapon)) else {
            return;
        };
        let box_w = BOX_W * self.width_f;
        let box_h = BOX_H * self.height_f;

        let sway = vm.bob_phase.sin() * 0.025 * self.width_f;
        let bounce = vm.bob_phase.cos().abs() * 0.02 * self.height_f;
        let drop =
            vm.swap.clamp(0.0, 1.0) * box_h + vm.recoil.clamp(0.0, 1.0) * 0.06 * self.height_f;

        let cx = self.half_w + sway;
        let bottom = self.height_f + bounce + drop;
        let top = bottom - box_h;

        let (w, h) = (self.width as i32, self.height as i32);
        let x0 = ((cx - box_w * 0.5).ceil() as i32).clamp(0, w);
        let x1 = ((cx + box_w * 0.5).ceil() as i32).clamp(0, w);
        let y0 = (top.ceil() as i32).clamp(0, h);
        let y1 = (bottom.ceil() as i32).clamp(0, h);

        let params = ShaderParams {
            phase: vm.bob_phase,
            swap: vm.swap,
            recoil: vm.recoil,
            firing: vm.firing,
            ..Default::default()
        };
        for y in y0..y1 {
            let v = (y as f32 + 0.5 - top) / box_h - 0.5;
            let row = y as usize * self.width;
            for x in x0..x1 {
                let input = ShaderInput {
                    u: (x as f32 + 0.5 - cx) / box_w,
                    v,
                    time,
                    p: params,
                };
                if let Some(c) = shader(&input) {
                    self.scratch[row + x as usize] = c;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Renderer;
    use crate::world::WeaponKind;

    fn weapon(swap: f32, firing: bool) -> ViewModel {
        ViewModel {
            weapon: WeaponKind::Shotgun,
            swap,
            recoil: 0.0,
            bob_phase: 0.0,
            firing,
        }
    }

    fn painted(vm: ViewModel) -> usize {
        let mut sw = Software::default();
        sw.begin_frame(80, 60);
        sw.draw_view_model(&vm, 0.1);
        sw.frame().iter().filter(|&&px| px != 0xFF_000000).count()
    }

    #[test]
    fn raised_weapon_sits_bottom_centre() {
        let mut sw = Software::default();
        sw.begin_frame(80, 60);
        sw.draw_view_model(&weapon(0.0, false), 0.0);
        let fb = sw.frame();
        assert_ne!(fb[59 * 80 + 40], 0xFF_000000);
        assert!(fb[..30 * 80].iter().all(|&px| px == 0xFF_000000));
    }

    #[test]
    fn swap_lowers_weapon_off_screen() {
        assert!(painted(weapon(0.0, false)) > painted(weapon(0.5, false)));
        assert_eq!(painted(weapon(1.0, false)), 0);
    }

    #[test]
    fn firing_adds_muzzle_flash() {
        assert!(painted(weapon(0.0, true)) > painted(weapon(0.0, false)));
    }
}
