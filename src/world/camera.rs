use glam::{Vec2, vec2};

/// Field-of-view multiplier (length of the camera plane) in normal view.
pub const FOV_SCALE: f32 = 0.66;
/// Narrower multiplier while aiming down the sights.
pub const AIM_FOV_SCALE: f32 = 0.4;
/// Pitch limit in degrees, both directions.
pub const MAX_PITCH_DEG: f32 = 60.0;
/// Projected depth at or below which a point counts as behind the camera.
pub const NEAR_EPSILON: f32 = 0.1;

/// Player view-point for one frame.
///
/// * `angle` is the heading in radians, 0 = +X (east); `y` grows south so
///   positive angles turn clockwise on the minimap.
/// * `pitch` is in degrees, positive = looking up.
/// * `z_offset` is the jump/crouch offset in wall-heights (1.0 = one wall).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub pos: Vec2,
    pub angle: f32,
    pitch: f32,
    pub z_offset: f32,
    pub aiming: bool,
}

impl CameraPose {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle,
            pitch: 0.0,
            z_offset: 0.0,
            aiming: false,
        }
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set pitch in degrees, clamped to ±[`MAX_PITCH_DEG`].
    pub fn set_pitch(&mut self, deg: f32) {
        self.pitch = deg.clamp(-MAX_PITCH_DEG, MAX_PITCH_DEG);
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks on the X-Y plane.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.angle.sin_cos();
        Vec2::new(c, s)
    }

    /// Unit vector pointing to the camera's right on the X-Y plane.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        self.forward().perp()
    }

    /// Current FOV multiplier; aiming narrows it and so zooms in.
    #[inline]
    pub fn fov_scale(&self) -> f32 {
        if self.aiming { AIM_FOV_SCALE } else { FOV_SCALE }
    }

    /// Camera plane: right vector scaled by the FOV multiplier.
    #[inline]
    pub fn plane(&self) -> Vec2 {
        self.right() * self.fov_scale()
    }

    /// View ray through normalised screen coordinate `cam_x ∈ [-1, 1]`.
    #[inline]
    pub fn ray(&self, cam_x: f32) -> Vec2 {
        self.forward() + self.plane() * cam_x
    }

    /// Transform world point `p` into camera space by inverting the
    /// `[forward, plane]` basis:
    ///  .x = lateral offset in plane units (screen x = ½W·(1 + x/y))
    ///  .y = depth along the forward axis
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let d = p - self.pos;
        let dir = self.forward();
        let plane = self.plane();
        let inv_det = 1.0 / (plane.x * dir.y - dir.x * plane.y);
        let lateral = inv_det * (dir.y * d.x - dir.x * d.y);
        let depth = inv_det * (-plane.y * d.x + plane.x * d.y);
        vec2(lateral, depth)
    }

    /*───────────────── projection helpers ─────────────────*/

    /// Vertical focal length in pixels for a viewport of height `h`.
    ///
    /// ```text
    /// focal_y = h · FOV_SCALE / fov_scale      (= h when not aiming)
    /// ```
    #[inline]
    pub fn focal_y(&self, h: usize) -> f32 {
        h as f32 * FOV_SCALE / self.fov_scale()
    }

    /// Screen row of the pitch-shifted horizon (before eye-height parallax).
    #[inline]
    pub fn horizon(&self, h: usize) -> f32 {
        h as f32 * 0.5 + self.pitch * (h as f32 / 180.0)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
