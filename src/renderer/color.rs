//! ARGB helpers. Shading math runs on `Vec3` channels in 0‥255 and is packed
//! back with a per-channel clamp, so no stage can overflow a byte.

use glam::Vec3;

use super::Rgba;

pub const OPAQUE: Rgba = 0xFF_000000;

#[inline(always)]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    OPAQUE | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline(always)]
pub fn unpack(c: Rgba) -> Vec3 {
    Vec3::new(
        ((c >> 16) & 0xFF) as f32,
        ((c >> 8) & 0xFF) as f32,
        (c & 0xFF) as f32,
    )
}

/// Clamp every channel to [0,255] and pack as opaque ARGB.
#[inline(always)]
pub fn pack(v: Vec3) -> Rgba {
    let c = v.clamp(Vec3::ZERO, Vec3::splat(255.0));
    rgb(c.x as u8, c.y as u8, c.z as u8)
}

#[inline]
pub fn lerp(a: Rgba, b: Rgba, t: f32) -> Rgba {
    pack(unpack(a).lerp(unpack(b), t.clamp(0.0, 1.0)))
}

/// Multiply every channel by `k`.
#[inline]
pub fn scale(c: Rgba, k: f32) -> Rgba {
    pack(unpack(c) * k)
}

/// Rec. 601 luma in 0‥1.
#[inline]
pub fn luma(v: Vec3) -> f32 {
    (v.x * 0.299 + v.y * 0.587 + v.z * 0.114) / 255.0
}
