// Repository of the procedurally generated textures.
// The renderer and world logic interact through `TextureId` only.

use std::collections::HashMap;

use crate::renderer::Rgba;
use crate::world::map::{MAX_MATERIAL, MaterialId};

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// Edge length of every generated texture.
pub const TEX_SIZE: usize = 64;

/// Ids of the shared plane textures; they follow the eight wall textures.
pub const FLOOR_TEXTURE: TextureId = 8;
pub const CEILING_TEXTURE: TextureId = 9;

/// Wall texture for a nonzero material (`1` → id `0`). Out-of-range
/// materials fall back to the nearest wall texture, never a plane texture.
#[inline]
pub fn wall_texture(material: MaterialId) -> TextureId {
    (material.clamp(1, MAX_MATERIAL) - 1) as TextureId
}

/// CPU-side storage: 32-bit **ARGB** (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    name: String,
    w: usize,
    h: usize,
    pixels: Vec<Rgba>,
}

impl Texture {
    /// Wrap a texel array. Both sides must be powers of two so sampling can
    /// wrap with a bitmask.
    pub fn new<S: Into<String>>(
        name: S,
        w: usize,
        h: usize,
        pixels: Vec<Rgba>,
    ) -> Result<Self, TextureError> {
        if !w.is_power_of_two() || !h.is_power_of_two() || pixels.len() != w * h {
            return Err(TextureError::BadSize(w, h));
        }
        Ok(Self {
            name: name.into(),
            w,
            h,
            pixels,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Texel at integer coordinates, wrapped into range.
    #[inline(always)]
    pub fn sample(&self, u: i32, v: i32) -> Rgba {
        let x = (u as usize) & (self.w - 1);
        let y = (v as usize) & (self.h - 1);
        self.pixels[y * self.w + x]
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Dimensions are not powers of two or disagree with the pixel count.
    #[error("texture size {0}x{1} is not a power of two or mismatches its pixels")]
    BadSize(usize, usize),
}

/// Texture atlas: eight wall materials, then floor and ceiling.
///
/// * Filled once at startup (see [`crate::world::procgen::build_bank`]).
/// * Offers no mutable texel access; the renderer borrows it shared for
///   every frame.
#[derive(Debug, Default)]
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Obtain the id for a texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under its own name.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert(&mut self, tex: Texture) -> Result<TextureId, TextureError> {
        if self.by_name.contains_key(&tex.name) {
            return Err(TextureError::Duplicate(tex.name));
        }
        let id = self.data.len() as TextureId;
        self.by_name.insert(tex.name.clone(), id);
        self.data.push(tex);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tex(name: &str, color: Rgba) -> Texture {
        Texture::new(name, 2, 2, vec![color; 4]).unwrap()
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::new();
        let red = bank.insert(dummy_tex("RED", 0xFF_FF0000)).unwrap();
        let blue = bank.insert(dummy_tex("BLUE", 0xFF_0000FF)).unwrap();

        assert_ne!(blue, red);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("BLUE"), Some(blue));
        assert_eq!(bank.id("NOPE"), None);

        assert_eq!(bank.texture(red).unwrap().pixels()[0], 0xFF_FF0000);
        assert_eq!(bank.texture(blue).unwrap().pixels()[0], 0xFF_0000FF);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::new();
        bank.insert(dummy_tex("WOOD", 1)).unwrap();
        let err = bank.insert(dummy_tex("WOOD", 2)).unwrap_err();
        assert_eq!(err, TextureError::Duplicate("WOOD".into()));
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn bad_id_guard() {
        let bank = TextureBank::new();
        let bad = TextureId::MAX;
        assert_eq!(bank.texture(bad).unwrap_err(), TextureError::BadId(bad));
    }

    #[test]
    fn non_power_of_two_rejected() {
        assert_eq!(
            Texture::new("ODD", 3, 4, vec![0; 12]).unwrap_err(),
            TextureError::BadSize(3, 4)
        );
        assert_eq!(
            Texture::new("SHORT", 4, 4, vec![0; 3]).unwrap_err(),
            TextureError::BadSize(4, 4)
        );
    }

    #[test]
    fn sampling_wraps() {
        let mut px = vec![0; 16];
        px[1 * 4 + 3] = 7;
        let tex = Texture::new("W", 4, 4, px).unwrap();
        assert_eq!(tex.sample(3, 1), 7);
        assert_eq!(tex.sample(-1, 5), 7);
        assert_eq!(tex.sample(7, -3), 7);
    }

    #[test]
    fn material_to_texture_id() {
        assert_eq!(wall_texture(1), 0);
        assert_eq!(wall_texture(8), 7);
    }

    #[test]
    fn out_of_range_material_keeps_a_wall_texture() {
        assert_eq!(wall_texture(9), 7, "must not alias FLOOR_TEXTURE");
        assert_eq!(wall_texture(12), 7);
        assert_eq!(wall_texture(0), 0);
    }

    #[test]
    fn accessors_report_checked_size() {
        let tex = Texture::new("T", 8, 4, vec![3; 32]).unwrap();
        assert_eq!((tex.name(), tex.width(), tex.height()), ("T", 8, 4));
        assert_eq!(tex.pixels().len(), 32);
    }
}
