//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! Each frame it fills a [`Scene`] with borrowed world state and hands it to
//! a type that implements [`Renderer`].
//!
//! * The simulation owns the map, camera and entities; the renderer only
//!   reads them for the duration of one call.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use crate::world::{
    CameraPose, LevelAtmosphere, Particle, RenderableEntity, TextureBank, TileMap, ViewModel,
};

pub mod color;
mod config;
mod effects;
pub mod minimap;
pub mod software;

pub use config::{PostFx, RenderConfig, TextureSeed};
pub use effects::{EffectTimer, ScreenEffects};
pub use minimap::Minimap;
pub use software::Software;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Everything one frame is drawn from.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub map: &'a TileMap,
    pub camera: &'a CameraPose,
    pub atmosphere: &'a LevelAtmosphere,
    pub entities: &'a [RenderableEntity],
    pub particles: &'a [Particle],
    pub view_model: Option<ViewModel>,
    /// Muzzle-flash brightness, 0 when the weapon is not firing.
    pub muzzle_flash: f32,
    pub effects: &'a ScreenEffects,
    /// Seconds since start; drives every animated term.
    pub time: f32,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Draw world, sprites, view model and post-processing for `scene`.
    fn draw_scene(&mut self, scene: &Scene<'_>, bank: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        scene: &Scene<'_>,
        bank: &TextureBank,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        self.draw_scene(scene, bank);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
