//! ---------------------------------------------------------------------------
//! Software (CPU) grid raycaster
//!
//! * Fills a `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Walls come from one DDA ray per column and leave their perpendicular
//!   distance in a per-column Z-buffer; sprites are depth-tested against it
//!   and drawn back-to-front.
//! * All mutable frame state (pixels, Z-buffer, sprite list) lives in the
//!   [`Software`] context; nothing is global.
//! ---------------------------------------------------------------------------

mod lighting;
mod planes;
mod postfx;
mod renderer;
pub mod shaders;
mod sprites;
mod viewmodel;
mod walls;

pub use lighting::{LIGHT_RADIUS_SQ, LightSource, Lights, Shading, collect_lights};
pub use renderer::{FrameStats, Software};
pub use shaders::{ShaderFn, ShaderInput, ShaderKey, ShaderParams, ShaderRegistry};
pub use sprites::VisSprite;
pub use walls::{Side, WallHit, cast_ray};
