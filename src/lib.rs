//! Grid raycasting software renderer.
//!
//! * `world`    – tile map, camera pose, textures and the per-frame entity
//!   snapshot the renderer consumes.
//! * `renderer` – the CPU back-end that turns a [`renderer::Scene`] into an
//!   ARGB frame-buffer, plus the top-down minimap.
//! * `sim`      – a tiny demo simulation that feeds the viewer binary.

pub mod renderer;
pub mod sim;
pub mod world;
