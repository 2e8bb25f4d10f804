//! Presentation
//!
//! Builds pixel-space triangle lists from a simulation snapshot and draws them
//! with WebGPU. Text is handed to the DOM through the `hud` model.

pub mod ambient;
pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use ambient::AmbientLayer;
pub use hud::Hud;
pub use pipeline::RenderState;
pub use scene::{build_scene, shake_offset};
pub use vertex::Vertex;
