//! Rendering module
//!
//! The simulation never draws. A frame is turned into an ordered list of
//! line strokes that any `RenderTarget` can replay.

pub mod commands;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasTarget;
pub use commands::{CommandList, DrawCommand, RenderTarget};
pub use frame::render_frame;
