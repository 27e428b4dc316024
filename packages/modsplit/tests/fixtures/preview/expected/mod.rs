//! Preview rendering system
//!
//! Generates composited preview frames for the current timeline time.

mod renderer;
mod cache;
mod layers;
mod types;
mod utils;

pub use renderer::PreviewRenderer;
pub use cache::FrameCache;
#[allow(unused_imports)]
pub use layers::PendingDecode;
pub use types::*;
pub use utils::*;
