//! Developer tooling: camera inspector and frame timing.
//!
//! # Invariants
//! - Tools only read program state.

mod inspector;
mod timer;

pub use inspector::CameraInfo;
pub use timer::{FrameTimer, MAX_FRAME_DELTA};
