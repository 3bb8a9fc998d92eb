//! Shared value types used across the tabletop crates.

mod paths;
mod types;

pub use paths::ResourceRoot;
pub use types::{TextureId, Transform};
