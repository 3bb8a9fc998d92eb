//! Rendering adapter: what a frame draws, independent of the GPU API.
//!
//! # Invariants
//! - The renderer never mutates program state; a frame is planned from
//!   [`FrameOptions`] and fed by [`FrameInputs`] derived from the state.
//! - The skybox is the last world draw of every frame.
//! - Within a pass, alpha-cutout draws follow every opaque draw.
//! - A pass that keeps existing depth is preceded by the depth copy.
//!
//! Backends execute a [`FramePlan`] pass by pass. [`PlanTextRenderer`]
//! is the reference backend: it produces a readable frame dump.

mod frame;
mod path;
mod plan;
mod renderer;
mod shading;

pub use frame::{FrameInputs, ObjectInstance};
pub use path::{ParsePathError, RenderPath};
pub use plan::{Draw, DrawItem, FrameOptions, FramePlan, Load, Pass, PassKind, plan_frame};
pub use renderer::{PlanTextRenderer, Renderer};
pub use shading::{Blend, Cull, DepthTest, DrawState, RenderTarget, Shading};

/// Errors raised when a frame cannot be executed.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid frame plan: {0}")]
    InvalidPlan(String),
    #[error("no geometry loaded for {0}")]
    MissingGeometry(String),
}
