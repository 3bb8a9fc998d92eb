//! wgpu render backend for the tabletop scene.
//!
//! Executes a [`tabletop_render::FramePlan`]: the geometry pass fills the
//! G-buffer, a full-screen pass resolves lighting, and the G-buffer depth
//! is copied into the scene depth so forward draws occlude correctly.
//!
//! # Invariants
//! - The renderer never mutates program state.
//! - The G-buffer and scene depth always match the surface size.
//! - Uniform layouts mirror the WGSL structs byte for byte.

mod gbuffer;
mod mesh;
mod renderer;
mod shaders;
mod state;
mod texture;
mod uniforms;

pub use renderer::{SceneRenderer, clear_value};
