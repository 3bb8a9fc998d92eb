//! Scene: the one fixed tabletop scene and the program state that drives it.
//!
//! # Invariants
//! - Object placements are constants; only the cup transform is user-editable.
//! - The renderer reads scene state and never mutates it.

pub mod camera;
pub mod layout;
pub mod lights;
pub mod state;

pub use camera::{CameraMovement, FlyCamera};
pub use layout::{Material, SceneObject};
pub use lights::{Attenuation, DeferredLight, DirLight, PointLight, SpotLight, MATERIAL_SHININESS};
pub use state::ProgramState;
