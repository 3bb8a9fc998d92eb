//! Input: window-system keys and mouse motion mapped to demo actions.
//!
//! # Invariants
//! - The windowing layer translates raw events into [`Key`]s; everything
//!   after that works on [`Action`]s only.
//! - Toggles fire on key press; movement is sampled every frame while held.

pub mod action;
pub mod held;

pub use action::{Action, Key, action_for_key};
pub use held::{HeldMovement, KEYBOARD_SPEED_SCALE, look_offsets};
pub use tabletop_scene::CameraMovement;
