//! Camera handle and the projection state it binds to.
//!
//! Each renderer owns a [`CameraState`] behind a [`SharedCameraState`]. The
//! window's [`Camera`] keeps its identity across renderer swaps and is rebound
//! to the new renderer's state on every initialization.

mod handle;
mod state;

pub use handle::Camera;
pub use state::{CameraState, SharedCameraState};
