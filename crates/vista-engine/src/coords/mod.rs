//! Coordinate types and screen/world conversion.
//!
//! Spaces:
//! - World: right-handed, double precision.
//! - Display: physical pixels of the surface, origin bottom-left, +Y up,
//!   depth in `[0, 1]` (0 at the near plane).
//!
//! Conversions go through a [`Projector`], implemented by every renderer.

mod transform;
mod viewport;

pub use glam::{DVec3, DVec4};
pub use transform::{HOMOGENEOUS_THRESHOLD, Projector, display_from_world, world_from_display};
pub use viewport::Viewport;
