//! The render window.
//!
//! [`Window`] owns the surface and the attached renderer. Every render or
//! capture first makes sure a renderer exists, then pushes the option
//! snapshot into it through [`sync`], then draws.

mod export;
mod lifecycle;
pub mod sync;

pub use export::Image;
pub use lifecycle::Window;
