//! Vista engine crate.
//!
//! This crate owns the render window of the viewer: surface lifecycle,
//! renderer selection, per-frame option synchronization, screen/world
//! coordinate conversion and image capture.
//!
//! Rendering engines plug in through the traits in [`engine`]; two built-in
//! backends live in [`backend`].

pub mod backend;
pub mod camera;
pub mod coords;
pub mod engine;
pub mod logging;
pub mod options;
pub mod renderer;
pub mod time;
pub mod window;

mod capabilities;
mod error;

pub use capabilities::Capabilities;
pub use error::WindowError;
pub use window::{Image, Window};
