//! Built-in [`Backend`](crate::engine::Backend) implementations.
//!
//! - [`headless`]: CPU-only, no window; used by tests and as a fallback.
//! - [`gpu`]: wgpu offscreen rendering with optional winit presentation.

pub mod gpu;
pub mod headless;

pub use gpu::{GpuBackend, GpuInit, Presentation};
pub use headless::{HeadlessBackend, HeadlessSurface};
