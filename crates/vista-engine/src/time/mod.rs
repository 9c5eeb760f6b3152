//! Frame timing for the on-screen FPS timer.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
