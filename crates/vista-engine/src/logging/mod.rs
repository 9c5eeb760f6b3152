//! Logging utilities.
//!
//! This module centralizes logger initialization and the leveled print sink
//! used for scene and coloring descriptions. Everything goes through the
//! standard `log` facade.

mod init;
mod print;

pub use init::{LoggingConfig, init_logging};
pub use print::{VerboseLevel, print};
