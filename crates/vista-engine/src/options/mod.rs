//! Option snapshot access.
//!
//! The window never stores option values: it queries an [`OptionsProvider`]
//! by key on every synchronization pass. [`Options`] is an in-memory provider
//! pre-filled with the viewer defaults.

mod provider;
mod snapshot;

pub use provider::{OptionError, OptionKind, OptionValue, OptionsProvider};
pub use snapshot::Options;
