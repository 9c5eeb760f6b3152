use std::path::PathBuf;

use crate::options::OptionError;

/// Errors reported by [`Window`](crate::Window) operations.
///
/// Collaborator errors (options, image decoding, rendering engine) are carried
/// through as-is.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// The requested window type cannot be built with this configuration.
    #[error("no window: {0}")]
    NoWindow(String),

    #[error(transparent)]
    Option(#[from] OptionError),

    #[error("cannot create cache directory {}: {source}", path.display())]
    CacheDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode window icon: {0}")]
    Icon(#[from] image::ImageError),

    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}
