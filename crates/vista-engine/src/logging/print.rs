/// Verbosity of a printed message.
///
/// `Quiet` messages are never emitted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub enum VerboseLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Quiet,
}

impl VerboseLevel {
    /// The `log` level used for this verbosity, if any.
    pub fn as_log_level(self) -> Option<log::Level> {
        match self {
            VerboseLevel::Debug => Some(log::Level::Debug),
            VerboseLevel::Info => Some(log::Level::Info),
            VerboseLevel::Warn => Some(log::Level::Warn),
            VerboseLevel::Error => Some(log::Level::Error),
            VerboseLevel::Quiet => None,
        }
    }
}

/// Emits a human-readable, possibly multi-line message at `level`.
///
/// Trailing newlines are trimmed so descriptions built line by line do not
/// produce empty records.
pub fn print(level: VerboseLevel, message: &str) {
    let Some(level) = level.as_log_level() else {
        return;
    };

    let message = message.trim_end_matches('\n');
    if message.is_empty() {
        return;
    }

    log::log!(target: "vista", level, "{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_has_no_log_level() {
        assert_eq!(VerboseLevel::Quiet.as_log_level(), None);
    }

    #[test]
    fn levels_map_onto_log_levels() {
        assert_eq!(VerboseLevel::Debug.as_log_level(), Some(log::Level::Debug));
        assert_eq!(VerboseLevel::Error.as_log_level(), Some(log::Level::Error));
    }

    #[test]
    fn default_is_info() {
        assert_eq!(VerboseLevel::default(), VerboseLevel::Info);
    }
}
