use std::sync::Once;

use super::VerboseLevel;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g.
/// "vista_engine=debug,wgpu=warn") and wins over `RUST_LOG` and `verbose`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,

    /// Lowest level shown when no filter is given. `Quiet` turns logging off.
    pub verbose: VerboseLevel,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            verbose: VerboseLevel::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_verbose(verbose: VerboseLevel) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    fn level_filter(&self) -> log::LevelFilter {
        self.verbose
            .as_log_level()
            .map_or(log::LevelFilter::Off, |level| level.to_level_filter())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.clone().or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                let level = config.level_filter();
                // wgpu is chatty below warn.
                builder
                    .filter_level(level)
                    .filter_module("wgpu_core", level.min(log::LevelFilter::Warn))
                    .filter_module("wgpu_hal", level.min(log::LevelFilter::Warn));
            }
        }

        builder.write_style(config.write_style);

        // The host application may have installed its own logger.
        if builder.try_init().is_err() {
            return;
        }
        log::debug!("logging initialized at {:?}", config.verbose);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_turns_logging_off() {
        let config = LoggingConfig::with_verbose(VerboseLevel::Quiet);
        assert_eq!(config.level_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn verbose_level_becomes_filter() {
        let config = LoggingConfig::with_verbose(VerboseLevel::Warn);
        assert_eq!(config.level_filter(), log::LevelFilter::Warn);
        assert_eq!(LoggingConfig::default().level_filter(), log::LevelFilter::Info);
    }
}
