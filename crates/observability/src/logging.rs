//! Logging initialization
//!
//! One `tracing` subscriber per process, filtered by `RUST_LOG` and
//! rendered in one of three formats.

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Directives used when `RUST_LOG` is unset or unparsable.
///
/// `tower_http` is raised to debug so each HTTP request is logged by the
/// trace layer.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=debug";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable with colors, file and line (default)
    #[default]
    Pretty,
    /// One JSON object per event, span fields flattened in
    Json,
    /// Single line per event
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown log format: {}", s))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber
///
/// # Arguments
///
/// * `service_name` - Logged once at startup to identify the process
/// * `format` - Output format
///
/// # Environment Variables
///
/// * `RUST_LOG` - Filter directives (e.g. `debug`, `settings=debug,info`)
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(service_name: &str, format: LogFormat) -> anyhow::Result<()> {
    let output = match format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .flatten_event(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(output)
        .try_init()?;

    tracing::info!(
        service = service_name,
        format = format.as_str(),
        "Logging initialized"
    );

    Ok(())
}
