//! Process bootstrap.
//!
//! Loads `.env`, sets up tracing, and constructs the one segment finder the
//! process shares.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vseg_ai::{FinderState, GeminiConfig, SegmentFinder};

use crate::session::VideoCutSession;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn,vseg=info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Colored human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT=json` selects JSON; anything else is pretty.
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .try_init(),
    }
}

/// Process-wide state: the shared segment finder.
#[derive(Debug, Clone)]
pub struct AppContext {
    finder: Arc<SegmentFinder>,
}

impl AppContext {
    pub fn new(config: GeminiConfig) -> Self {
        info!("Segment finder config: {:?}", config);
        Self {
            finder: Arc::new(SegmentFinder::new(config)),
        }
    }

    /// Load `.env` if present, then build from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::new(GeminiConfig::from_env())
    }

    pub fn finder(&self) -> Arc<SegmentFinder> {
        Arc::clone(&self.finder)
    }

    pub fn finder_state(&self) -> FinderState {
        self.finder.state()
    }

    /// A fresh cut session backed by the shared finder.
    pub fn cut_session(&self) -> VideoCutSession {
        VideoCutSession::new(self.finder())
    }
}
