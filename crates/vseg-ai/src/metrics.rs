//! Segment finder metrics.
//!
//! Recorded through the `metrics` facade; nothing is emitted unless the
//! host process installs a recorder.

use std::time::Duration;

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total segment finder invocations by outcome.
    pub const REQUESTS_TOTAL: &str = "segment_finder_requests_total";

    /// Gemini round-trip latency in seconds.
    pub const LATENCY_SECONDS: &str = "segment_finder_latency_seconds";
}

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Unconfigured,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Unconfigured => "unconfigured",
            Outcome::Failed => "failed",
        }
    }
}

/// Count an invocation that never reached the network.
pub fn record_rejected(outcome: Outcome) {
    counter!(names::REQUESTS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Count a completed Gemini round trip and record its latency.
pub fn record_request(outcome: Outcome, latency: Duration) {
    counter!(names::REQUESTS_TOTAL, "outcome" => outcome.as_str()).increment(1);
    histogram!(names::LATENCY_SECONDS).record(latency.as_secs_f64());
}
