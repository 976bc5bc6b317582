//! AI segment results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Wire names of the fields every segment result must carry, in schema order.
pub const SEGMENT_RESULT_FIELDS: [&str; 4] = ["question", "startTime", "endTime", "reasoning"];

/// A time range inside the source video that answers one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResult {
    /// The question as echoed back by the model
    pub question: String,

    /// Start timestamp (HH:MM:SS)
    pub start_time: String,

    /// End timestamp (HH:MM:SS)
    pub end_time: String,

    /// Why the model picked this range
    pub reasoning: String,
}

impl SegmentResult {
    pub fn new(
        question: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            reasoning: reasoning.into(),
        }
    }

    /// True if this result answers `question` (compared on trimmed text).
    pub fn answers(&self, question: &str) -> bool {
        self.question.trim() == question.trim()
    }
}
