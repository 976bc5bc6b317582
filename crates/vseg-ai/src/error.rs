//! Segment finder error types.

use thiserror::Error;

/// Result type for segment finder operations.
pub type SegmentFinderResult<T> = Result<T, SegmentFinderError>;

/// Errors reported to callers of the segment finder.
///
/// Every remote or parsing problem collapses into `Analysis`, whose message
/// stays generic. The underlying [`AnalysisFailure`] is logged where it
/// happens and can be inspected with [`SegmentFinderError::failure`], but it
/// is deliberately not exposed as the error `source()`.
#[derive(Debug, Error)]
pub enum SegmentFinderError {
    #[error("Service credential is not configured")]
    Configuration,

    #[error("Failed to get analysis from AI")]
    Analysis(AnalysisFailure),
}

impl SegmentFinderError {
    pub fn analysis(failure: AnalysisFailure) -> Self {
        Self::Analysis(failure)
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, SegmentFinderError::Configuration)
    }

    /// The concrete cause of an `Analysis` error.
    pub fn failure(&self) -> Option<&AnalysisFailure> {
        match self {
            SegmentFinderError::Analysis(failure) => Some(failure),
            SegmentFinderError::Configuration => None,
        }
    }
}

/// Why an analysis request failed. For diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisFailure {
    #[error("Gemini API request failed: {0}")]
    Transport(String),

    #[error("Gemini API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No content in Gemini response")]
    EmptyResponse,

    #[error("Failed to parse segments JSON: {0}")]
    MalformedJson(String),

    #[error("Response does not match the segment schema: {0}")]
    SchemaMismatch(String),

    #[error("Invalid timestamps in result {index}: {reason}")]
    InvalidTimestamps { index: usize, reason: String },

    #[error("Results do not correspond to the questions: {0}")]
    Correspondence(String),

    #[error("No questions to analyze")]
    EmptyBatch,
}
