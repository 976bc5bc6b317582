//! Cut session error types.

use thiserror::Error;
use vseg_ai::SegmentFinderError;
use vseg_models::TimestampError;

pub type CutResult<T> = Result<T, CutError>;

#[derive(Debug, Error)]
pub enum CutError {
    #[error("Please enter at least one question.")]
    NoQuestions,

    #[error("Please enter at least one time segment.")]
    NoSegments,

    #[error("Another request is already being processed.")]
    Busy,

    #[error("Segment {}: {}", .index + 1, .reason)]
    InvalidSegment {
        index: usize,
        #[source]
        reason: TimestampError,
    },

    #[error(transparent)]
    Finder(#[from] SegmentFinderError),
}

impl CutError {
    /// True for input problems the user can fix in the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CutError::NoQuestions | CutError::NoSegments | CutError::InvalidSegment { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use vseg_ai::AnalysisFailure;

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CutError::NoQuestions.to_string(),
            "Please enter at least one question."
        );

        let invalid = CutError::InvalidSegment {
            index: 1,
            reason: TimestampError::StartNotBeforeEnd,
        };
        assert_eq!(
            invalid.to_string(),
            "Segment 2: Start time must be before end time"
        );
        assert!(invalid.is_validation());
    }

    #[test]
    fn test_finder_errors_keep_generic_message() {
        let err: CutError =
            SegmentFinderError::analysis(AnalysisFailure::EmptyResponse).into();
        assert_eq!(err.to_string(), "Failed to get analysis from AI");
        assert!(!err.is_validation());
    }
}
