//! Video cut session.
//!
//! Mirrors the two cut forms of the video processor page. Both share a
//! single "is processing" flag, so a second submission while one is in
//! flight is refused instead of queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use scopeguard::ScopeGuard;
use tracing::{info, warn};
use vseg_ai::FindSegments;
use vseg_models::{
    collect_question_texts, plan_ai_clips, plan_manual_clips, validate_timestamps, PlannedClip,
    Question, SegmentResult, TimeSegment,
};

use crate::error::{CutError, CutResult};

/// Single-flight flag, cleared when the returned guard drops.
#[derive(Debug, Default)]
pub struct ProcessingFlag(AtomicBool);

impl ProcessingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag, or `None` if it is already set.
    pub fn try_begin(&self) -> Option<ScopeGuard<&AtomicBool, fn(&AtomicBool)>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(scopeguard::guard(&self.0, release as fn(&AtomicBool)))
    }
}

fn release(flag: &AtomicBool) {
    flag.store(false, Ordering::Release);
}

/// Input of the AI cut form.
#[derive(Debug, Clone, Default)]
pub struct AiCutRequest {
    /// Rows as entered; blank rows are dropped
    pub questions: Vec<Question>,
    /// Merge all segments into one clip
    pub merge: bool,
}

/// Result of an AI cut.
#[derive(Debug, Clone, PartialEq)]
pub struct AiCutOutcome {
    /// Segments as returned by the finder, in its order
    pub results: Vec<SegmentResult>,
    pub clips: Vec<PlannedClip>,
}

/// Input of the manual cut form.
#[derive(Debug, Clone)]
pub struct ManualCutRequest {
    pub segments: Vec<TimeSegment>,
    pub merge: bool,
    /// Source duration in seconds, when known
    pub video_duration: Option<f64>,
}

impl Default for ManualCutRequest {
    fn default() -> Self {
        Self {
            segments: vec![TimeSegment::initial()],
            merge: false,
            video_duration: None,
        }
    }
}

/// Cut session for one video.
pub struct VideoCutSession {
    finder: Arc<dyn FindSegments>,
    processing: ProcessingFlag,
}

impl VideoCutSession {
    pub fn new(finder: Arc<dyn FindSegments>) -> Self {
        Self {
            finder,
            processing: ProcessingFlag::default(),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_set()
    }

    /// Find segments for the non-blank questions and plan their clips.
    ///
    /// Fails with [`CutError::NoQuestions`] before touching the finder when
    /// every row is blank.
    pub async fn process_ai(&self, request: &AiCutRequest) -> CutResult<AiCutOutcome> {
        let questions = collect_question_texts(&request.questions);
        if questions.is_empty() {
            return Err(CutError::NoQuestions);
        }

        let _processing = self.begin()?;
        info!(
            questions = questions.len(),
            merge = request.merge,
            "Analyzing questions with AI"
        );

        let results = self.finder.find_segments(&questions).await?;
        let clips = plan_ai_clips(&results, request.merge);
        info!(
            results = results.len(),
            clips = clips.len(),
            "AI analysis complete, clips planned"
        );

        Ok(AiCutOutcome { results, clips })
    }

    /// Validate the manual time segments and plan their clips.
    ///
    /// Segments come back normalized to `HH:MM:SS`.
    pub fn process_manual(&self, request: &ManualCutRequest) -> CutResult<Vec<PlannedClip>> {
        if request.segments.is_empty() {
            return Err(CutError::NoSegments);
        }

        let _processing = self.begin()?;

        let segments = request
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| -> CutResult<TimeSegment> {
                let times =
                    validate_timestamps(&segment.start, &segment.end, request.video_duration)
                        .map_err(|reason| CutError::InvalidSegment { index, reason })?;
                Ok(TimeSegment {
                    id: segment.id,
                    start: times.start,
                    end: times.end,
                })
            })
            .collect::<CutResult<Vec<_>>>()?;

        let clips = plan_manual_clips(&segments, request.merge);
        info!(
            segments = segments.len(),
            clips = clips.len(),
            "Manual cut planned"
        );
        Ok(clips)
    }

    fn begin(&self) -> CutResult<ScopeGuard<&AtomicBool, fn(&AtomicBool)>> {
        self.processing.try_begin().ok_or_else(|| {
            warn!("Rejected submission while another is processing");
            CutError::Busy
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_clears_on_drop() {
        let flag = ProcessingFlag::default();
        {
            let _guard = flag.try_begin().unwrap();
            assert!(flag.is_set());
            assert!(flag.try_begin().is_none());
        }
        assert!(!flag.is_set());
        assert!(flag.try_begin().is_some());
    }

    #[test]
    fn test_default_manual_request_is_first_ten_seconds() {
        let request = ManualCutRequest::default();
        assert_eq!(request.segments.len(), 1);
        assert_eq!(request.segments[0].start, "00:00:00");
        assert_eq!(request.segments[0].end, "00:00:10");
    }
}
