//! Manual time segments and the clips planned from segments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::segment::SegmentResult;

/// A time range typed in by the user on the manual cut form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimeSegment {
    pub id: Uuid,
    pub start: String,
    pub end: String,
}

impl TimeSegment {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// The row the manual cut form starts with: the first ten seconds.
    pub fn initial() -> Self {
        Self::new("00:00:00", "00:00:10")
    }
}

/// One contiguous range to cut out of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClipSpan {
    pub start: String,
    pub end: String,
}

/// A clip the cutter would produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlannedClip {
    pub id: String,
    pub title: String,
    /// Ranges concatenated into this clip, in order
    pub segments: Vec<ClipSpan>,
}

const MERGED_AI_ID: &str = "merged_ai";
const MERGED_MANUAL_ID: &str = "merged_manual";

/// Plan clips for AI segment results.
///
/// Without `merge` each result becomes its own clip; with `merge` every
/// result is concatenated into a single clip. No results, no clips.
pub fn plan_ai_clips(results: &[SegmentResult], merge: bool) -> Vec<PlannedClip> {
    if results.is_empty() {
        return Vec::new();
    }

    let span = |r: &SegmentResult| ClipSpan {
        start: r.start_time.clone(),
        end: r.end_time.clone(),
    };

    if merge {
        return vec![PlannedClip {
            id: MERGED_AI_ID.to_string(),
            title: "Merged Video (AI Cut)".to_string(),
            segments: results.iter().map(span).collect(),
        }];
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| PlannedClip {
            id: format!("ai_cut_{}", i),
            title: format!("Clip for: \"{}\"", r.question),
            segments: vec![span(r)],
        })
        .collect()
}

/// Plan clips for manual time segments. Segments are expected to be
/// validated already.
pub fn plan_manual_clips(segments: &[TimeSegment], merge: bool) -> Vec<PlannedClip> {
    if segments.is_empty() {
        return Vec::new();
    }

    let span = |s: &TimeSegment| ClipSpan {
        start: s.start.clone(),
        end: s.end.clone(),
    };

    if merge {
        return vec![PlannedClip {
            id: MERGED_MANUAL_ID.to_string(),
            title: "Merged Video (Manual Cut)".to_string(),
            segments: segments.iter().map(span).collect(),
        }];
    }

    segments
        .iter()
        .enumerate()
        .map(|(i, s)| PlannedClip {
            id: format!("manual_cut_{}", i),
            title: format!("Clip {} ({} - {})", i + 1, s.start, s.end),
            segments: vec![span(s)],
        })
        .collect()
}
