//! Speech-to-text transcripts and their plain-text rendering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One timed span of speech. Times are in seconds from the start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptionSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// A transcript: the full text plus its timed segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transcription {
    pub text: String,
    #[serde(default)]
    pub segments: Vec<TranscriptionSegment>,
}

/// Render a transcript for display or download.
///
/// With timestamps, each segment becomes `[HH:MM:SS --> HH:MM:SS] text` and
/// segments are separated by a blank line. Without timestamps, or when there
/// are no segments, the plain transcript text is returned.
pub fn render_transcript(transcription: &Transcription, with_timestamps: bool) -> String {
    if !with_timestamps || transcription.segments.is_empty() {
        return transcription.text.clone();
    }

    transcription
        .segments
        .iter()
        .map(|seg| {
            format!(
                "[{} --> {}] {}",
                floor_clock(seg.start),
                floor_clock(seg.end),
                seg.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `HH:MM:SS` with sub-second parts dropped.
fn floor_clock(seconds: f64) -> String {
    let whole = seconds.max(0.0).floor() as u64;
    format!(
        "{:02}:{:02}:{:02}",
        whole / 3600,
        (whole % 3600) / 60,
        whole % 60
    )
}
