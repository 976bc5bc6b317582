//! Shared data models for the segment finder.
//!
//! This crate provides Serde-serializable types for:
//! - User questions and the AI segment results answering them
//! - Manual time segments entered by the user
//! - Planned clips derived from either source
//! - Timestamp parsing and validation
//! - Speech-to-text transcripts and their text rendering

pub mod clip;
pub mod question;
pub mod segment;
pub mod timestamp;
pub mod transcription;

// Re-export common types
pub use clip::{plan_ai_clips, plan_manual_clips, ClipSpan, PlannedClip, TimeSegment};
pub use question::{collect_question_texts, Question};
pub use segment::{SegmentResult, SEGMENT_RESULT_FIELDS};
pub use timestamp::{
    format_seconds, normalize_timestamp, parse_timestamp, validate_timestamps, TimestampError,
    ValidatedTimestamps,
};
pub use transcription::{render_transcript, Transcription, TranscriptionSegment};
