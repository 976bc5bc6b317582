//! Gemini segment finder.
//!
//! This crate provides:
//! - Environment-driven Gemini configuration
//! - The `generateContent` wire types and response schema directive
//! - `SegmentFinder`, which sends one request per batch of questions and
//!   re-validates the returned segments
//! - Request metrics

pub mod client;
pub mod config;
pub mod error;
pub mod gemini;
pub mod metrics;
pub mod prompt;
pub mod validation;

pub use client::{FindSegments, FinderState, SegmentFinder};
pub use config::{CorrespondencePolicy, GeminiConfig};
pub use error::{AnalysisFailure, SegmentFinderError, SegmentFinderResult};
