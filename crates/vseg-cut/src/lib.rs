//! Cut sessions for the video processor.
//!
//! This crate provides:
//! - `VideoCutSession`: AI cut (questions → segments → clips) and manual
//!   cut (time ranges → clips) behind one "is processing" guard
//! - Process bootstrap: tracing setup and the shared segment finder

pub mod bootstrap;
pub mod error;
pub mod session;

pub use bootstrap::{init_tracing, AppContext, LogFormat};
pub use error::{CutError, CutResult};
pub use session::{AiCutOutcome, AiCutRequest, ManualCutRequest, ProcessingFlag, VideoCutSession};
