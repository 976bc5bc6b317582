//! Gemini segment finder client.
//!
//! One `generateContent` request per batch of questions:
//! - fixed system instruction plus a bulleted prompt of all questions
//! - JSON response schema declared to the model
//! - reply re-validated locally, then checked against the questions
//!
//! No retries and no partial results: any failure fails the batch.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info, info_span, warn, Instrument};
use vseg_models::SegmentResult;

use crate::config::{CorrespondencePolicy, GeminiConfig};
use crate::error::{AnalysisFailure, SegmentFinderError, SegmentFinderResult};
use crate::gemini::{segment_results_schema, GenerateContentRequest, GenerateContentResponse};
use crate::metrics::{record_rejected, record_request, Outcome};
use crate::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::validation::{correspondence_mismatch, parse_segment_results};

/// Anything that can map questions to video segments.
#[async_trait]
pub trait FindSegments: Send + Sync {
    /// Find one segment per question in a single request.
    ///
    /// Callers filter blank questions first. Results are not guaranteed to
    /// be in input order; match them by question text.
    async fn find_segments(&self, questions: &[String]) -> SegmentFinderResult<Vec<SegmentResult>>;
}

/// Lifecycle state fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderState {
    /// Credential present; calls go to the network.
    Ready,
    /// No credential; every call fails with a configuration error.
    Unconfigured,
}

/// Gemini-backed [`FindSegments`] implementation.
///
/// Construct once at startup and share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SegmentFinder {
    http: Client,
    config: GeminiConfig,
    endpoint: String,
}

impl SegmentFinder {
    /// Create a finder. A missing credential is logged here and reported
    /// on every call.
    pub fn new(config: GeminiConfig) -> Self {
        if !config.has_credential() {
            warn!("Gemini API key not found in environment variables; segment finding is disabled");
        }

        let endpoint = config.endpoint();
        Self {
            http: Client::new(),
            config,
            endpoint,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    pub fn state(&self) -> FinderState {
        if self.config.has_credential() {
            FinderState::Ready
        } else {
            FinderState::Unconfigured
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Send the request and validate the reply.
    async fn request_segments(
        &self,
        api_key: &str,
        questions: &[String],
    ) -> Result<Vec<SegmentResult>, AnalysisFailure> {
        let request = GenerateContentRequest::json_reply(
            SYSTEM_INSTRUCTION,
            build_prompt(questions),
            segment_results_schema(),
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisFailure::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = response.json().await.map_err(|e| {
            AnalysisFailure::MalformedJson(format!(
                "Gemini response envelope: {}",
                e.without_url()
            ))
        })?;

        let text = envelope.text().ok_or(AnalysisFailure::EmptyResponse)?;
        let results = parse_segment_results(&text)?;
        self.check_correspondence(questions, results)
    }

    fn check_correspondence(
        &self,
        questions: &[String],
        results: Vec<SegmentResult>,
    ) -> Result<Vec<SegmentResult>, AnalysisFailure> {
        let Some(mismatch) = correspondence_mismatch(questions, &results) else {
            return Ok(results);
        };

        match self.config.correspondence {
            CorrespondencePolicy::Warn => {
                warn!(%mismatch, "Segment results do not line up with the questions");
                Ok(results)
            }
            CorrespondencePolicy::Reject => Err(AnalysisFailure::Correspondence(mismatch)),
        }
    }
}

#[async_trait]
impl FindSegments for SegmentFinder {
    async fn find_segments(&self, questions: &[String]) -> SegmentFinderResult<Vec<SegmentResult>> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            record_rejected(Outcome::Unconfigured);
            return Err(SegmentFinderError::Configuration);
        };

        if questions.is_empty() {
            error!("find_segments called without questions");
            record_rejected(Outcome::Failed);
            return Err(SegmentFinderError::analysis(AnalysisFailure::EmptyBatch));
        }

        let span = info_span!(
            "find_segments",
            model = %self.config.model,
            questions = questions.len()
        );

        async move {
            let started = Instant::now();
            match self.request_segments(api_key, questions).await {
                Ok(results) => {
                    record_request(Outcome::Success, started.elapsed());
                    info!(results = results.len(), "Segment analysis complete");
                    Ok(results)
                }
                Err(failure) => {
                    record_request(Outcome::Failed, started.elapsed());
                    error!(error = %failure, "Error calling Gemini API");
                    Err(SegmentFinderError::analysis(failure))
                }
            }
        }
        .instrument(span)
        .await
    }
}
