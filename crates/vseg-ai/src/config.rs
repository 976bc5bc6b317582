//! Gemini client configuration.

use std::fmt;
use std::str::FromStr;

use tracing::warn;
use url::Url;

/// Model used when `GEMINI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Env vars checked for the credential, in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// What to do when the returned results do not line up one-to-one with
/// the submitted questions (count differs, or a result names a question
/// that was never asked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrespondencePolicy {
    /// Log a warning and return the results as-is.
    #[default]
    Warn,
    /// Fail the whole batch.
    Reject,
}

impl FromStr for CorrespondencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown correspondence policy '{}'", other)),
        }
    }
}

/// Segment finder configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential; `None` leaves the finder unconfigured
    pub api_key: Option<String>,
    /// Model name used in the request path
    pub model: String,
    /// Scheme and host of the API, without trailing slash
    pub base_url: String,
    pub correspondence: CorrespondencePolicy,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            correspondence: CorrespondencePolicy::default(),
        }
    }
}

// The credential never reaches logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("correspondence", &self.correspondence)
            .finish()
    }
}

impl GeminiConfig {
    /// Create config from environment variables.
    ///
    /// Invalid optional values fall back to their defaults with a warning.
    /// A missing credential is not an error here; the finder reports it on
    /// use.
    pub fn from_env() -> Self {
        let api_key = API_KEY_VARS.iter().find_map(|name| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        });

        let model = std::env::var("GEMINI_MODEL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = match std::env::var("GEMINI_BASE_URL") {
            Ok(raw) => parse_base_url(&raw).unwrap_or_else(|e| {
                warn!("Ignoring GEMINI_BASE_URL: {}", e);
                DEFAULT_BASE_URL.to_string()
            }),
            Err(_) => DEFAULT_BASE_URL.to_string(),
        };

        let correspondence = match std::env::var("SEGMENT_CORRESPONDENCE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring SEGMENT_CORRESPONDENCE: {}", e);
                CorrespondencePolicy::default()
            }),
            Err(_) => CorrespondencePolicy::default(),
        };

        Self {
            api_key,
            model,
            base_url,
            correspondence,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_correspondence(mut self, policy: CorrespondencePolicy) -> Self {
        self.correspondence = policy;
        self
    }

    /// True if a non-blank credential is present.
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn parse_base_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("'{}' is not a URL: {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_string()),
        scheme => Err(format!("unsupported scheme '{}'", scheme)),
    }
}
