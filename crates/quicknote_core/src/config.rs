//! Client configuration.
//!
//! # Responsibility
//! - Hold the base endpoint and status policy injected into `NotesClient`.
//! - Resolve per-environment overrides from process environment.
//!
//! # Invariants
//! - The base endpoint is an absolute `http`/`https` URL.
//! - Delete targets are always derived as one path segment beneath the base.

use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// Environment variable names.
pub mod env_vars {
    /// Base endpoint of the notes API, e.g. `https://host/api/notes`.
    pub const API_URL: &str = "QUICKNOTE_API_URL";
    /// `strict` or `lenient`; see [`super::StatusPolicy`].
    pub const STATUS_POLICY: &str = "QUICKNOTE_STATUS_POLICY";
}

/// How non-2xx responses to mutations are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any non-2xx status is an operation failure.
    #[default]
    Strict,
    /// Create/delete responses are not inspected; only transport errors fail.
    Lenient,
}

impl StatusPolicy {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(ConfigError::InvalidStatusPolicy(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingBaseUrl,
    InvalidBaseUrl(String),
    InvalidStatusPolicy(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBaseUrl => write!(
                f,
                "notes API base URL is not set; pass --base-url or set {}",
                env_vars::API_URL
            ),
            Self::InvalidBaseUrl(details) => write!(f, "invalid notes API base URL: {details}"),
            Self::InvalidStatusPolicy(value) => write!(
                f,
                "unsupported status policy `{value}`; expected strict|lenient"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Explicit configuration passed to the client at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    status_policy: StatusPolicy,
}

impl ClientConfig {
    /// Parses and checks the base endpoint.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        let parsed = Url::parse(trimmed)
            .map_err(|err| ConfigError::InvalidBaseUrl(format!("{trimmed}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "{trimmed}: scheme must be http or https"
            )));
        }
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "{trimmed}: cannot be used as a base"
            )));
        }
        Ok(Self {
            base_url: parsed,
            status_policy: StatusPolicy::default(),
        })
    }

    /// Builds a config from `QUICKNOTE_API_URL` and `QUICKNOTE_STATUS_POLICY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var(env_vars::API_URL).map_err(|_| ConfigError::MissingBaseUrl)?;
        let mut config = Self::new(&base)?;
        if let Ok(raw) = std::env::var(env_vars::STATUS_POLICY) {
            if !raw.trim().is_empty() {
                config.status_policy = StatusPolicy::parse(&raw)?;
            }
        }
        Ok(config)
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Collection address used for list and create.
    pub fn collection_url(&self) -> Url {
        self.base_url.clone()
    }

    /// `{base}/{id}`, with `id` encoded as a single path segment.
    pub fn note_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }
}
