//! Typed errors for release-actions.
//!
//! Commands propagate `color_eyre` reports, but failures that callers may
//! want to tell apart (rate limits, missing credentials, bad versions) are
//! raised as [`ActionsError`] first and converted with `?`.

use thiserror::Error;

/// Main error type for release-actions operations.
#[derive(Error, Debug)]
pub enum ActionsError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Changelog errors
    #[error("Failed to parse changelog: {0}")]
    ParseError(String),

    #[error("Invalid version format: {0}")]
    InvalidVersion(#[from] semver::Error),

    #[error("Milestone not found: {0}")]
    MilestoneNotFound(String),

    // Forge errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("Invalid git remote URL: {0}")]
    InvalidRemoteUrl(String),

    #[error("Git URL parse error: {0}")]
    GitUrlError(#[from] git_url_parse::GitUrlParseError),

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("Forum request failed: {0}")]
    ForumError(String),

    // CSV output errors
    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),
}

impl ActionsError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }

    /// Create a changelog parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a forum error
    pub fn forum(msg: impl Into<String>) -> Self {
        Self::ForumError(msg.into())
    }
}

// Implement From for reqwest errors (network/API)
impl From<reqwest::Error> for ActionsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            return Self::NetworkError(err.to_string());
        }

        match err.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => Self::AuthenticationError(err.to_string()),
            Some(429) => Self::RateLimitExceeded,
            _ => Self::NetworkError(err.to_string()),
        }
    }
}

// Implement From for reqwest header errors (needs custom message)
impl From<reqwest::header::InvalidHeaderValue> for ActionsError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::AuthenticationError(format!("Invalid header value: {}", err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for ActionsError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
