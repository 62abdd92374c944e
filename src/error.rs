#[cfg(feature = "api")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::{azlyrics::ScrapeError, genius::GeniusError, search::SearchError};

/// Main error type for the gateway
///
/// Only [`AppError::NotFound`] and [`AppError::Unauthorized`] have a status of
/// their own. Everything else is unclassified and answered with a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Upstream has no matching record, or the scrape rule found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing `Authorization` header, or the upstream rejected the token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// I/O errors (binding the listener, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Outbound HTTP failures (connect, TLS, body decoding)
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream answered with a status we do not map
    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus {
        /// The HTTP status returned by the upstream.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// HTML or payload could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required request input missing or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error body returned to callers: `{"error": "<kind>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error kind, e.g. `NotFound`
    pub error: String,
}

impl AppError {
    /// Stable, caller-visible name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::Unauthorized(_) => "Unauthorized",
            _ => "InternalServerError",
        }
    }

    /// Whether this error falls outside the not-found/unauthorized taxonomy
    pub fn is_unclassified(&self) -> bool {
        !matches!(self, Self::NotFound(_) | Self::Unauthorized(_))
    }

    #[cfg(feature = "api")]
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error to its JSON body
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind().to_string(),
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_unclassified() {
            tracing::error!(error = %self, "Unhandled error while serving request");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (self.status_code(), Json(self.to_body())).into_response()
    }
}

impl From<GeniusError> for AppError {
    fn from(err: GeniusError) -> Self {
        match err {
            GeniusError::NoResult(what) => AppError::NotFound(what),
            GeniusError::InvalidKey => AppError::Unauthorized("Genius rejected the token".to_string()),
            GeniusError::Status { status, url } => AppError::UpstreamStatus { status, url },
            GeniusError::Http(e) => AppError::Upstream(e),
            GeniusError::Parse(msg) => AppError::Parse(msg),
        }
    }
}

impl From<ScrapeError> for AppError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::NoMatch => AppError::NotFound("no lyrics block on page".to_string()),
            ScrapeError::Status { status, url } => AppError::UpstreamStatus { status, url },
            ScrapeError::Http(e) => AppError::Upstream(e),
            ScrapeError::Selector(msg) => AppError::Parse(msg),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Status { status, url } => AppError::UpstreamStatus { status, url },
            SearchError::Http(e) => AppError::Upstream(e),
            SearchError::Parse(msg) => AppError::Parse(msg),
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(AppError::NotFound("x".into()).kind(), "NotFound");
        assert_eq!(AppError::Unauthorized("x".into()).kind(), "Unauthorized");
        assert_eq!(AppError::Parse("x".into()).kind(), "InternalServerError");
    }

    #[test]
    fn test_genius_error_mapping() {
        assert!(matches!(
            AppError::from(GeniusError::NoResult("song 1".into())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(GeniusError::InvalidKey),
            AppError::Unauthorized(_)
        ));
        let err = AppError::from(GeniusError::Status {
            status: 502,
            url: "http://upstream/songs/1".into(),
        });
        assert!(err.is_unclassified());
    }

    #[test]
    fn test_scrape_no_match_is_not_found() {
        let err = AppError::from(ScrapeError::NoMatch);
        assert_eq!(err.to_body(), ErrorBody { error: "NotFound".into() });
    }

    #[cfg(feature = "api")]
    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidInput("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
