use serde::{Deserialize, Serialize};

/// Body of the lyrics routes: `{"lyrics": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsResponse {
    /// Lyrics text, trimmed.
    pub lyrics: String,
}

impl LyricsResponse {
    /// Wrap lyrics text in a response body.
    pub fn new(lyrics: impl Into<String>) -> Self {
        Self {
            lyrics: lyrics.into(),
        }
    }
}

/// Body of `/health`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `OK`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Build time (UTC, RFC 2822).
    pub built_at: &'static str,
}
