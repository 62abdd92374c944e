use serde::{Deserialize, Serialize};

/// Kind tag carried by every search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    /// A standard (non-ad, non-dictionary) web result.
    Organic,
}

/// One organic web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    /// Always [`ResultType::Organic`].
    #[serde(rename = "type")]
    pub kind: ResultType,
    /// Title of the linked page.
    pub title: String,
    /// Absolute URL of the linked page.
    pub link: String,
    /// Snippet shown under the title, when the engine provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OrganicResult {
    /// Creates an organic result.
    pub fn new(title: impl Into<String>, link: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind: ResultType::Organic,
            title: title.into(),
            link: link.into(),
            description,
        }
    }
}
