//! AZLyrics page scraping
//!
//! AZLyrics has no API. Its song template puts the lyrics in an unnamed
//! `<div>` right after two `<br>` tags, which is what [`LYRICS_RULE`] targets.
//! When the markup changes only that rule needs to follow.

use scraper::{Html, Selector};

/// CSS rule locating the lyrics block on a song page
pub const LYRICS_RULE: &str = "br + br + div";

/// Failures while scraping a lyrics page
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Nothing on the page matched [`LYRICS_RULE`]
    #[error("lyrics block not found")]
    NoMatch,

    /// The page answered with a non-success status
    #[error("page returned {status} for {url}")]
    Status {
        /// The HTTP status returned.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// Transport failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The extraction rule itself is invalid
    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Download the raw HTML of a page
///
/// The URL is used as supplied by the caller.
#[tracing::instrument(skip(http))]
pub async fn fetch_page(http: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    let response = http.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.text().await?)
}

/// Apply [`LYRICS_RULE`] to a page and return the trimmed text of the first match
pub fn extract_lyrics(html: &str) -> Result<String, ScrapeError> {
    extract_with_rule(html, LYRICS_RULE)
}

/// Return the trimmed text of the first element matching `rule`
pub fn extract_with_rule(html: &str, rule: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(rule).map_err(|e| ScrapeError::Selector(e.to_string()))?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .ok_or(ScrapeError::NoMatch)
}

/// Fetch a lyrics page and extract its lyrics block
pub async fn scrape_lyrics(http: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    let html = fetch_page(http, url).await?;
    let lyrics = extract_lyrics(&html)?;

    tracing::debug!(url, chars = lyrics.len(), "Scraped lyrics block");
    Ok(lyrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_after_two_breaks() {
        let html = r#"
            <div class="col-xs-12 col-lg-8 text-center">
              <div class="ringtone">ringtone</div>
              <b>"Hello"</b>
              <br>
              <br>
              <div>
                Hello, it's me
                I was wondering
              </div>
              <br><br>
            </div>
        "#;

        let lyrics = extract_lyrics(html).unwrap();
        assert!(lyrics.starts_with("Hello, it's me"));
        assert!(lyrics.ends_with("I was wondering"));
    }

    #[test]
    fn test_single_break_does_not_match() {
        let html = "<body><br><div>not lyrics</div></body>";
        assert!(matches!(extract_lyrics(html), Err(ScrapeError::NoMatch)));
    }

    #[test]
    fn test_first_match_wins() {
        let html = "<body><br><br><div> first </div><br><br><div>second</div></body>";
        assert_eq!(extract_lyrics(html).unwrap(), "first");
    }

    #[test]
    fn test_invalid_rule() {
        assert!(matches!(
            extract_with_rule("<p></p>", "div[["),
            Err(ScrapeError::Selector(_))
        ));
    }
}
