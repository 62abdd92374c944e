//! Site-restricted web search
//!
//! Finds AZLyrics song pages by asking a web search engine for
//! `site:<domain> <query> lyrics` and scraping the organic hits off the
//! result page.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{models::search::OrganicResult, utils};

/// Default search engine root
pub const DEFAULT_ENGINE_URL: &str = "https://www.google.com";

/// Blocks wrapping a single organic hit, in the JS and no-JS page layouts
const RESULT_BLOCK: &str = "div.g, div.Gx5Zad, div.MjjYud";

/// Snippet text inside a result block
const SNIPPET: &str = "div.VwiC3b, div.BNeawe.s3v9rd.AP7Wnd, span.aCOpRe";

/// Failures while searching
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The engine answered with a non-success status
    #[error("search engine returned {status} for {url}")]
    Status {
        /// The HTTP status returned.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// Transport failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Bad engine URL or selector
    #[error("parse error: {0}")]
    Parse(String),
}

/// Client for the site-restricted search
#[derive(Debug, Clone)]
pub struct WebSearchClient {
    http: reqwest::Client,
    engine: String,
    domain: String,
}

impl WebSearchClient {
    /// Create a search client restricted to `domain`
    pub fn new(http: reqwest::Client, engine: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            http,
            engine: engine.into(),
            domain: domain.into(),
        }
    }

    /// Search the configured site for lyrics pages matching `query`
    ///
    /// Safe mode is always requested and only organic results are returned.
    #[tracing::instrument(skip(self), fields(domain = %self.domain))]
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<OrganicResult>, SearchError> {
        let engine = self.engine_url()?;
        let url = self.search_url(query)?;

        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await?;
        let results = parse_organic_results(&html, &engine)?;

        tracing::debug!(count = results.len(), "Web search returned organic results");
        Ok(results)
    }

    fn engine_url(&self) -> Result<Url, SearchError> {
        Url::parse(&self.engine)
            .map_err(|e| SearchError::Parse(format!("bad engine url {}: {}", self.engine, e)))
    }

    /// `<engine>/search` with the site-restricted query, keeping any path prefix
    fn search_url(&self, query: Option<&str>) -> Result<Url, SearchError> {
        let mut url = self.engine_url()?;

        url.path_segments_mut()
            .map_err(|_| SearchError::Parse(format!("{} cannot be a base URL", self.engine)))?
            .pop_if_empty()
            .push("search");

        url.query_pairs_mut()
            .append_pair("q", &utils::site_query(&self.domain, query))
            .append_pair("safe", "active")
            .append_pair("hl", "en");

        Ok(url)
    }
}

/// Extract organic results from a search result page
///
/// A hit is an anchor wrapping an `<h3>` title that leads off the engine's own
/// site, directly or through its `/url?q=` redirect. Results keep page order
/// and repeated links are dropped.
pub fn parse_organic_results(html: &str, engine: &Url) -> Result<Vec<OrganicResult>, SearchError> {
    let parse = |rule: &str| Selector::parse(rule).map_err(|e| SearchError::Parse(e.to_string()));

    let anchor_selector = parse("a[href]")?;
    let title_selector = parse("h3")?;
    let block_selector = parse(RESULT_BLOCK)?;
    let snippet_selector = parse(SNIPPET)?;

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for anchor in document.select(&anchor_selector) {
        let Some(title) = anchor.select(&title_selector).next() else {
            continue;
        };
        let Some(link) = anchor
            .value()
            .attr("href")
            .and_then(|href| utils::resolve_result_link(engine, href))
        else {
            continue;
        };
        if !seen.insert(link.clone()) {
            continue;
        }

        let title = collapse_whitespace(&title.text().collect::<String>());
        let description = enclosing_block(anchor, &block_selector)
            .and_then(|block| block.select(&snippet_selector).next())
            .map(|snippet| collapse_whitespace(&snippet.text().collect::<String>()))
            .filter(|text| !text.is_empty());

        results.push(OrganicResult::new(title, link, description));
    }

    Ok(results)
}

fn enclosing_block<'a>(element: ElementRef<'a>, block: &Selector) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| block.matches(ancestor))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
