//! Upstream integrations: the lyrics metadata API, page scraping and web search

/// Scrapes lyrics from AZLyrics song pages.
pub mod azlyrics;
/// Genius API client and lyrics page extraction.
pub mod genius;
/// Site-restricted web search for lyrics pages.
pub mod search;
