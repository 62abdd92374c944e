#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

//! # Lyrics Gateway
//!
//! A small REST gateway that puts third-party lyrics sources behind one JSON
//! interface:
//!
//! - **Genius**: song lookup and search through the Genius API, using the
//!   caller's own token. Lyrics are scraped from the song page.
//! - **AZLyrics**: site-restricted web search for song pages, and lyrics
//!   extraction from a page URL.
//!
//! Nothing is cached or persisted. Every request builds its own upstream
//! client and drops it when the response is sent.
//!
//! ## Routes
//!
//! | Route | Auth | Body |
//! |---|---|---|
//! | `GET /:id/lyrics`, `GET /genius/:id/lyrics` | token | `{"lyrics": ...}` |
//! | `GET /search?q=`, `GET /genius/search?q=` | token | `[SongRecord]` |
//! | `GET /azlyrics/search?q=` | none | `[OrganicResult]` |
//! | `GET /azlyrics/lyrics?url=` | none | `{"lyrics": ...}` |
//! | `GET /health` | none | build info |
//!
//! Errors are `{"error": "NotFound"}` (404), `{"error": "Unauthorized"}` (401)
//! or `{"error": "InternalServerError"}` (500).
//!
//! ## Library use
//!
//! ```rust,no_run
//! use lyrics_gateway::core::azlyrics;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let http = reqwest::Client::new();
//! let lyrics = azlyrics::scrape_lyrics(&http, "https://www.azlyrics.com/lyrics/adele/hello.html").await?;
//! println!("{}", lyrics);
//! # Ok(())
//! # }
//! ```

// Internal modules
pub mod api;
pub mod core;
/// Defines the application's error types and result aliases.
pub mod error;
pub mod models;
mod state;
mod utils;

#[allow(dead_code, unreachable_pub, missing_docs)]
mod build_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

// Public API exports
pub use crate::{
    error::{AppError, ErrorBody, Result},
    models::{
        search::OrganicResult,
        song::{AlbumRecord, ArtistRecord, SongRecord},
    },
    state::{AppState, Config},
};

#[cfg(feature = "api")]
pub use crate::api::{create_router, health_check};

/// Initialize logging
///
/// Installs a `tracing` subscriber filtered by `RUST_LOG`, defaulting to
/// `info`. Call once, early in startup.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Config(format!("cannot install log subscriber: {}", e)))?;

    tracing::info!(version = build_info::PKG_VERSION, "Initializing lyrics gateway");
    Ok(())
}
