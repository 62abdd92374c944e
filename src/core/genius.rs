//! Genius API client
//!
//! A [`GeniusClient`] is built for a single request from the caller's token and
//! dropped with it. The shared `reqwest::Client` it borrows is only a
//! connection pool, it never stores the token.
//!
//! Lyrics are not part of the API: they are scraped from the song's public
//! page, see [`extract_lyrics`].

use std::fmt;

use reqwest::{header::ACCEPT, StatusCode};
use scraper::{ElementRef, Html, Node, Selector};
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::models::song::{AlbumRecord, ArtistRecord, SongRecord};

/// Default Genius API root
pub const DEFAULT_API_URL: &str = "https://api.genius.com";

const LYRICS_CONTAINER: &str = r#"div[data-lyrics-container="true"]"#;

/// Failures reported by the Genius client
#[derive(Debug, thiserror::Error)]
pub enum GeniusError {
    /// No song for the id, no search hits, or no lyrics on the page
    #[error("no result: {0}")]
    NoResult(String),

    /// The token was rejected
    #[error("invalid Genius API key")]
    InvalidKey,

    /// Any other non-success status
    #[error("Genius returned {status} for {url}")]
    Status {
        /// The HTTP status returned.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// Transport failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Unexpected payload or markup
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct SongPayload {
    song: GeniusSong,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "type")]
    kind: String,
    result: serde_json::Value,
}

/// Song as returned by the Genius API
#[derive(Debug, Clone, Deserialize)]
pub struct GeniusSong {
    id: u64,
    title: String,
    full_title: String,
    #[serde(default)]
    title_with_featured: Option<String>,
    url: String,
    #[serde(default)]
    api_path: String,
    #[serde(default)]
    header_image_thumbnail_url: String,
    #[serde(default)]
    header_image_url: String,
    #[serde(default)]
    instrumental: bool,
    #[serde(default)]
    release_date_for_display: Option<String>,
    primary_artist: GeniusArtist,
    #[serde(default)]
    album: Option<GeniusAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeniusArtist {
    id: u64,
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    header_image_url: String,
    #[serde(default)]
    is_verified: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct GeniusAlbum {
    id: u64,
    name: String,
    #[serde(default)]
    full_title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    cover_art_url: String,
}

impl GeniusSong {
    /// Provider song id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Public song page, the source of the lyrics
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Convert to the exposed record
    ///
    /// `partial` marks records that came from search hits.
    pub fn to_record(&self, partial: bool) -> SongRecord {
        let artist = &self.primary_artist;

        SongRecord {
            id: self.id,
            title: self.title.clone(),
            full_title: self.full_title.clone(),
            featured_title: self
                .title_with_featured
                .clone()
                .unwrap_or_else(|| self.title.clone()),
            url: self.url.clone(),
            endpoint: self.api_path.clone(),
            thumbnail: self.header_image_thumbnail_url.clone(),
            image: self.header_image_url.clone(),
            instrumental: self.instrumental,
            partial,
            released_at: self.release_date_for_display.clone(),
            artist: ArtistRecord {
                id: artist.id,
                name: artist.name.clone(),
                url: artist.url.clone(),
                thumbnail: artist.image_url.clone(),
                image: artist.header_image_url.clone(),
                verified: artist.is_verified,
                partial: true,
            },
            album: self.album.as_ref().map(|album| AlbumRecord {
                id: album.id,
                name: album.name.clone(),
                title: album.full_title.clone(),
                url: album.url.clone(),
                image: album.cover_art_url.clone(),
            }),
        }
    }
}

/// Request-scoped Genius client
pub struct GeniusClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for GeniusClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeniusClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GeniusClient {
    /// Create a client bound to one caller's token
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Fetch a song by id
    ///
    /// The id is forwarded as given; Genius decides whether it exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_song(&self, id: &str) -> Result<GeniusSong, GeniusError> {
        let url = self.endpoint(&["songs", id])?;
        let payload: Envelope<SongPayload> = self.get_json(url).await?;

        Ok(payload.response.song)
    }

    /// Search songs by free-text query
    ///
    /// A missing query is passed through, leaving the outcome to Genius.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<GeniusSong>, GeniusError> {
        let mut url = self.endpoint(&["search"])?;
        if let Some(query) = query {
            url.query_pairs_mut().append_pair("q", query);
        }

        let payload: Envelope<SearchPayload> = self.get_json(url).await?;

        let songs = payload
            .response
            .hits
            .into_iter()
            .filter(|hit| hit.kind == "song")
            .map(|hit| serde_json::from_value(hit.result))
            .collect::<Result<Vec<GeniusSong>, _>>()
            .map_err(|e| GeniusError::Parse(e.to_string()))?;

        if songs.is_empty() {
            return Err(GeniusError::NoResult(format!("no songs for {:?}", query)));
        }

        tracing::debug!(count = songs.len(), "Genius search returned songs");
        Ok(songs)
    }

    /// Scrape the lyrics of a song from its public page
    #[tracing::instrument(skip_all, fields(song_id = song.id))]
    pub async fn lyrics(&self, song: &GeniusSong) -> Result<String, GeniusError> {
        let response = self.http.get(&song.url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GeniusError::NoResult(format!("page {} is gone", song.url)));
        }
        if !status.is_success() {
            return Err(GeniusError::Status {
                status: status.as_u16(),
                url: song.url.clone(),
            });
        }

        let html = response.text().await?;
        extract_lyrics(&html)?
            .ok_or_else(|| GeniusError::NoResult(format!("no lyrics for song {}", song.id)))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GeniusError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GeniusError::Parse(format!("bad API url {}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| GeniusError::Parse(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GeniusError> {
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GeniusError::InvalidKey),
            StatusCode::NOT_FOUND => Err(GeniusError::NoResult(url.path().to_string())),
            status if !status.is_success() => Err(GeniusError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => response
                .json::<T>()
                .await
                .map_err(|e| GeniusError::Parse(e.to_string())),
        }
    }
}

/// Pull the lyrics out of a Genius song page
///
/// Every lyrics container contributes its text, `<br>` becomes a line break and
/// annotation headers marked `data-exclude-from-selection` are skipped.
/// Containers are separated by a blank line. Returns `None` when the page has
/// no lyrics text.
pub fn extract_lyrics(html: &str) -> Result<Option<String>, GeniusError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(LYRICS_CONTAINER).map_err(|e| GeniusError::Parse(e.to_string()))?;

    let blocks: Vec<String> = document
        .select(&selector)
        .map(|container| {
            let mut text = String::new();
            render_text(container, &mut text);
            text.trim().to_string()
        })
        .filter(|text| !text.is_empty())
        .collect();

    if blocks.is_empty() {
        Ok(None)
    } else {
        Ok(Some(blocks.join("\n\n")))
    }
}

fn render_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) if el.attr("data-exclude-from-selection").is_some() => {}
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    render_text(child, out);
                }
            }
            _ => {}
        }
    }
}
