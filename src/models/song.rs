use serde::{Deserialize, Serialize};

/// A song as exposed by the gateway
///
/// Built field by field from the provider's record. Nothing that carries the
/// caller's credential is reachable from here, so serializing it is safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    /// Provider song id.
    pub id: u64,
    /// Bare song title.
    pub title: String,
    /// Title including the artist, e.g. `Hello by Adele`.
    pub full_title: String,
    /// Title including featured artists.
    pub featured_title: String,
    /// Public song page on the provider's website.
    pub url: String,
    /// Provider API path of the song.
    pub endpoint: String,
    /// Small header image.
    pub thumbnail: String,
    /// Full size header image.
    pub image: String,
    /// Whether the song is marked as instrumental.
    pub instrumental: bool,
    /// `true` when the record came from a search hit rather than a full lookup.
    pub partial: bool,
    /// Human readable release date, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<String>,
    /// Primary artist.
    pub artist: ArtistRecord,
    /// Album, only present on full lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<AlbumRecord>,
}

/// Primary artist of a song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    /// Provider artist id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Public artist page.
    pub url: String,
    /// Artist avatar.
    pub thumbnail: String,
    /// Artist header image.
    pub image: String,
    /// Whether the provider verified this artist.
    pub verified: bool,
    /// `true` when only the summary fields are known.
    pub partial: bool,
}

/// Album a song belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRecord {
    /// Provider album id.
    pub id: u64,
    /// Album name.
    pub name: String,
    /// Album name including the artist.
    pub title: String,
    /// Public album page.
    pub url: String,
    /// Cover art.
    pub image: String,
}
