use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    core::{azlyrics, genius::GeniusClient, search::WebSearchClient},
    error::{AppError, Result},
    models::{search::OrganicResult, song::SongRecord},
    AppState,
};

use super::{extract::BearerToken, responses::LyricsResponse};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub url: Option<String>,
}

fn genius_client(state: &AppState, token: String) -> GeniusClient {
    GeniusClient::new(state.http.clone(), state.config.genius_api_url.clone(), token)
}

/// `GET /:id/lyrics` and `GET /genius/:id/lyrics`
pub async fn get_lyrics(
    BearerToken(token): BearerToken,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LyricsResponse>> {
    let genius = genius_client(&state, token);

    let song = genius.get_song(&id).await?;
    let lyrics = genius.lyrics(&song).await?;

    Ok(Json(LyricsResponse::new(lyrics)))
}

/// `GET /search` and `GET /genius/search`
pub async fn search_songs(
    BearerToken(token): BearerToken,
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SongRecord>>> {
    let genius = genius_client(&state, token);

    let songs = genius.search(query.q.as_deref()).await?;

    Ok(Json(songs.iter().map(|song| song.to_record(true)).collect()))
}

/// `GET /azlyrics/search`
pub async fn azlyrics_search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<OrganicResult>>> {
    let client = WebSearchClient::new(
        state.http.clone(),
        state.config.web_search_url.clone(),
        state.config.azlyrics_domain.clone(),
    );

    let results = client.search(query.q.as_deref()).await?;

    Ok(Json(results))
}

/// `GET /azlyrics/lyrics`
pub async fn azlyrics_lyrics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<LyricsResponse>> {
    let url = query
        .url
        .ok_or_else(|| AppError::InvalidInput("missing `url` query parameter".to_string()))?;

    let lyrics = azlyrics::scrape_lyrics(&state.http, &url).await?;

    Ok(Json(LyricsResponse::new(lyrics)))
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("no such route".to_string())
}
