//! Records exposed through the HTTP surface

/// Song records returned by the metadata search route.
pub mod song;
/// Web search results returned by the AZLyrics search route.
pub mod search;
