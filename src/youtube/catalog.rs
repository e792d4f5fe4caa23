use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use super::models::PlaylistItem;
use super::pages::PlaylistPageLoader;
use super::YouTubeBackend;
use crate::error::{CaptionSearchError, Result};
use crate::transcript::TranscriptOutcome;

/// Timestamp format the listing API uses for publishedAt
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Which channel's uploads to scan
///
/// Exactly one of the two selectors must be given; the lookup request
/// differs only in the query parameter carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Select by channel id
    Channel(String),
    /// Select by the channel owner's username
    User(String),
}

impl VideoSource {
    /// Build a source from the two mutually exclusive CLI flags
    pub fn from_flags(channel_id: Option<String>, user: Option<String>) -> Result<Self> {
        match (channel_id, user) {
            (Some(channel_id), None) => Ok(Self::Channel(channel_id)),
            (None, Some(user)) => Ok(Self::User(user)),
            _ => Err(CaptionSearchError::AmbiguousSource),
        }
    }

    /// Query parameter selecting this source in the channels lookup
    pub fn query_param(&self) -> (&'static str, &str) {
        match self {
            Self::Channel(channel_id) => ("id", channel_id),
            Self::User(user) => ("forUsername", user),
        }
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(channel_id) => write!(f, "channel {}", channel_id),
            Self::User(user) => write!(f, "user {}", user),
        }
    }
}

/// One uploaded video from the catalog
///
/// The transcript starts out unfetched and is populated exactly once when
/// the video is consumed by the scan loop.
#[derive(Debug, Clone)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub published: DateTime<Utc>,
    pub transcript: TranscriptOutcome,
}

impl Video {
    /// Map a raw playlist item to a video record
    ///
    /// publishedAt is parsed strictly against the API's UTC format; a
    /// malformed timestamp is a decode error and aborts the scan.
    pub fn from_api_item(item: PlaylistItem) -> Result<Self> {
        let snippet = item.snippet;
        let published = NaiveDateTime::parse_from_str(&snippet.published_at, API_DATETIME_FORMAT)
            .map_err(|e| {
                CaptionSearchError::Decode(format!(
                    "bad publishedAt {:?}: {}",
                    snippet.published_at, e
                ))
            })?
            .and_utc();

        Ok(Self {
            video_id: snippet.resource_id.video_id,
            title: snippet.title,
            published,
            transcript: TranscriptOutcome::None,
        })
    }
}

/// Resolves a source selector into a bounded, ordered sequence of videos
pub struct VideoCatalog<'a, B: YouTubeBackend> {
    backend: &'a B,
}

impl<'a, B: YouTubeBackend> VideoCatalog<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Resolve the selector and open a feed over its latest `n_videos` uploads
    ///
    /// The uploads playlist is resolved with a single lookup request; a
    /// selector matching no channel fails here, before any video import.
    pub async fn videos(&self, source: &VideoSource, n_videos: usize) -> Result<VideoFeed<'a, B>> {
        let uploads_id = self.resolve_uploads_id(source).await?;
        debug!("uploads playlist for {}: {}", source, uploads_id);

        Ok(VideoFeed {
            loader: PlaylistPageLoader::new(self.backend, uploads_id, n_videos),
        })
    }

    async fn resolve_uploads_id(&self, source: &VideoSource) -> Result<String> {
        self.backend
            .lookup_uploads_playlist(source)
            .await?
            .ok_or_else(|| CaptionSearchError::SourceNotFound(source.to_string()))
    }
}

/// Forward-only, single-pass cursor over the resolved videos
///
/// Videos come out in API order (most recent first); nothing is fetched
/// from the network until the next video is requested.
pub struct VideoFeed<'a, B: YouTubeBackend> {
    loader: PlaylistPageLoader<'a, B>,
}

impl<B: YouTubeBackend> std::fmt::Debug for VideoFeed<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFeed").finish_non_exhaustive()
    }
}

impl<B: YouTubeBackend> VideoFeed<'_, B> {
    pub async fn next_video(&mut self) -> Result<Option<Video>> {
        match self.loader.next_item().await? {
            Some(item) => Video::from_api_item(item).map(Some),
            None => Ok(None),
        }
    }
}
