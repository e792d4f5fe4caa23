use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::models::{ChannelListResponse, PlaylistPage};
use super::{VideoSource, YouTubeBackend};
use crate::error::{CaptionSearchError, Result};

const CHANNELS_URL: &str = "https://www.googleapis.com/youtube/v3/channels";
const PLAYLIST_ITEMS_URL: &str = "https://www.googleapis.com/youtube/v3/playlistItems";

/// YouTube Data API v3 client
#[derive(Clone)]
pub struct YouTubeApi {
    client: Client,
    api_key: String,
}

impl YouTubeApi {
    /// Create a new client with the given API key
    pub fn new(api_key: String, timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("yt-caption-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| CaptionSearchError::Decode(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl YouTubeBackend for YouTubeApi {
    async fn lookup_uploads_playlist(&self, source: &VideoSource) -> Result<Option<String>> {
        let (selector_param, selector_value) = source.query_param();
        debug!("channels lookup for {}", source);

        let channels: ChannelListResponse = self
            .get_json(
                CHANNELS_URL,
                &[
                    ("key", self.api_key.as_str()),
                    ("part", "contentDetails"),
                    (selector_param, selector_value),
                ],
            )
            .await?;

        Ok(channels
            .items
            .into_iter()
            .next()
            .map(|channel| channel.content_details.related_playlists.uploads))
    }

    async fn list_playlist_page(
        &self,
        playlist_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage> {
        let max_results = page_size.to_string();
        let mut params = vec![
            ("key", self.api_key.as_str()),
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        debug!(
            "playlistItems request: playlist {} maxResults {} token {:?}",
            playlist_id, page_size, page_token
        );
        self.get_json(PLAYLIST_ITEMS_URL, &params).await
    }
}
