//! YouTube Data API v3 access: channel resolution and paginated listing
//!
//! The network-facing client lives behind the [`YouTubeBackend`] trait so
//! the pagination and catalog logic can be exercised against in-process
//! stubs.

pub mod api;
pub mod catalog;
pub mod models;
pub mod pages;

pub use api::YouTubeApi;
pub use catalog::{Video, VideoCatalog, VideoFeed, VideoSource};
pub use models::{PlaylistItem, PlaylistPage};
pub use pages::{page_sizes, PlaylistPageLoader, MAX_PAGE_ITEMS};

use async_trait::async_trait;

use crate::error::Result;

/// Consumed listing interface of the video host
#[async_trait]
pub trait YouTubeBackend: Send + Sync {
    /// Resolve a source selector to its uploads-playlist id
    ///
    /// `Ok(None)` means the lookup succeeded but matched no channel.
    async fn lookup_uploads_playlist(&self, source: &VideoSource) -> Result<Option<String>>;

    /// Fetch one page of playlist items
    ///
    /// `page_token` is the continuation cursor returned by the previous
    /// page, absent on the first request.
    async fn list_playlist_page(
        &self,
        playlist_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage>;
}
