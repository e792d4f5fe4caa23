use serde::Deserialize;

/// One page of a playlistItems response
///
/// `next_page_token` is the opaque continuation cursor; the server omits
/// it on the last page it knows about.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Raw playlist item record as returned by the listing API
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub title: String,
    pub published_at: String,
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

/// Response of the channels lookup used to resolve the uploads playlist
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: String,
}

impl PlaylistItemSnippet {
    /// Convenience constructor used by tests and stub backends
    pub fn new(video_id: &str, title: &str, published_at: &str) -> Self {
        Self {
            title: title.to_string(),
            published_at: published_at.to_string(),
            resource_id: ResourceId {
                video_id: video_id.to_string(),
            },
        }
    }
}
