use std::collections::VecDeque;

use tracing::debug;

use super::models::PlaylistItem;
use super::YouTubeBackend;
use crate::error::Result;

/// Maximum number of results the listing API returns per page
pub const MAX_PAGE_ITEMS: usize = 50;

/// Split a desired total into per-request page sizes
///
/// Each element is in `[1, per_page]` and the elements sum to `total`,
/// so the plan has `ceil(total / per_page)` entries.
///
/// `page_sizes(112, 50)` -> `[50, 50, 12]`
pub fn page_sizes(total: usize, per_page: usize) -> Vec<usize> {
    debug_assert!(per_page >= 1);

    let mut sizes = Vec::new();
    let mut remaining = total;
    while remaining > 0 {
        if remaining > per_page {
            sizes.push(per_page);
            remaining -= per_page;
        } else {
            sizes.push(remaining);
            remaining = 0;
        }
    }
    sizes
}

/// Pull-based cursor over the pages of an uploads playlist
///
/// Issues one listing request per entry of the page-size plan, threading
/// the continuation cursor from each response into the next request, and
/// hands out buffered items one at a time. The request count is fixed by
/// the plan: a page that comes back short (or empty) does not end the
/// iteration early.
pub struct PlaylistPageLoader<'a, B: YouTubeBackend> {
    backend: &'a B,
    playlist_id: String,
    plan: VecDeque<usize>,
    next_token: Option<String>,
    buffer: VecDeque<PlaylistItem>,
}

impl<'a, B: YouTubeBackend> PlaylistPageLoader<'a, B> {
    pub fn new(backend: &'a B, playlist_id: String, total: usize) -> Self {
        Self {
            backend,
            playlist_id,
            plan: page_sizes(total, MAX_PAGE_ITEMS).into(),
            next_token: None,
            buffer: VecDeque::new(),
        }
    }

    /// Next raw item, fetching the next planned page when the buffer runs dry
    ///
    /// Returns `Ok(None)` once the plan is exhausted and every buffered
    /// item has been handed out. A transport or decode failure aborts the
    /// iteration by propagating the error.
    pub async fn next_item(&mut self) -> Result<Option<PlaylistItem>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }

            let Some(page_size) = self.plan.pop_front() else {
                return Ok(None);
            };

            let page = self
                .backend
                .list_playlist_page(&self.playlist_id, page_size, self.next_token.as_deref())
                .await?;

            debug!(
                "page of {} item(s) for playlist {} (requested {})",
                page.items.len(),
                self.playlist_id,
                page_size
            );

            self.next_token = page.next_page_token;
            self.buffer.extend(page.items);
        }
    }
}
