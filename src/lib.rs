//! Search for a word in the captions of a YouTube channel's latest videos
//!
//! Resolves a channel selector to its uploads playlist, pages through the
//! latest uploads, fetches each video's transcript one at a time, and
//! reports matching caption segments with a deep link to the playback
//! offset.

pub mod config;
pub mod error;
pub mod report;
pub mod search;
pub mod transcript;
pub mod youtube;

// Re-export main types for easy access
pub use crate::config::Config;
pub use crate::error::{CaptionSearchError, Result};
pub use crate::report::{print_result, render_result, watch_url};
pub use crate::search::{SearchResult, SearchStatus, TranscriptSearcher};
pub use crate::transcript::{
    CaptionBackend, Segment, TranscriptFetcher, TranscriptOutcome, YouTubeCaptionBackend,
};
pub use crate::youtube::{
    Video, VideoCatalog, VideoFeed, VideoSource, YouTubeApi, YouTubeBackend,
};
