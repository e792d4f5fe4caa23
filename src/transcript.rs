//! Caption track retrieval and the per-video transcript outcome

use async_trait::async_trait;
use tracing::debug;
use yt_transcript_rs::YouTubeTranscriptApi;

use crate::error::{CaptionSearchError, Result};
use crate::youtube::Video;

/// One timed unit of caption text
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    /// Start offset in seconds
    pub start: f64,
    /// Display duration in seconds
    pub duration: f64,
}

/// What happened when a video's transcript was fetched
///
/// Starts out as `None`; set to `Ready` or `Error` exactly once and
/// never transitions again.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TranscriptOutcome {
    /// Not fetched yet
    #[default]
    None,
    /// Ordered segments as returned by the captioning backend
    Ready(Vec<Segment>),
    /// Retrieval failed; carries the backend's diagnostic text
    Error(String),
}

impl TranscriptOutcome {
    /// Whether a fetch already ran for this video
    pub fn is_fetched(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Consumed captioning interface
///
/// A failed retrieval reports the backend's diagnostic message rather
/// than a crate error: per-video caption failures are expected and must
/// not abort the scan.
#[async_trait]
pub trait CaptionBackend: Send + Sync {
    async fn fetch_segments(&self, video_id: &str) -> std::result::Result<Vec<Segment>, String>;
}

/// Fetches each video's transcript at most once
pub struct TranscriptFetcher<B: CaptionBackend> {
    backend: B,
}

impl<B: CaptionBackend> TranscriptFetcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Fetch the transcript for a video id
    ///
    /// Exactly one attempt: success becomes `Ready`, any failure becomes
    /// `Error` with the backend's diagnostic.
    pub async fn fetch(&self, video_id: &str) -> TranscriptOutcome {
        match self.backend.fetch_segments(video_id).await {
            Ok(segments) => {
                debug!("transcript ready for {}: {} segment(s)", video_id, segments.len());
                TranscriptOutcome::Ready(segments)
            }
            Err(message) => {
                debug!("transcript unavailable for {}: {}", video_id, message);
                TranscriptOutcome::Error(message)
            }
        }
    }

    /// Populate a video's transcript, fetching only if it has not been fetched
    pub async fn populate(&self, video: &mut Video) {
        if video.transcript.is_fetched() {
            return;
        }
        video.transcript = self.fetch(&video.video_id).await;
    }
}

/// Caption backend backed by YouTube's transcript endpoint
pub struct YouTubeCaptionBackend {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YouTubeCaptionBackend {
    pub fn new(languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| CaptionSearchError::CaptionBackend(e.to_string()))?;
        Ok(Self { api, languages })
    }
}

#[async_trait]
impl CaptionBackend for YouTubeCaptionBackend {
    async fn fetch_segments(&self, video_id: &str) -> std::result::Result<Vec<Segment>, String> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let fetched = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| e.to_string())?;

        Ok(fetched
            .parts()
            .iter()
            .map(|part| Segment {
                text: part.text.clone(),
                start: part.start,
                duration: part.duration,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::models::{PlaylistItem, PlaylistItemSnippet};
    use std::sync::Mutex;

    /// Stub backend that counts fetches and answers from a fixed script
    struct StubBackend {
        response: std::result::Result<Vec<Segment>, String>,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl CaptionBackend for StubBackend {
        async fn fetch_segments(
            &self,
            _video_id: &str,
        ) -> std::result::Result<Vec<Segment>, String> {
            *self.calls.lock().unwrap() += 1;
            self.response.clone()
        }
    }

    fn test_video() -> Video {
        Video::from_api_item(PlaylistItem {
            snippet: PlaylistItemSnippet::new("vid1", "A title", "2024-03-01T00:00:00Z"),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_becomes_ready() {
        let segments = vec![Segment {
            text: "hello world".to_string(),
            start: 1.9,
            duration: 2.0,
        }];
        let fetcher = TranscriptFetcher::new(StubBackend {
            response: Ok(segments.clone()),
            calls: Mutex::new(0),
        });

        assert_eq!(
            fetcher.fetch("vid1").await,
            TranscriptOutcome::Ready(segments)
        );
    }

    #[tokio::test]
    async fn test_failure_becomes_error_with_diagnostic() {
        let fetcher = TranscriptFetcher::new(StubBackend {
            response: Err("Subtitles are disabled for this video".to_string()),
            calls: Mutex::new(0),
        });

        assert_eq!(
            fetcher.fetch("vid1").await,
            TranscriptOutcome::Error("Subtitles are disabled for this video".to_string())
        );
    }

    #[tokio::test]
    async fn test_populate_fetches_at_most_once() {
        let fetcher = TranscriptFetcher::new(StubBackend {
            response: Ok(Vec::new()),
            calls: Mutex::new(0),
        });

        let mut video = test_video();
        assert!(!video.transcript.is_fetched());

        fetcher.populate(&mut video).await;
        assert!(video.transcript.is_fetched());

        fetcher.populate(&mut video).await;
        assert_eq!(*fetcher.backend.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_populate_never_refetches_an_error() {
        let fetcher = TranscriptFetcher::new(StubBackend {
            response: Err("unavailable".to_string()),
            calls: Mutex::new(0),
        });

        let mut video = test_video();
        fetcher.populate(&mut video).await;
        fetcher.populate(&mut video).await;

        assert_eq!(*fetcher.backend.calls.lock().unwrap(), 1);
        assert_eq!(
            video.transcript,
            TranscriptOutcome::Error("unavailable".to_string())
        );
    }
}
