//! Literal substring search over fetched transcripts

use crate::transcript::{Segment, TranscriptOutcome};
use crate::youtube::Video;

/// Per-video outcome of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Init,
    Found,
    NotFound,
    NoTranscript,
}

/// Matches found in one video's transcript
///
/// `matches` is non-empty exactly when `status` is `Found`; the segments
/// keep the order the transcript returned them in.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub video_id: String,
    pub video_title: String,
    pub search_term: String,
    pub status: SearchStatus,
    pub matches: Vec<Segment>,
    /// Backend diagnostic carried over from a failed transcript fetch
    pub diagnostic: Option<String>,
}

/// Searches transcripts for an exact, case-sensitive term
pub struct TranscriptSearcher {
    search_term: String,
}

impl TranscriptSearcher {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
        }
    }

    /// Classify a fetched video and extract its matching segments
    ///
    /// A transcript that was never fetched or failed to fetch is
    /// `NoTranscript`, never `NotFound`.
    pub fn process_video(&self, video: &Video) -> SearchResult {
        let mut result = SearchResult {
            video_id: video.video_id.clone(),
            video_title: video.title.clone(),
            search_term: self.search_term.clone(),
            status: SearchStatus::Init,
            matches: Vec::new(),
            diagnostic: None,
        };

        match &video.transcript {
            TranscriptOutcome::None => {
                result.status = SearchStatus::NoTranscript;
            }
            TranscriptOutcome::Error(message) => {
                result.status = SearchStatus::NoTranscript;
                result.diagnostic = Some(message.clone());
            }
            TranscriptOutcome::Ready(segments) => {
                result.matches = segments
                    .iter()
                    .filter(|segment| segment.text.contains(&self.search_term))
                    .cloned()
                    .collect();
                result.status = if result.matches.is_empty() {
                    SearchStatus::NotFound
                } else {
                    SearchStatus::Found
                };
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::models::{PlaylistItem, PlaylistItemSnippet};

    fn video_with(transcript: TranscriptOutcome) -> Video {
        let mut video = Video::from_api_item(PlaylistItem {
            snippet: PlaylistItemSnippet::new("vid1", "A title", "2024-03-01T00:00:00Z"),
        })
        .unwrap();
        video.transcript = transcript;
        video
    }

    fn segment(text: &str, start: f64) -> Segment {
        Segment {
            text: text.to_string(),
            start,
            duration: 2.0,
        }
    }

    #[test]
    fn test_found_keeps_segment_order() {
        let video = video_with(TranscriptOutcome::Ready(vec![
            segment("the quick brown fox", 0.0),
            segment("jumped over", 3.5),
            segment("the lazy fox again", 7.2),
        ]));

        let result = TranscriptSearcher::new("fox").process_video(&video);
        assert_eq!(result.status, SearchStatus::Found);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].start, 0.0);
        assert_eq!(result.matches[1].start, 7.2);
    }

    #[test]
    fn test_not_found_has_empty_matches() {
        let video = video_with(TranscriptOutcome::Ready(vec![segment("hello there", 1.0)]));

        let result = TranscriptSearcher::new("goodbye").process_video(&video);
        assert_eq!(result.status, SearchStatus::NotFound);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_empty_transcript_is_not_found() {
        let video = video_with(TranscriptOutcome::Ready(Vec::new()));

        let result = TranscriptSearcher::new("anything").process_video(&video);
        assert_eq!(result.status, SearchStatus::NotFound);
    }

    #[test]
    fn test_error_is_no_transcript_never_not_found() {
        let video = video_with(TranscriptOutcome::Error("captions disabled".to_string()));

        let result = TranscriptSearcher::new("anything").process_video(&video);
        assert_eq!(result.status, SearchStatus::NoTranscript);
        assert_eq!(result.diagnostic.as_deref(), Some("captions disabled"));
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_unfetched_is_no_transcript() {
        let video = video_with(TranscriptOutcome::None);

        let result = TranscriptSearcher::new("anything").process_video(&video);
        assert_eq!(result.status, SearchStatus::NoTranscript);
        assert!(result.diagnostic.is_none());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let video = video_with(TranscriptOutcome::Ready(vec![segment("Hello World", 0.0)]));

        let searcher = TranscriptSearcher::new("world");
        assert_eq!(
            searcher.process_video(&video).status,
            SearchStatus::NotFound
        );

        let searcher = TranscriptSearcher::new("World");
        assert_eq!(searcher.process_video(&video).status, SearchStatus::Found);
    }

    #[test]
    fn test_match_is_substring_containment() {
        let video = video_with(TranscriptOutcome::Ready(vec![segment("unworldly", 0.0)]));

        let result = TranscriptSearcher::new("world").process_video(&video);
        assert_eq!(result.status, SearchStatus::Found);
    }
}
