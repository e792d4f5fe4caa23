use thiserror::Error;

/// Result type for caption search operations
pub type Result<T> = std::result::Result<T, CaptionSearchError>;

/// Error types for caption search operations
#[derive(Error, Debug)]
pub enum CaptionSearchError {
    #[error("no YouTube API key provided (use --api-key, the YOUTUBE_API_KEY environment variable, or the config file)")]
    MissingApiKey,

    #[error("specify exactly one of --channel-id or --user")]
    AmbiguousSource,

    #[error("no channel found for {0}")]
    SourceNotFound(String),

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed API response: {0}")]
    Decode(String),

    #[error("caption backend unavailable: {0}")]
    CaptionBackend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
