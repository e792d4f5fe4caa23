use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use yt_caption_search::config::Config;
use yt_caption_search::report::print_result;
use yt_caption_search::search::{SearchStatus, TranscriptSearcher};
use yt_caption_search::transcript::{TranscriptFetcher, YouTubeCaptionBackend};
use yt_caption_search::youtube::{VideoCatalog, VideoSource, YouTubeApi};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("yt-caption-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search for a word in the captions of a channel's latest videos")
        .arg(
            Arg::new("channel-id")
                .short('c')
                .long("channel-id")
                .value_name("ID")
                .help("Channel id to search"),
        )
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .value_name("NAME")
                .help("Channel owner's username to search"),
        )
        .arg(
            Arg::new("word")
                .short('w')
                .long("word")
                .value_name("TERM")
                .help("Word or phrase to search for")
                .required(true),
        )
        .arg(
            Arg::new("n-videos")
                .short('n')
                .long("n-videos")
                .value_name("NUM")
                .help("How many of the latest videos to search (default 5)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("YouTube Data API key (falls back to YOUTUBE_API_KEY)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Path to a TOML config file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Report per-video statuses and transcript diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Do not highlight matches")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(if verbose {
            "yt_caption_search=debug,info"
        } else {
            "yt_caption_search=info,warn"
        })
        .init();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    // Both configuration checks happen before any network activity
    let source = match VideoSource::from_flags(
        matches.get_one::<String>("channel-id").cloned(),
        matches.get_one::<String>("user").cloned(),
    ) {
        Ok(source) => source,
        Err(e) => usage_error(e),
    };

    let api_key = match config.resolve_api_key(matches.get_one::<String>("api-key").cloned()) {
        Ok(api_key) => api_key,
        Err(e) => usage_error(e),
    };

    let word = matches.get_one::<String>("word").unwrap().clone();
    let n_videos = match matches.get_one::<String>("n-videos") {
        Some(raw) => raw.parse::<usize>()?,
        None => config.scan.default_n_videos,
    };
    let color = !matches.get_flag("no-color") && config.output.color;

    let api = YouTubeApi::new(api_key, config.api.timeout_seconds);
    let catalog = VideoCatalog::new(&api);
    let fetcher = TranscriptFetcher::new(YouTubeCaptionBackend::new(config.scan.languages.clone())?);
    let searcher = TranscriptSearcher::new(word.clone());

    info!(
        "🔎 Searching for {:?} in the last {} video(s) of {}",
        word, n_videos, source
    );

    let mut feed = catalog.videos(&source, n_videos).await?;
    let mut scanned = 0usize;
    let mut matched_videos = 0usize;
    let mut matched_segments = 0usize;

    // One video at a time: fetch its transcript, search it, report it
    while let Some(mut video) = feed.next_video().await? {
        scanned += 1;
        debug!("🎬 Searching video: {} ({})", video.title, video.video_id);

        fetcher.populate(&mut video).await;
        let result = searcher.process_video(&video);

        match result.status {
            SearchStatus::Found => {
                matched_videos += 1;
                matched_segments += result.matches.len();
                print_result(&result, color);
            }
            SearchStatus::NotFound => {
                debug!("no match in: {}", video.title);
            }
            SearchStatus::NoTranscript => {
                if verbose {
                    warn!(
                        "🚫 No transcript for {}: {}",
                        video.title,
                        result.diagnostic.as_deref().unwrap_or("not fetched")
                    );
                } else {
                    debug!("no transcript for: {}", video.title);
                }
            }
            // process_video never leaves a result in Init
            SearchStatus::Init => {}
        }
    }

    info!(
        "🏁 Scanned {} video(s): {} with matches, {} matching segment(s)",
        scanned, matched_videos, matched_segments
    );

    Ok(())
}

/// Report a configuration error the way a bad invocation is reported
fn usage_error(error: impl std::fmt::Display) -> ! {
    eprintln!(
        "usage: yt-caption-search --word <TERM> (--channel-id <ID> | --user <NAME>) [options]"
    );
    eprintln!("error: {}", error);
    std::process::exit(1);
}
