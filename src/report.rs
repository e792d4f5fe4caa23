//! Human-readable match reports with playback deep links

use console::Style;

use crate::search::SearchResult;

/// Deep link to a playback offset, seconds truncated toward zero
pub fn watch_url(video_id: &str, start: f64) -> String {
    format!("https://youtu.be/{}?t={}", video_id, start as u64)
}

/// Wrap every literal occurrence of the term in a red escape
///
/// Styling is forced so the escapes survive piping; callers turn color
/// off by not calling this at all.
pub fn highlight_term(text: &str, term: &str) -> String {
    let red = Style::new().red().force_styling(true);
    text.replace(term, &red.apply_to(term).to_string())
}

/// Render one found result: the title once, then each match with its link
pub fn render_result(result: &SearchResult, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&result.video_title);
    out.push('\n');

    for segment in &result.matches {
        let text = if color {
            highlight_term(&segment.text, &result.search_term)
        } else {
            segment.text.clone()
        };
        out.push_str(&format!(
            "  {}\n  {}\n\n",
            text,
            watch_url(&result.video_id, segment.start)
        ));
    }

    out
}

/// Print a found result to stdout
pub fn print_result(result: &SearchResult, color: bool) {
    print!("{}", render_result(result, color));
}
