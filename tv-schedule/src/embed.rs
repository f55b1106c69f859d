use once_cell::sync::Lazy;
use regex::Regex;

const EMBED_MARKER: &str = "/embed/";
const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Matches `youtube.com/live/{id}` and `youtube.com/watch?v={id}`
static VIDEO_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(youtube\.com/live/|youtube\.com/watch\?v=)([a-zA-Z0-9_-]+)")
        .expect("video id pattern is valid")
});

/// Converts a YouTube `/live/` or `/watch?v=` URL into its `/embed/` form.
///
/// URLs that already embed, or that belong to another platform, pass through
/// unchanged.
pub fn derive_embed_url(url: Option<&str>) -> Option<String> {
    let url = url?;

    if url.contains(EMBED_MARKER) {
        return Some(url.to_string());
    }

    match VIDEO_ID_PATTERN.captures(url).and_then(|caps| caps.get(2)) {
        Some(id) => Some(format!("{}{}", EMBED_BASE, id.as_str())),
        None => Some(url.to_string()),
    }
}
