const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
const EMBED_URL_PREFIX: &str = "https://www.youtube.com/embed/";

/// Canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}

/// Player URL for embedding a video
pub fn embed_url(video_id: &str) -> String {
    format!("{EMBED_URL_PREFIX}{video_id}")
}
