use crate::{
    types::{DEFAULT_ASPECT_RATIO, LoadedVideo},
    youtube::embed_url,
};

/// Height of the player box as a percentage of its width
pub fn aspect_padding_percent(aspect_ratio: f64) -> f64 {
    let ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        DEFAULT_ASPECT_RATIO
    };
    100.0 / ratio
}

pub fn format_summary_readable(video: &LoadedVideo) -> String {
    let info = &video.info;
    let summary = &video.summary;
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", info.title));
    output.push_str(&format!("**Video:** {}\n", info.webpage_url));
    output.push_str(&format!("**Embed:** {}\n", embed_url(&info.video_id)));
    if let Some(thumbnail) = &info.thumbnail_url {
        output.push_str(&format!("**Thumbnail:** {}\n", thumbnail));
    }
    output.push('\n');

    output.push_str(&format!("## {}\n\n", summary.word));
    if !summary.wikipedia.is_empty() {
        output.push_str(&format!("{}\n\n", summary.wikipedia));
    }
    output.push_str(&summary.sentence);
    output.push_str("\n\n");

    output.push_str("## Full summary\n\n");
    output.push_str(&summary.paragraph);
    output.push('\n');

    output
}
