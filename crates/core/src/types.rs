use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::{Result, TldwError},
    youtube::watch_url,
};

pub const DEFAULT_ASPECT_RATIO: f64 = 1.78;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentence: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paragraph: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wikipedia: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub video_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub aspect_ratio: f64,
    pub webpage_url: String,
}

/// A video together with its summary. Both halves always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedVideo {
    pub info: VideoInfo,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct SummarizeRequest<'a> {
    pub url: &'a str,
}

/// Body of `/api/summarize`. The backend omits most fields on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub summary: Option<Summary>,
}

impl SummarizeResponse {
    pub fn video_id(&self) -> Option<&str> {
        non_empty(self.video_id.as_deref())
    }

    pub fn error_message(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }

    pub fn into_loaded(self) -> Result<LoadedVideo> {
        let video_id = self
            .video_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| TldwError::MalformedResponse {
                reason: "missing video_id".to_string(),
            })?;
        let summary = self.summary.ok_or_else(|| TldwError::MalformedResponse {
            reason: format!("missing summary for {video_id}"),
        })?;

        let webpage_url = self
            .webpage_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| watch_url(&video_id));
        let aspect_ratio = self
            .aspect_ratio
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_ASPECT_RATIO);

        Ok(LoadedVideo {
            info: VideoInfo {
                video_id,
                title: self.title.unwrap_or_default(),
                thumbnail_url: self.thumbnail_url.filter(|u| !u.is_empty()),
                aspect_ratio,
                webpage_url,
            },
            summary,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub video_id: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn answer(&self) -> Option<&str> {
        non_empty(self.answer.as_deref())
    }

    pub fn error_message(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Decoded response body plus the HTTP status it arrived with.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub status: u16,
    pub body: T,
}

impl<T> Reply<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// The backend sends `null` as freely as it omits a key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
