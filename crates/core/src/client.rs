use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{
    endpoint::Endpoint,
    error::Result,
    types::{
        ChatRequest, ChatResponse, HealthResponse, Reply, SummarizeRequest, SummarizeResponse,
    },
};

/// The two exchanges a front end needs from the summarization backend.
///
/// Implementations return `Ok` for any response whose body is valid JSON,
/// whatever its status: the backend reports failures inside the body.
#[async_trait]
pub trait SummarizerApi: Send + Sync {
    async fn summarize(&self, url: &str) -> Result<Reply<SummarizeResponse>>;
    async fn ask(&self, video_id: &str, question: &str) -> Result<Reply<ChatResponse>>;
}

#[derive(Clone, Debug)]
pub struct TldwClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl TldwClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_http(reqwest::Client::new(), endpoint)
    }

    pub fn with_http(http: reqwest::Client, endpoint: Endpoint) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn health(&self) -> Result<Reply<HealthResponse>> {
        let response = self.http.get(self.endpoint.api_url("health")).send().await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<Reply<T>>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint.api_url(path);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<Reply<T>> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes)?;
    Ok(Reply { status, body })
}

#[async_trait]
impl SummarizerApi for TldwClient {
    async fn summarize(&self, url: &str) -> Result<Reply<SummarizeResponse>> {
        info!(video_url = url, endpoint = self.endpoint.name(), "requesting summary");
        self.post_json("summarize", &SummarizeRequest { url }).await
    }

    async fn ask(&self, video_id: &str, question: &str) -> Result<Reply<ChatResponse>> {
        info!(video_id, endpoint = self.endpoint.name(), "asking follow-up");
        self.post_json("chat", &ChatRequest { video_id, question })
            .await
    }
}
