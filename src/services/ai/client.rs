use async_openai::{config::OpenAIConfig, Client};
use futures_util::future;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::services::config::DEFAULT_API_BASE;

use super::types::{ByotChatCompletionStreamResponse, CompletionDelta, CompletionRequest};

/// The seam between the controller and the remote completion service.
///
/// Implementations must never let a transport error escape: a failure is
/// reported as a terminal [`CompletionDelta::Failed`] fragment instead.
pub trait CompletionBackend {
    /// Lazily produce the fragment stream for `request`. Nothing is sent
    /// over the wire until the stream is first polled.
    fn complete(&self, request: CompletionRequest) -> BoxStream<'static, CompletionDelta>;
}

/// Completion client for OpenAI-compatible endpoints.
pub struct CompletionClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl Default for CompletionClient {
    fn default() -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(8)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl CompletionClient {
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    fn api_client(&self, api_key: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_base(self.api_base.clone())
            .with_api_key(api_key);
        Client::with_config(config).with_http_client(self.http_client.clone())
    }
}

impl CompletionBackend for CompletionClient {
    fn complete(&self, request: CompletionRequest) -> BoxStream<'static, CompletionDelta> {
        let client = self.api_client(&request.api_key);
        let body = build_request_body(&request);

        if request.stream {
            stream::once(async move { open_stream(client, body).await })
                .flatten()
                .boxed()
        } else {
            stream::once(async move { complete_once(client, body).await }).boxed()
        }
    }
}

fn build_request_body(request: &CompletionRequest) -> serde_json::Value {
    let api_messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|m| serde_json::json!({ "role": m.role, "content": m.content }))
        .collect();

    serde_json::json!({
        "model": request.model,
        "messages": api_messages,
        "stream": request.stream,
    })
}

async fn open_stream(
    client: Client<OpenAIConfig>,
    body: serde_json::Value,
) -> BoxStream<'static, CompletionDelta> {
    let chunks = match client
        .chat()
        .create_stream_byot::<_, ByotChatCompletionStreamResponse>(&body)
        .await
    {
        Ok(chunks) => chunks,
        Err(err) => {
            return stream::once(future::ready(CompletionDelta::Failed(err.to_string())))
                .boxed();
        }
    };

    // A chunk error ends the stream after one Failed fragment; dropping
    // the inner stream closes the connection.
    stream::unfold(Some(chunks), |state| async move {
        let mut chunks = state?;
        match chunks.next().await {
            None => None,
            Some(Ok(chunk)) => {
                let mut delta = String::new();
                for choice in chunk.choices {
                    if let Some(content) = choice.delta.content {
                        delta.push_str(&content);
                    }
                }
                Some((CompletionDelta::Content(delta), Some(chunks)))
            }
            Some(Err(err)) => Some((CompletionDelta::Failed(err.to_string()), None)),
        }
    })
    .filter(|delta| {
        future::ready(!matches!(delta, CompletionDelta::Content(content) if content.is_empty()))
    })
    .boxed()
}

async fn complete_once(client: Client<OpenAIConfig>, body: serde_json::Value) -> CompletionDelta {
    let response = match client
        .chat()
        .create_byot::<_, serde_json::Value>(&body)
        .await
    {
        Ok(response) => response,
        Err(err) => return CompletionDelta::Failed(err.to_string()),
    };

    let content = response
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("")
        .to_string();

    CompletionDelta::Content(content)
}
