//! Streaming chat client for the configured provider.

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use nodex_core::{AssistantConfig, Error, Result};
use serde_json::Value;
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::instrument;

use crate::provider::{ChatMessage, endpoint, error_message, headers, request_body};
use crate::sse::StreamDecoder;

/// Lazy, finite stream of reply fragments.
///
/// Dropping it abandons the underlying request.
pub type ReplyStream = BoxStream<'static, Result<String>>;

/// HTTP client bound to one provider configuration
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    config: AssistantConfig,
    endpoint: String,
}

impl AssistantClient {
    /// Create a client; fails when no usable API key is configured
    pub fn new(config: AssistantConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(Error::assistant(format!(
                "No API key configured for provider {}",
                config.provider
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: endpoint(config.provider).to_string(),
            config,
        })
    }

    /// Send requests to a different URL, e.g. a proxy
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Start a streaming completion.
    ///
    /// Resolves once response headers arrive. Non-2xx responses fail with the
    /// provider's error message.
    #[instrument(skip(self, system, messages), fields(provider = %self.config.provider, turns = messages.len()), name = "assistant_stream_reply")]
    pub async fn stream_reply(&self, system: &str, messages: &[ChatMessage]) -> Result<ReplyStream> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&request_body(&self.config, system, messages));
        for (name, value) in headers(self.config.provider, api_key) {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::assistant(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let message = error_message(body.as_ref());
            log::warn!("Provider returned {}: {}", status, message);
            return Err(Error::assistant(message));
        }

        log::debug!("Streaming reply from {}", self.config.provider);
        let bytes = response
            .bytes_stream()
            .map_err(|e| Error::assistant(format!("Stream interrupted: {}", e)));
        Ok(decode_stream(bytes, StreamDecoder::new(self.config.provider)))
    }

    /// Stream a reply and wait for the complete text
    pub async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String> {
        collect_reply(self.stream_reply(system, messages).await?).await
    }
}

struct DecodeState<S> {
    chunks: Pin<Box<S>>,
    decoder: StreamDecoder,
    pending: VecDeque<String>,
    finished: bool,
}

/// Adapt a stream of raw chunks into a stream of text fragments.
///
/// An error item ends the stream after it is yielded.
pub fn decode_stream<S, B>(chunks: S, decoder: StreamDecoder) -> ReplyStream
where
    S: futures::Stream<Item = Result<B>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let state = DecodeState {
        chunks: Box::pin(chunks),
        decoder,
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(fragment) = state.pending.pop_front() {
                return Some((Ok(fragment), state));
            }
            if state.finished {
                return None;
            }
            match state.chunks.next().await {
                Some(Ok(chunk)) => {
                    state.pending.extend(state.decoder.push(chunk.as_ref()));
                    if state.decoder.is_done() {
                        state.finished = true;
                    }
                }
                Some(Err(e)) => {
                    state.finished = true;
                    state.pending.clear();
                    return Some((Err(e), state));
                }
                None => {
                    state.pending.extend(state.decoder.finish());
                    state.finished = true;
                }
            }
        }
    })
    .boxed()
}

/// Concatenate every fragment of a finished stream.
///
/// Fails with the first stream error; partial text is discarded.
pub async fn collect_reply(stream: ReplyStream) -> Result<String> {
    stream
        .try_fold(String::new(), |mut reply, fragment| async move {
            reply.push_str(&fragment);
            Ok(reply)
        })
        .await
}
