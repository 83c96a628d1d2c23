//! # Vault Librarian
//!
//! Chat access to a remote language model that knows the vault's layout and
//! can propose file creations and edits.
//!
//! This crate provides:
//! - System prompt construction with framework modes ([`build_system_prompt`])
//! - Request bodies and headers for Anthropic and OpenAI
//! - An incremental server-sent event decoder ([`StreamDecoder`])
//! - A streaming HTTP client ([`AssistantClient`]) and [`collect_reply`]
//! - Extraction and application of `create:`/`edit:` directives
//!
//! ## Quick Start
//!
//! ```no_run
//! use nodex_assistant::prelude::*;
//! use futures::StreamExt;
//!
//! # async fn example(config: AssistantConfig) -> nodex_core::Result<()> {
//! let client = AssistantClient::new(config)?;
//! let system = build_system_prompt("Inbox.md", None, framework("knowledge-query"));
//!
//! let mut stream = client
//!     .stream_reply(&system, &[ChatMessage::user("What is in my inbox?")])
//!     .await?;
//! while let Some(fragment) = stream.next().await {
//!     print!("{}", fragment?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Streaming Model
//!
//! Replies are lazy, finite `Stream`s of text fragments. Dropping a stream
//! abandons the request. [`collect_reply`] returns the full text only when
//! the provider ends the stream normally; an error mid-stream discards the
//! partial reply.

pub mod client;
pub mod conversation;
pub mod framework;
pub mod ops;
pub mod prompt;
pub mod provider;
pub mod sse;

pub use client::{AssistantClient, ReplyStream, collect_reply, decode_stream};
pub use conversation::Conversation;
pub use framework::{DEFAULT_FRAMEWORK, FRAMEWORKS, Framework, framework};
pub use ops::{FileAction, FileOperation, apply_file_operations, parse_file_operations};
pub use prompt::{OpenFile, build_system_prompt};
pub use provider::{ChatMessage, Role, request_body};
pub use sse::StreamDecoder;

pub mod prelude {
    pub use crate::client::{AssistantClient, ReplyStream, collect_reply};
    pub use crate::conversation::Conversation;
    pub use crate::framework::{Framework, framework};
    pub use crate::ops::{FileOperation, apply_file_operations, parse_file_operations};
    pub use crate::prompt::{OpenFile, build_system_prompt};
    pub use crate::provider::ChatMessage;
    pub use nodex_core::{AssistantConfig, ProviderKind};
}
