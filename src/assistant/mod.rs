//! Chat assistant: a remote chat-completion endpoint with an offline fallback.
//!
//! Requests are serialized through a single async lock, so the transcript
//! always lists replies in the order questions were asked.

pub mod offline;
pub mod remote;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::config::BrainConfig;
use crate::store::RecordStore;

use remote::RemoteClient;

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("API error: {0}")]
    Api(String),
    #[error("no text in API response")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

pub struct Assistant {
    remote: Option<RemoteClient>,
    transcript: Mutex<Vec<ChatMessage>>,
}

impl Assistant {
    pub fn new(config: &BrainConfig) -> Self {
        let remote = (!config.offline_only).then(|| {
            RemoteClient::new(
                config.assistant_endpoint.clone(),
                config.assistant_model.clone(),
            )
        });
        Self {
            remote,
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn offline() -> Self {
        Self {
            remote: None,
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Ask a question. Never fails: any remote error falls back to the
    /// offline responder.
    pub async fn ask(
        &self,
        api_key: &str,
        store: &RecordStore,
        message: &str,
        today: NaiveDate,
    ) -> Reply {
        let mut transcript = self.transcript.lock().await;
        transcript.push(ChatMessage {
            role: Role::User,
            text: message.to_string(),
        });

        let reply = match (&self.remote, api_key.trim()) {
            (Some(client), key) if !key.is_empty() => match client.complete(key, message).await {
                Ok(text) => Reply {
                    text,
                    source: ReplySource::Remote,
                },
                Err(e) => {
                    log::warn!("Assistant request failed, answering offline: {}", e);
                    Self::offline_reply(store, message, today)
                }
            },
            _ => Self::offline_reply(store, message, today),
        };

        transcript.push(ChatMessage {
            role: Role::Assistant,
            text: reply.text.clone(),
        });
        reply
    }

    fn offline_reply(store: &RecordStore, message: &str, today: NaiveDate) -> Reply {
        Reply {
            text: offline::respond(store, message, today),
            source: ReplySource::Offline,
        }
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.clone()
    }
}
