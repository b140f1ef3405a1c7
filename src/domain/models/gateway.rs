use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;
use super::SessionSummary;

/// One outbound chat request. The generation stamp ties the eventual reply
/// back to the conversation state that issued it, so replies arriving after
/// the user has moved to another session are discarded instead of leaking
/// into the wrong feed.
#[derive(Clone, Debug)]
pub struct OutboundMessage {
    pub session_id: Option<String>,
    pub content: String,
    pub model_tier: String,
    pub generation: u64,
}

pub struct SendReply {
    /// Set by the backend when this send created a brand new session.
    pub session_id: Option<String>,
    pub message: Message,
}

#[derive(Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: serde_json::Value,
}

impl AuthSession {
    pub fn username(&self) -> Option<String> {
        for key in ["username", "name"] {
            if let Some(val) = self.user.get(key).and_then(|v| return v.as_str()) {
                return Some(val.to_string());
            }
        }

        return None;
    }
}

#[async_trait]
pub trait Gateway {
    /// Fetches the full list of session summaries.
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// Fetches the full message history for a session.
    async fn session_history(&self, id: &str) -> Result<Vec<Message>>;

    /// Submits a message and returns the assistant reply. Transport failures
    /// and malformed payloads are both plain errors, the caller renders them
    /// identically.
    async fn send_message(&self, outbound: &OutboundMessage) -> Result<SendReply>;
}

pub type GatewayBox = Box<dyn Gateway + Send + Sync>;
