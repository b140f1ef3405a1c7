#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Gateway;
use crate::domain::models::Message;
use crate::domain::models::MessageMetadata;
use crate::domain::models::OutboundMessage;
use crate::domain::models::Role;
use crate::domain::models::SendReply;
use crate::domain::models::SessionSummary;

/// Standard response wrapper used by every chat endpoint. A false success
/// flag or missing data is a shape failure and treated exactly like a
/// transport failure.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MetadataPayload {
    model_used: Option<String>,
    tokens_used: Option<u32>,
    rate_limit_remaining: Option<u32>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MessagePayload {
    #[serde(rename = "_id")]
    id: Option<String>,
    role: String,
    content: String,
    created_at: Option<String>,
    metadata: Option<MetadataPayload>,
}

impl MessagePayload {
    fn into_message(self) -> Message {
        let mut message = Message::new(Role::parse(&self.role), &self.content);

        if let Some(id) = self.id {
            message.id = id;
        }
        if let Some(created_at) = &self.created_at {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(created_at) {
                message.timestamp = parsed.with_timezone(&Utc);
            }
        }

        let metadata = self.metadata.unwrap_or_default();
        message.metadata = MessageMetadata {
            model_used: metadata.model_used,
            tokens_used: metadata.tokens_used,
            rate_limit_remaining: metadata.rate_limit_remaining,
        };

        return message;
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest {
    session_id: Option<String>,
    content: String,
    model_tier: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SendData {
    session_id: Option<String>,
    ai_message: Option<MessagePayload>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct HistoryData {
    messages: Vec<MessagePayload>,
}

pub struct HttpGateway {
    url: String,
    token: String,
    timeout: Duration,
}

impl Default for HttpGateway {
    fn default() -> HttpGateway {
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(30000);

        return HttpGateway {
            url: Config::get(ConfigKey::ServerUrl),
            token: Config::get(ConfigKey::AuthToken),
            timeout: Duration::from_millis(timeout),
        };
    }
}

impl HttpGateway {
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        return self.authorize(
            reqwest::Client::new()
                .get(format!("{url}{path}", url = self.url))
                .timeout(self.timeout),
        );
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        return self.authorize(
            reqwest::Client::new()
                .post(format!("{url}{path}", url = self.url))
                .timeout(self.timeout),
        );
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            return builder;
        }

        return builder.header("Authorization", format!("Bearer {}", self.token));
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let res = self.get("/api/chat/sessions").send().await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "session list request failed");
            bail!("session list request failed");
        }

        let envelope = res.json::<Envelope<Vec<SessionSummary>>>().await?;
        if !envelope.success {
            bail!("session list response was not successful");
        }

        match envelope.data {
            Some(sessions) => return Ok(sessions),
            None => bail!("session list response is missing data"),
        }
    }

    async fn session_history(&self, id: &str) -> Result<Vec<Message>> {
        let res = self.get(&format!("/api/chat/session/{id}")).send().await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                session_id = id,
                "session history request failed"
            );
            bail!("session history request failed");
        }

        let envelope = res.json::<Envelope<HistoryData>>().await?;
        if !envelope.success {
            bail!("session history response was not successful");
        }

        let data = match envelope.data {
            Some(data) => data,
            None => bail!("session history response is missing data"),
        };

        let messages = data
            .messages
            .into_iter()
            .map(|payload| {
                return payload.into_message();
            })
            .collect::<Vec<Message>>();

        return Ok(messages);
    }

    async fn send_message(&self, outbound: &OutboundMessage) -> Result<SendReply> {
        let req = SendRequest {
            session_id: outbound.session_id.clone(),
            content: outbound.content.to_string(),
            model_tier: outbound.model_tier.to_string(),
        };

        let res = self.post("/api/chat/message").json(&req).send().await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "send message request failed");
            bail!("send message request failed");
        }

        let envelope = res.json::<Envelope<SendData>>().await?;
        if !envelope.success {
            bail!("send message response was not successful");
        }

        let data = match envelope.data {
            Some(data) => data,
            None => bail!("send message response is missing data"),
        };

        let ai_message = match data.ai_message {
            Some(payload) => payload.into_message(),
            None => bail!("send message response is missing the assistant message"),
        };

        return Ok(SendReply {
            session_id: data.session_id,
            message: ai_message,
        });
    }
}
