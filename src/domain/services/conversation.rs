#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::OutboundMessage;
use crate::domain::models::Role;
use crate::domain::models::SendReply;

pub const SEND_ERROR_TEXT: &str = "⚠️ Error: Could not connect to the Luminous AI Core. Please ensure the backend is running on port 5000.";
pub const HISTORY_ERROR_TEXT: &str = "⚠️ Error loading chat history.";

/// In-memory message list for the active session, plus the send/receive
/// cycle around it. Message order is append-only chronological. At most one
/// request is in flight at a time, enforced by `waiting_for_backend` rather
/// than cancellation.
///
/// Every state change that abandons the current view (selecting a session,
/// starting a new chat) bumps `generation`. Completions are stamped with the
/// generation that issued them and are dropped when stale, so a late reply
/// for an abandoned session can never land in the wrong feed.
#[derive(Default)]
pub struct Conversation {
    messages: Vec<Message>,
    active_session: Option<String>,
    waiting_for_backend: bool,
    generation: u64,
}

impl Conversation {
    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn active_session(&self) -> Option<&str> {
        return self.active_session.as_deref();
    }

    pub fn is_waiting(&self) -> bool {
        return self.waiting_for_backend;
    }

    pub fn generation(&self) -> u64 {
        return self.generation;
    }

    /// Surfaces a local notice in the feed without any network involvement,
    /// used for slash command output.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Starts a send. The user message is appended optimistically before any
    /// network confirmation and is never rolled back. Returns `None` without
    /// touching state when a send is already in flight or the content is
    /// blank, a rejected attempt is a no-op rather than a queued operation.
    pub fn begin_send(&mut self, content: &str, model_tier: &str) -> Option<OutboundMessage> {
        if self.waiting_for_backend || content.trim().is_empty() {
            return None;
        }

        self.messages.push(Message::new(Role::User, content));
        self.waiting_for_backend = true;

        return Some(OutboundMessage {
            session_id: self.active_session.clone(),
            content: content.to_string(),
            model_tier: model_tier.to_string(),
            generation: self.generation,
        });
    }

    /// Applies the outcome of a send. Success appends the assistant reply and
    /// adopts the backend-issued session id when this was a new conversation.
    /// Any failure appends a single synthetic assistant error message with no
    /// retry. Either way the typing flag clears, so the composer can never be
    /// left permanently disabled.
    ///
    /// Returns true when the session directory should be refreshed, which is
    /// the case after the first reply of a new conversation.
    pub fn apply_send_result(&mut self, generation: u64, reply: Result<SendReply>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale send reply dropped");
            return false;
        }

        self.waiting_for_backend = false;

        match reply {
            Ok(reply) => {
                let was_new_session = self.active_session.is_none();
                if was_new_session {
                    self.active_session = reply.session_id;
                }
                self.messages.push(reply.message);
                return was_new_session;
            }
            Err(err) => {
                tracing::error!(error = %err, "send failed");
                self.messages.push(Message::new_with_type(
                    Role::Assistant,
                    MessageType::Error,
                    SEND_ERROR_TEXT,
                ));
                return false;
            }
        }
    }

    /// Prepares to load the history of another session: the feed is cleared
    /// and the pending flag raised while the fetch runs. The active session
    /// pointer is only adopted once the fetch succeeds. Returns the
    /// generation to stamp on the history request.
    pub fn begin_history_load(&mut self) -> u64 {
        self.messages.clear();
        self.waiting_for_backend = true;
        self.generation += 1;
        return self.generation;
    }

    pub fn apply_history_result(
        &mut self,
        generation: u64,
        session_id: String,
        history: Result<Vec<Message>>,
    ) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale history dropped");
            return;
        }

        self.waiting_for_backend = false;

        match history {
            Ok(messages) => {
                self.messages = messages;
                self.active_session = Some(session_id);
            }
            Err(err) => {
                // The pointer keeps its prior value, the failed id is not
                // silently adopted.
                tracing::error!(error = %err, session_id, "history load failed");
                self.messages = vec![Message::new_with_type(
                    Role::Assistant,
                    MessageType::Error,
                    HISTORY_ERROR_TEXT,
                )];
            }
        }
    }

    /// Clears the feed and the active session pointer synchronously, with no
    /// network call.
    pub fn start_new_chat(&mut self) {
        self.messages.clear();
        self.active_session = None;
        self.waiting_for_backend = false;
        self.generation += 1;
    }

    /// Advisory quota from the most recent assistant message, purely
    /// informational and never enforced client-side.
    pub fn rate_limit_remaining(&self) -> Option<u32> {
        return self
            .messages
            .iter()
            .rev()
            .find(|message| return message.role == Role::Assistant)
            .and_then(|message| return message.metadata.rate_limit_remaining);
    }
}
