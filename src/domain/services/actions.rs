#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GatewayBox;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /models (/ml) - Lists all models in the catalog.
- /model (/m) [MODEL_ID,MODEL_INDEX] - Sets the specified model as the active model for the next message. You can pass either the model id, or the index from /models.
- /new (/n) - Starts a new, unsaved conversation.
- /quit /exit (/q) - Exit Luminous.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up, or move up in the session list when it has focus.
- Down arrow - Scroll down, or move down in the session list when it has focus.
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+B - Toggle the session sidebar and move focus to it.
- CTRL+N - Start a new chat.
- End - Jump to the newest messages and follow them again.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

/// Runs backend calls off the UI loop. Every send and history load reports a
/// completion event back, success or failure, which is what guarantees the
/// typing flag always clears. Directory refreshes are the exception: their
/// failures are logged and swallowed so the cached list stays usable.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        gateway: GatewayBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = rx.recv().await;
            if action.is_none() {
                return Ok(());
            }

            match action.unwrap() {
                Action::SendMessage(outbound) => {
                    let generation = outbound.generation;
                    let reply = gateway.send_message(&outbound).await;
                    tx.send(Event::SendCompleted { generation, reply })?;
                }
                Action::LoadHistory {
                    session_id,
                    generation,
                } => {
                    let history = gateway.session_history(&session_id).await;
                    tx.send(Event::HistoryLoaded {
                        generation,
                        session_id,
                        history,
                    })?;
                }
                Action::RefreshSessions() => match gateway.list_sessions().await {
                    Ok(sessions) => {
                        tx.send(Event::SessionsLoaded(sessions))?;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "session list refresh failed, keeping cached list");
                    }
                },
            }
        }
    }
}
