#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::Conversation;
use super::FeedView;
use super::Scroll;
use super::SessionDirectory;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::ModelSelector;
use crate::domain::models::Role;
use crate::domain::models::SendReply;
use crate::domain::models::SessionSummary;
use crate::domain::models::SlashCommand;

/// Below this terminal width the sidebar auto-collapses after selecting a
/// session or starting a new chat, mirroring the small-viewport behavior of
/// the web client.
const NARROW_VIEWPORT_WIDTH: u16 = 100;

pub struct AppState {
    pub conversation: Conversation,
    pub directory: SessionDirectory,
    pub selector: ModelSelector,
    pub feed: FeedView,
    pub scroll: Scroll,
    pub sidebar_open: bool,
    pub sidebar_focused: bool,
    pub last_known_width: u16,
    pub last_known_height: u16,
}

impl Default for AppState {
    fn default() -> AppState {
        return AppState {
            conversation: Conversation::default(),
            directory: SessionDirectory::default(),
            selector: ModelSelector::from_tier(&Config::get(ConfigKey::ModelTier)),
            feed: FeedView::default(),
            scroll: Scroll::default(),
            sidebar_open: false,
            sidebar_focused: false,
            last_known_width: 0,
            last_known_height: 0,
        };
    }
}

impl AppState {
    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    /// Handles a composer submission. Returns true when the app should exit.
    pub fn submit(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if let Some(command) = SlashCommand::parse(input) {
            let should_break = self.handle_slash_command(&command);
            self.sync_dependants();
            return Ok(should_break);
        }

        if let Some(outbound) = self
            .conversation
            .begin_send(input, self.selector.active().id)
        {
            tx.send(Action::SendMessage(outbound))?;
        }

        self.sync_dependants();
        return Ok(false);
    }

    pub fn apply_send_completed(
        &mut self,
        generation: u64,
        reply: Result<SendReply>,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        // Refreshing the directory after the first reply of a new session is
        // fire-and-forget, the worker owns its error handling.
        if self.conversation.apply_send_result(generation, reply) {
            tx.send(Action::RefreshSessions())?;
        }

        self.sync_dependants();
        return Ok(());
    }

    pub fn apply_history_loaded(
        &mut self,
        generation: u64,
        session_id: String,
        history: Result<Vec<Message>>,
    ) {
        self.conversation
            .apply_history_result(generation, session_id, history);
        self.sync_dependants();
    }

    pub fn apply_sessions_loaded(&mut self, sessions: Vec<SessionSummary>) {
        self.directory.replace(sessions);
    }

    pub fn select_highlighted_session(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let session_id = match self.directory.highlighted() {
            Some(summary) => summary.id.to_string(),
            None => return Ok(()),
        };

        let generation = self.conversation.begin_history_load();
        tx.send(Action::LoadHistory {
            session_id,
            generation,
        })?;

        self.sidebar_focused = false;
        self.collapse_sidebar_on_narrow_viewport();
        self.sync_dependants();
        return Ok(());
    }

    pub fn start_new_chat(&mut self) {
        self.conversation.start_new_chat();
        self.sidebar_focused = false;
        self.collapse_sidebar_on_narrow_viewport();
        self.sync_dependants();
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_focused = self.sidebar_open;
    }

    /// Composer title: active model plus the advisory remaining-quota figure
    /// when the backend reported one.
    pub fn composer_title(&self) -> String {
        let model = self.selector.active();
        let mut title = format!("{} ({})", model.name, model.provider);
        if let Some(remaining) = self.conversation.rate_limit_remaining() {
            title = format!("{title} · {remaining} left");
        }

        return title;
    }

    fn handle_slash_command(&mut self, command: &SlashCommand) -> bool {
        if command.is_quit() {
            return true;
        }

        if command.is_new_chat() {
            self.start_new_chat();
            return false;
        }

        if command.is_model_list() {
            let active = self.selector.active().id;
            let listing = self
                .selector
                .list()
                .iter()
                .enumerate()
                .map(|(idx, model)| {
                    let n = idx + 1;
                    let mut line = format!("- ({n}) {} ({}), {}", model.name, model.provider, model.id);
                    if model.id == active {
                        line = format!("{line} (active)");
                    }
                    return line;
                })
                .collect::<Vec<String>>();

            self.conversation
                .add_message(Message::new(Role::System, &listing.join("\n")));
            return false;
        }

        if command.is_model_set() {
            match command.args.first() {
                Some(entry) => match self.selector.select(entry) {
                    Ok(model) => {
                        self.conversation.add_message(Message::new(
                            Role::System,
                            &format!("Switched to {} ({}).", model.name, model.provider),
                        ));
                    }
                    Err(err) => {
                        self.conversation.add_message(Message::new_with_type(
                            Role::System,
                            MessageType::Error,
                            &err.to_string(),
                        ));
                    }
                },
                None => {
                    self.conversation.add_message(Message::new_with_type(
                        Role::System,
                        MessageType::Error,
                        "You must specify a model name or index with `/model`. Run `/help` for details.",
                    ));
                }
            }
            return false;
        }

        if command.is_help() {
            self.conversation
                .add_message(Message::new(Role::System, &help_text()));
        }

        return false;
    }

    fn collapse_sidebar_on_narrow_viewport(&mut self) {
        if self.last_known_width < NARROW_VIEWPORT_WIDTH {
            self.sidebar_open = false;
        }
    }

    fn sync_dependants(&mut self) {
        self.feed.set_messages(
            self.conversation.messages(),
            self.conversation.is_waiting(),
            self.last_known_width,
        );

        self.scroll
            .set_state(self.feed.len() as u16, self.last_known_height);
        self.scroll.follow();
    }
}
