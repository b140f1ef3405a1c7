use anyhow::Result;
use tui_textarea::Input;

use super::Message;
use super::SendReply;
use super::SessionSummary;

pub enum Event {
    SendCompleted {
        generation: u64,
        reply: Result<SendReply>,
    },
    HistoryLoaded {
        generation: u64,
        session_id: String,
        history: Result<Vec<Message>>,
    },
    SessionsLoaded(Vec<SessionSummary>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIJumpToLatest(),
    UINewChat(),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UISidebarToggle(),
    UITick(),
}
