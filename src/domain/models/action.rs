use super::OutboundMessage;

pub enum Action {
    SendMessage(OutboundMessage),
    LoadHistory { session_id: String, generation: u64 },
    RefreshSessions(),
}
