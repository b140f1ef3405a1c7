#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;

use crate::domain::models::SessionSummary;

/// Cached list of session summaries shown in the sidebar. Refreshes replace
/// the list wholesale, there is no incremental merge. A failed refresh never
/// reaches this type, the worker logs it and the cached list stays as-is.
#[derive(Default)]
pub struct SessionDirectory {
    sessions: Vec<SessionSummary>,
    cursor: usize,
}

impl SessionDirectory {
    pub fn sessions(&self) -> &[SessionSummary] {
        return &self.sessions;
    }

    pub fn is_empty(&self) -> bool {
        return self.sessions.is_empty();
    }

    pub fn replace(&mut self, sessions: Vec<SessionSummary>) {
        self.sessions = sessions;
        if !self.sessions.is_empty() {
            self.cursor = self.cursor.min(self.sessions.len() - 1);
        } else {
            self.cursor = 0;
        }
    }

    pub fn cursor(&self) -> usize {
        return self.cursor;
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.sessions.len() {
            self.cursor += 1;
        }
    }

    pub fn highlighted(&self) -> Option<&SessionSummary> {
        return self.sessions.get(self.cursor);
    }
}
