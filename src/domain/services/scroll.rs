#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

/// Rows from the bottom of the feed before a manual scroll counts as leaving
/// the live view. The web client used 100px for this, a handful of terminal
/// rows serves the same purpose.
const DETACH_THRESHOLD: u16 = 5;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// The feed follows new content, every append scrolls to the bottom.
    #[default]
    Pinned,
    /// The user scrolled away. New content leaves the viewport untouched and
    /// the UI shows a "new messages" affordance instead.
    Detached,
}

#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub anchor: Anchor,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.scrollbar_state.prev();
        self.reanchor();
    }

    pub fn up_page(&mut self) {
        for _ in 0..10 {
            self.up();
        }
    }

    pub fn down(&mut self) {
        let mut clamp: u16 = 0;
        if self.list_length > self.viewport_length {
            clamp = self.list_length - self.viewport_length + 1;
        }

        self.position = self
            .position
            .saturating_add(1)
            .clamp(0, clamp.saturating_sub(1));
        self.scrollbar_state.next();
        self.reanchor();
    }

    pub fn down_page(&mut self) {
        for _ in 0..10 {
            self.down();
        }
    }

    pub fn is_detached(&self) -> bool {
        return self.anchor == Anchor::Detached;
    }

    /// The "new messages" affordance: snaps to the bottom and re-pins.
    pub fn jump_to_latest(&mut self) {
        self.anchor = Anchor::Pinned;
        self.last();
    }

    /// New content arrived. Only a pinned feed is forced to the bottom, a
    /// detached one keeps its position.
    pub fn follow(&mut self) {
        if self.anchor == Anchor::Pinned {
            self.last();
        }
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length)
            .viewport_content_length(viewport_length);
    }

    fn last(&mut self) {
        self.position = 0;
        if self.list_length > self.viewport_length {
            self.position = self.list_length - self.viewport_length;
        }

        self.scrollbar_state.last();
    }

    fn bottom_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    fn distance_from_bottom(&self) -> u16 {
        return self.bottom_position().saturating_sub(self.position);
    }

    fn reanchor(&mut self) {
        if self.distance_from_bottom() > DETACH_THRESHOLD {
            self.anchor = Anchor::Detached;
        } else {
            self.anchor = Anchor::Pinned;
        }
    }
}
