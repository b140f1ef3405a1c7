#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;

/// Projects the conversation into feed lines: a header per message, the
/// wrapped body, and a typing indicator while a response is pending. Line
/// count feeds the scroll state.
#[derive(Default)]
pub struct FeedView {
    lines: Vec<Line<'static>>,
}

impl FeedView {
    pub fn set_messages(&mut self, messages: &[Message], waiting: bool, width: u16) {
        let wrap_width = width.saturating_sub(2).max(20) as usize;
        let mut lines: Vec<Line<'static>> = vec![];

        for message in messages {
            lines.push(header_line(message));
            let body_style = match message.message_type() {
                MessageType::Error => Style::default().fg(Color::Red),
                MessageType::Normal => Style::default(),
            };
            for text_line in message.as_string_lines(wrap_width) {
                lines.push(Line::from(Span::styled(text_line, body_style)));
            }
            lines.push(Line::from(""));
        }

        if waiting {
            lines.push(Line::from(Span::styled(
                "Luminous is typing...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        self.lines = lines;
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}

fn header_line(message: &Message) -> Line<'static> {
    let color = match message.role {
        Role::User => Color::Cyan,
        Role::Assistant => Color::Green,
        Role::System => Color::Yellow,
    };

    let mut header = format!(
        "{} · {}",
        message.role.to_string(),
        message.timestamp.format("%H:%M")
    );
    if let Some(model) = &message.metadata.model_used {
        header.push_str(&format!(" · {model}"));
    }
    if let Some(tokens) = message.metadata.tokens_used {
        header.push_str(&format!(" · {tokens} tokens"));
    }

    return Line::from(Span::styled(
        header,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
}
