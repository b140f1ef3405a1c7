use super::FeedView;
use crate::domain::models::Message;
use crate::domain::models::MessageMetadata;
use crate::domain::models::Role;

#[test]
fn it_builds_header_body_and_separator_per_message() {
    let mut feed = FeedView::default();
    feed.set_messages(
        &[
            Message::new(Role::User, "hello"),
            Message::new(Role::Assistant, "hi"),
        ],
        false,
        80,
    );

    // Two messages, each with a header, one body line, and a blank line.
    assert_eq!(feed.len(), 6);
}

#[test]
fn it_appends_typing_indicator_while_waiting() {
    let mut feed = FeedView::default();
    feed.set_messages(&[Message::new(Role::User, "hello")], true, 80);
    assert_eq!(feed.len(), 4);

    feed.set_messages(&[Message::new(Role::User, "hello")], false, 80);
    assert_eq!(feed.len(), 3);
}

#[test]
fn it_wraps_long_messages() {
    let mut feed = FeedView::default();
    let text = "word ".repeat(40);
    feed.set_messages(&[Message::new(Role::Assistant, text.trim())], false, 30);

    assert!(feed.len() > 5);
}

#[test]
fn it_annotates_headers_with_metadata() {
    let mut feed = FeedView::default();
    let message = Message::new(Role::Assistant, "hi").with_metadata(MessageMetadata {
        model_used: Some("fast".to_string()),
        tokens_used: Some(12),
        rate_limit_remaining: None,
    });
    feed.set_messages(&[message], false, 80);

    let header = feed.lines[0]
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<String>();
    assert!(header.contains("fast"));
    assert!(header.contains("12 tokens"));
}
