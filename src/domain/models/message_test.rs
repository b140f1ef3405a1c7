use super::Message;
use super::MessageMetadata;
use super::MessageType;
use super::Role;

#[test]
fn it_executes_new() {
    let msg = Message::new(Role::Assistant, "Hi there!");
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
    assert_eq!(msg.metadata, MessageMetadata::default());
    assert!(!msg.id.is_empty());
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Role::User, "\t\tHi there!");
    assert_eq!(msg.text, "    Hi there!".to_string());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Role::Assistant, MessageType::Error, "It broke!");
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_executes_with_metadata() {
    let msg = Message::new(Role::Assistant, "Hi there!").with_metadata(MessageMetadata {
        model_used: Some("fast".to_string()),
        tokens_used: Some(42),
        rate_limit_remaining: Some(9),
    });

    assert_eq!(msg.metadata.model_used, Some("fast".to_string()));
    assert_eq!(msg.metadata.tokens_used, Some(42));
    assert_eq!(msg.metadata.rate_limit_remaining, Some(9));
}

#[test]
fn it_executes_as_string_lines() {
    let msg = Message::new(
        Role::Assistant,
        "This is a medium long line that is wrapped at a fixed width.\n\nAnd a second paragraph.",
    );
    let lines = msg.as_string_lines(30);

    insta::assert_yaml_snapshot!(lines, @r###"
    ---
    - This is a medium long line
    - that is wrapped at a fixed
    - width.
    - " "
    - And a second paragraph.
    "###);
}

#[test]
fn it_parses_roles() {
    assert_eq!(Role::parse("user"), Role::User);
    assert_eq!(Role::parse("assistant"), Role::Assistant);
    assert_eq!(Role::parse("system"), Role::System);
    assert_eq!(Role::parse("anything-else"), Role::Assistant);
}
