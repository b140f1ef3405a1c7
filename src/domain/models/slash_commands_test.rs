use super::SlashCommand;

#[test]
fn it_parses_quit() {
    for cmd in ["/q", "/quit", "/exit"] {
        let parsed = SlashCommand::parse(cmd).unwrap();
        assert!(parsed.is_quit());
    }
}

#[test]
fn it_parses_model_list() {
    for cmd in ["/ml", "/models", "/modellist"] {
        let parsed = SlashCommand::parse(cmd).unwrap();
        assert!(parsed.is_model_list());
    }
}

#[test]
fn it_parses_model_set_with_args() {
    let parsed = SlashCommand::parse("/model 2").unwrap();
    assert!(parsed.is_model_set());
    assert_eq!(parsed.args, vec!["2".to_string()]);
}

#[test]
fn it_parses_new_chat() {
    for cmd in ["/n", "/new"] {
        let parsed = SlashCommand::parse(cmd).unwrap();
        assert!(parsed.is_new_chat());
    }
}

#[test]
fn it_parses_help() {
    for cmd in ["/h", "/help"] {
        let parsed = SlashCommand::parse(cmd).unwrap();
        assert!(parsed.is_help());
    }
}

#[test]
fn it_ignores_regular_text() {
    assert!(SlashCommand::parse("hello world").is_none());
    assert!(SlashCommand::parse("/unknown").is_none());
}
