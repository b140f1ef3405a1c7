use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::SendReply;
use crate::domain::models::SessionSummary;
use crate::domain::models::MODEL_CATALOG;

fn sized_app_state(width: u16) -> AppState {
    let mut app_state = AppState::default();
    app_state.set_rect(Rect::new(0, 0, width, 40));
    return app_state;
}

mod submit {
    use super::*;

    #[test]
    fn it_sends_prompt_through_channel() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(120);

        let should_break = app_state.submit("hello", &tx)?;
        assert!(!should_break);
        assert!(app_state.conversation.is_waiting());

        match rx.blocking_recv().unwrap() {
            Action::SendMessage(outbound) => {
                assert_eq!(outbound.content, "hello");
                assert_eq!(outbound.model_tier, MODEL_CATALOG[0].id);
                assert_eq!(outbound.session_id, None);
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_ignores_submission_while_waiting() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(120);

        app_state.submit("first", &tx)?;
        app_state.submit("second", &tx)?;

        assert_eq!(app_state.conversation.messages().len(), 1);
        rx.blocking_recv().unwrap();
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_breaks_on_quit() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(120);

        let should_break = app_state.submit("/q", &tx)?;
        assert!(should_break);
        assert!(!app_state.conversation.is_waiting());

        return Ok(());
    }

    #[test]
    fn it_lists_models() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(120);

        app_state.submit("/models", &tx)?;

        let last = app_state.conversation.messages().last().unwrap();
        assert_eq!(last.role, Role::System);
        for model in MODEL_CATALOG {
            assert!(last.text.contains(model.name));
        }
        assert!(last.text.contains("(active)"));

        return Ok(());
    }

    #[test]
    fn it_switches_models_for_next_send_only() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(120);

        app_state.submit("/model 2", &tx)?;
        assert_eq!(app_state.selector.active().id, MODEL_CATALOG[1].id);

        app_state.submit("hello", &tx)?;
        match rx.blocking_recv().unwrap() {
            Action::SendMessage(outbound) => {
                assert_eq!(outbound.model_tier, MODEL_CATALOG[1].id);
            }
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_reports_invalid_model() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(120);

        app_state.submit("/model 99", &tx)?;

        let last = app_state.conversation.messages().last().unwrap();
        assert_eq!(last.message_type(), MessageType::Error);
        assert_eq!(app_state.selector.active().id, MODEL_CATALOG[0].id);

        return Ok(());
    }
}

mod completions {
    use super::*;

    #[test]
    fn it_refreshes_directory_after_first_reply() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(120);

        app_state.submit("hello", &tx)?;
        let outbound = match rx.blocking_recv().unwrap() {
            Action::SendMessage(outbound) => outbound,
            _ => bail!("Wrong enum"),
        };

        app_state.apply_send_completed(
            outbound.generation,
            Ok(SendReply {
                session_id: Some("s1".to_string()),
                message: Message::new(Role::Assistant, "hi"),
            }),
            &tx,
        )?;

        assert_eq!(app_state.conversation.active_session(), Some("s1"));
        match rx.blocking_recv().unwrap() {
            Action::RefreshSessions() => {}
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_does_not_refresh_after_failed_send() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(120);

        app_state.submit("hello", &tx)?;
        let outbound = match rx.blocking_recv().unwrap() {
            Action::SendMessage(outbound) => outbound,
            _ => bail!("Wrong enum"),
        };

        app_state.apply_send_completed(outbound.generation, Err(anyhow!("500")), &tx)?;

        assert!(rx.try_recv().is_err());
        assert!(!app_state.conversation.is_waiting());

        return Ok(());
    }
}

mod sidebar {
    use super::*;

    fn one_session() -> Vec<SessionSummary> {
        return vec![SessionSummary {
            id: "s1".to_string(),
            title: "First".to_string(),
            ..SessionSummary::default()
        }];
    }

    #[test]
    fn it_collapses_on_narrow_viewport_select() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(80);
        app_state.apply_sessions_loaded(one_session());
        app_state.toggle_sidebar();
        assert!(app_state.sidebar_open);

        app_state.select_highlighted_session(&tx)?;

        assert!(!app_state.sidebar_open);
        match rx.blocking_recv().unwrap() {
            Action::LoadHistory { session_id, .. } => assert_eq!(session_id, "s1"),
            _ => bail!("Wrong enum"),
        }

        return Ok(());
    }

    #[test]
    fn it_stays_open_on_wide_viewport_select() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = sized_app_state(140);
        app_state.apply_sessions_loaded(one_session());
        app_state.toggle_sidebar();

        app_state.select_highlighted_session(&tx)?;

        assert!(app_state.sidebar_open);
        return Ok(());
    }

    #[test]
    fn it_collapses_on_narrow_viewport_new_chat() {
        let mut app_state = sized_app_state(80);
        app_state.toggle_sidebar();

        app_state.start_new_chat();

        assert!(!app_state.sidebar_open);
        assert!(app_state.conversation.messages().is_empty());
    }
}

mod composer_title {
    use super::*;
    use crate::domain::models::MessageMetadata;

    #[test]
    fn it_shows_active_model() {
        let app_state = AppState::default();
        let title = app_state.composer_title();
        assert!(title.contains(MODEL_CATALOG[0].name));
        assert!(!title.contains("left"));
    }

    #[test]
    fn it_appends_quota_when_known() {
        let mut app_state = AppState::default();
        app_state.conversation.add_message(
            Message::new(Role::Assistant, "hi").with_metadata(MessageMetadata {
                rate_limit_remaining: Some(7),
                ..MessageMetadata::default()
            }),
        );

        assert!(app_state.composer_title().contains("7 left"));
    }
}
