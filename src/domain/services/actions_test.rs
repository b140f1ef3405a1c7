use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Gateway;
use crate::domain::models::Message;
use crate::domain::models::OutboundMessage;
use crate::domain::models::SendReply;
use crate::domain::models::SessionSummary;
use crate::domain::services::AppState;

struct OfflineGateway {}

#[async_trait]
impl Gateway for OfflineGateway {
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        bail!("connection refused");
    }

    async fn session_history(&self, _id: &str) -> Result<Vec<Message>> {
        bail!("connection refused");
    }

    async fn send_message(&self, _outbound: &OutboundMessage) -> Result<SendReply> {
        bail!("connection refused");
    }
}

#[tokio::test]
async fn it_keeps_cached_directory_on_failed_refresh() -> Result<()> {
    let mut app_state = AppState::default();
    app_state.apply_sessions_loaded(vec![SessionSummary {
        id: "s1".to_string(),
        title: "First".to_string(),
        ..SessionSummary::default()
    }]);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    action_tx.send(Action::RefreshSessions())?;
    drop(action_tx);
    ActionsService::start(Box::new(OfflineGateway {}), event_tx, &mut action_rx).await?;

    // No event reached the UI, so the cached list was never replaced.
    assert!(event_rx.recv().await.is_none());
    assert_eq!(app_state.directory.sessions().len(), 1);
    assert_eq!(app_state.directory.sessions()[0].id, "s1");

    return Ok(());
}

#[tokio::test]
async fn it_reports_completion_for_failed_send() -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    action_tx.send(Action::SendMessage(OutboundMessage {
        session_id: None,
        content: "hello".to_string(),
        model_tier: "fast".to_string(),
        generation: 7,
    }))?;
    drop(action_tx);
    ActionsService::start(Box::new(OfflineGateway {}), event_tx, &mut action_rx).await?;

    match event_rx.recv().await.unwrap() {
        Event::SendCompleted { generation, reply } => {
            assert_eq!(generation, 7);
            assert!(reply.is_err());
        }
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_completion_for_failed_history_load() -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    action_tx.send(Action::LoadHistory {
        session_id: "s1".to_string(),
        generation: 3,
    })?;
    drop(action_tx);
    ActionsService::start(Box::new(OfflineGateway {}), event_tx, &mut action_rx).await?;

    match event_rx.recv().await.unwrap() {
        Event::HistoryLoaded {
            generation,
            session_id,
            history,
        } => {
            assert_eq!(generation, 3);
            assert_eq!(session_id, "s1");
            assert!(history.is_err());
        }
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}
