use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

const SIDEBAR_WIDTH: u16 = 32;

fn render_sidebar<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let items = app_state
        .directory
        .sessions()
        .iter()
        .map(|session| {
            let mut title = session.title.to_string();
            if title.is_empty() {
                title = session.id.to_string();
            }
            return ListItem::new(title);
        })
        .collect::<Vec<ListItem>>();

    let mut list_state = ListState::default();
    if !app_state.directory.is_empty() {
        list_state.select(Some(app_state.directory.cursor()));
    }

    let mut border_style = Style::default();
    if app_state.sidebar_focused {
        border_style = border_style.fg(Color::Green);
    }

    frame.render_stateful_widget(
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title("Sessions"),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
        rect,
        &mut list_state,
    );
}

fn render_new_messages_affordance<B: Backend>(frame: &mut Frame<B>, feed_rect: Rect) {
    if feed_rect.height < 2 {
        return;
    }

    let rect = Rect {
        x: feed_rect.x,
        y: feed_rect.y + feed_rect.height - 1,
        width: feed_rect.width,
        height: 1,
    };

    frame.render_widget(
        Paragraph::new("· new messages · press End ·")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    action_tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            let mut chat_rect = frame.size();
            let mut sidebar_rect = None;

            if app_state.sidebar_open {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![Constraint::Max(SIDEBAR_WIDTH), Constraint::Min(1)])
                    .split(frame.size());
                sidebar_rect = Some(columns[0]);
                chat_rect = columns[1];
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
                .split(chat_rect);

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            app_state
                .feed
                .render(frame, layout[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if app_state.scroll.is_detached() {
                render_new_messages_affordance(frame, layout[0]);
            }

            if app_state.conversation.is_waiting() {
                loading.render(frame, layout[1]);
            } else {
                textarea.set_block(TextArea::composer_block(app_state.composer_title()));
                frame.render_widget(textarea.widget(), layout[1]);
            }

            if let Some(rect) = sidebar_rect {
                render_sidebar(frame, rect, app_state);
            }
        })?;

        match events.next().await? {
            Event::SendCompleted { generation, reply } => {
                app_state.apply_send_completed(generation, reply, &action_tx)?;
            }
            Event::HistoryLoaded {
                generation,
                session_id,
                history,
            } => {
                app_state.apply_history_loaded(generation, session_id, history);
            }
            Event::SessionsLoaded(sessions) => {
                app_state.apply_sessions_loaded(sessions);
            }
            Event::KeyboardCTRLC() => break,
            Event::KeyboardEnter() => {
                if app_state.sidebar_focused {
                    app_state.select_highlighted_session(&action_tx)?;
                    continue;
                }

                // A send already in flight makes this a no-op, not a queue.
                if app_state.conversation.is_waiting() {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = TextArea::default();
                if app_state.submit(&input_str, &action_tx)? {
                    break;
                }
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.sidebar_focused && !app_state.conversation.is_waiting() {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.sidebar_focused && !app_state.conversation.is_waiting() {
                    textarea.insert_str(&text.replace('\r', "\n"));
                }
            }
            Event::UIScrollUp() => {
                if app_state.sidebar_focused {
                    app_state.directory.cursor_up();
                } else {
                    app_state.scroll.up();
                }
            }
            Event::UIScrollDown() => {
                if app_state.sidebar_focused {
                    app_state.directory.cursor_down();
                } else {
                    app_state.scroll.down();
                }
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIJumpToLatest() => {
                app_state.scroll.jump_to_latest();
            }
            Event::UISidebarToggle() => {
                app_state.toggle_sidebar();
            }
            Event::UINewChat() => {
                app_state.start_new_chat();
            }
            Event::UIResize() => {}
            Event::UITick() => {}
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    action_tx: mpsc::UnboundedSender<Action>,
    event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut app_state = AppState::default();
    let mut events = EventsService::new(event_rx);

    // Initial directory fetch, refreshed again after sends create sessions.
    action_tx.send(Action::RefreshSessions())?;

    start_loop(&mut terminal, &mut app_state, action_tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
