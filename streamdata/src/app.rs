use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

use crate::app_core::{AppCore, DataEventHandler};
use crate::background::{BackgroundTaskManager, Session};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use crate::ui::screens::Screen;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Runs commands against the live session
struct SessionCommandHandler {
    session: Session,
    task_manager: BackgroundTaskManager,
}

impl DataEventHandler for SessionCommandHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        executor::execute_command(command, state, &mut self.task_manager, &self.session);
    }
}

pub struct App {
    session: Session,
    log_buffer: LogBuffer,
}

impl App {
    pub fn new(session: Session, log_buffer: LogBuffer) -> Self {
        Self {
            session,
            log_buffer,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let mut terminal = self.init()?;

        let mut session_rx = self.session.subscribe();
        let mut core = AppCore::new(SessionCommandHandler {
            session: self.session.clone(),
            task_manager: BackgroundTaskManager::new(),
        });
        core.handle_data_event(DataEvent::SessionChanged(self.session.snapshot()));

        let mut event_stream = EventStream::new();

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(TICK_RATE);
        loop {
            if let Screen::Logs(logs_state) = core.state_mut().current_screen_mut() {
                logs_state.total_entries = self.log_buffer.len();
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, core.state(), &self.log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = core.state_mut().loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if key.kind == KeyEventKind::Press {
                            // Don't log on the logs screen to avoid a feedback loop
                            let on_logs_screen =
                                matches!(core.state().current_screen(), Screen::Logs(_));
                            if let Some(command) = core.handle_key(KeyEvent::from(key)) {
                                if !on_logs_screen {
                                    tracing::info!("Executed command: {:?}", command);
                                }
                            }
                        }
                    }
                }
                received = session_rx.recv() => match received {
                    Ok(event) => core.handle_data_event(DataEvent::from(event)),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Missed session events, resynchronizing");
                        core.handle_data_event(DataEvent::SessionChanged(self.session.snapshot()));
                    }
                    Err(RecvError::Closed) => {
                        tracing::error!("Session event channel closed");
                        break;
                    }
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        self.session.launcher().cancel();
        core.handler_mut().task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
