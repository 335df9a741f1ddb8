//! Terminal UI for Strictly Chess

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{Cursor, UiAction, move_cursor, translate};
pub use ui::{BoardGeometry, draw, theme_color};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::config::ClientConfig;
use crate::sync::{SyncChannel, WebSocketTransport};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// How long to wait for terminal input before checking the channel again.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Connects to the configured authority and runs the TUI client.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
pub async fn run(config: &ClientConfig) -> Result<()> {
    let transport = WebSocketTransport::connect(config.server_url()).await?;
    let channel = SyncChannel::new(transport);
    run_with_channel(config, channel).await
}

/// Runs the TUI client over an already established channel.
pub async fn run_with_channel(config: &ClientConfig, mut channel: SyncChannel) -> Result<()> {
    info!("Starting Strictly Chess TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if *config.mouse() {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_loop(&mut terminal, &mut app, &mut channel, config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Client loop error");
    }
    info!("TUI stopped");
    res
}

/// Drain inbound events, draw, then wait briefly for user input.
#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    channel: &mut SyncChannel,
    config: &ClientConfig,
) -> Result<()> {
    loop {
        while let Some(item) = channel.poll() {
            app.handle_inbound(item);
        }

        let status = app.status_line();
        let mut geometry = None;
        terminal.draw(|frame| {
            geometry = Some(draw(
                frame,
                app.controller().model(),
                app.controller().dragged(),
                app.cursor(),
                &status,
                config.theme(),
            ));
        })?;
        if let Some(geometry) = geometry {
            app.set_geometry(geometry);
        }

        if app.should_quit() {
            return Ok(());
        }

        if event::poll(INPUT_POLL)? {
            let terminal_event = event::read()?;
            let Some(action) = translate(&terminal_event) else {
                continue;
            };
            if let Some(outbound) = app.handle_action(action) {
                if let Err(e) = channel.emit(outbound).await {
                    app.note_channel_error(&e);
                }
            }
        } else {
            tokio::task::yield_now().await;
        }
    }
}
