//! Terminal browser for mediawall galleries.
//!
//! A ratatui-based TUI over a fetched gallery: entry listing, detail view,
//! search/filter, sorting, re-fetch, and copy-URL-to-clipboard with the
//! transient desktop notification.

mod app;
mod ui;

pub use app::{App, AppAction, InputMode, SortColumn, View};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mediawall_core::{desktop_notifier, ClipboardNotifier, DesktopNotifications, SystemClipboard};
use mediawall_remote::ManifestFetcher;
use ratatui::prelude::*;
use std::io;

pub fn run(fetcher: ManifestFetcher) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("alternate screen: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal init: {e}"))?;

    let mut app = App::new(fetcher);
    app.refresh().ok();

    // A session without clipboard access still browses; copy just reports.
    let mut notifier = desktop_notifier().ok();

    let result = run_loop(&mut terminal, &mut app, &mut notifier);

    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| format!("leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("show cursor: {e}"))?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    notifier: &mut Option<ClipboardNotifier<SystemClipboard, DesktopNotifications>>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| format!("draw: {e}"))?;

        if event::poll(std::time::Duration::from_millis(250)).map_err(|e| format!("poll: {e}"))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("read: {e}"))? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key.code) {
                    AppAction::None => {}
                    AppAction::Quit => return Ok(()),
                    AppAction::Refresh => {
                        app.refresh().ok();
                    }
                    AppAction::Copy(url) => {
                        app.status_message = match notifier.as_mut() {
                            Some(n) => match n.copy(&url) {
                                Ok(()) => format!("copied {url}"),
                                Err(e) => format!("copy failed: {e}"),
                            },
                            None => "copy failed: clipboard unavailable".to_owned(),
                        };
                    }
                }
            }
        }
    }
}
