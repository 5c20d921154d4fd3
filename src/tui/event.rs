use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::debug;

use super::app::{App, PageStatus};
use super::ui;
use crate::zendesk::{TicketPage, ZendeskClient};

/// Message sent from background fetch tasks to the main loop
enum FetchResult {
    Page(TicketPage),
    Error(String),
}

pub async fn run_app(mut app: App, client: ZendeskClient) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channel for background fetch results
    let (tx, rx) = mpsc::unbounded_channel::<FetchResult>();

    // Main loop
    let result = run_loop(&mut terminal, &mut app, client, tx, rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: ZendeskClient,
    tx: mpsc::UnboundedSender<FetchResult>,
    mut rx: mpsc::UnboundedReceiver<FetchResult>,
) -> Result<()> {
    // Get terminal size for scroll calculations
    let visible_height = terminal.size()?.height.saturating_sub(4);
    let jump_rows = visible_height.saturating_sub(2).max(1) as usize;

    loop {
        // Process any completed fetch results (non-blocking)
        while let Ok(result) = rx.try_recv() {
            match result {
                FetchResult::Page(page) => app.append_page(page),
                FetchResult::Error(error) => app.set_page_error(error),
            }
        }

        // Kick off the next page fetch when the selection nears the end of
        // the cache (or nothing has been fetched yet)
        if app.needs_fetch() {
            app.set_page_loading();
            let next_page = app.next_page.clone();
            let client = client.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let fetched = match next_page {
                    Some(url) => client.fetch_page(&url).await,
                    None => client.list_tickets(1).await,
                };
                let result = match fetched {
                    Ok(page) => FetchResult::Page(page),
                    Err(e) => FetchResult::Error(e.to_string()),
                };
                let _ = tx.send(result);
            });
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle input with timeout
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    KeyCode::Char('J') => app.scroll_down(3, visible_height),
                    KeyCode::Char('K') => app.scroll_up(3),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::PageDown => app.jump_down(jump_rows),
                    KeyCode::PageUp => app.jump_up(jump_rows),
                    KeyCode::Char('d') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        app.scroll_down(visible_height / 2, visible_height);
                    }
                    KeyCode::Char('u') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        app.scroll_up(visible_height / 2);
                    }
                    KeyCode::Char('o') | KeyCode::Enter => {
                        open_selected_ticket(app);
                    }
                    KeyCode::Char('r') => {
                        // Refresh: drop the cache and refetch from page 1.
                        // A fetch already in flight will be appended when it
                        // lands, so only reset when idle.
                        if app.page_status != PageStatus::Loading {
                            app.reset();
                        }
                    }
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        app.quit()
                    }
                    _ => {}
                },
                Event::Mouse(mouse_event) => {
                    use crossterm::event::MouseEventKind;
                    match mouse_event.kind {
                        MouseEventKind::ScrollDown => app.next(),
                        MouseEventKind::ScrollUp => app.previous(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Open the currently selected ticket in the default browser
fn open_selected_ticket(app: &App) {
    if let Some(url) = app.selected_agent_url() {
        debug!(url = %url, "opening ticket in browser");
        let _ = open_url(&url);
    }
}

/// Open a URL in the default browser
fn open_url(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()?;
    }
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }
    Ok(())
}
