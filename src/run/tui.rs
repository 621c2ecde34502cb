use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::store::{Ledger, LedgerError};
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{sanitize, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new();
    app.refresh(ledger);
    if let Some(warning) = ledger.take_load_warnings().into_iter().next() {
        app.set_status(warning);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab, status, and command bars plus borders and table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Search => handle_search_input(key, app, ledger)?,
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
            app.screen = Screen::Transactions;
            app.refresh(ledger);
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Transactions),
        KeyCode::Char('3') => switch_screen(app, ledger, Screen::Limits),
        KeyCode::Char('4') => switch_screen(app, ledger, Screen::Advisor),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, ledger, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, ledger, screens[prev]);
        }
        KeyCode::Esc => {
            app.status_message.clear();
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.refresh(ledger);
            }
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete-txn", app, ledger)?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh(ledger);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            // Live search: filter as you type
            app.transaction_index = 0;
            app.transaction_scroll = 0;
            app.refresh(ledger);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.transaction_index = 0;
            app.transaction_scroll = 0;
            app.refresh(ledger);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteTransaction { id, description } => {
                        match ledger.remove(&id) {
                            Ok(true) => {
                                app.refresh(ledger);
                                app.set_status(format!("Deleted: {}", sanitize(&description, 40)));
                            }
                            Ok(false) => app.set_status("Entry was already gone"),
                            Err(LedgerError::Persistence(e)) => {
                                app.refresh(ledger);
                                app.set_status(format!("Deleted, but saving failed: {e}"));
                            }
                            Err(e) => app.set_status(format!("Delete failed: {e}")),
                        }
                    }
                    PendingAction::ClearAll => match ledger.clear() {
                        Ok(()) => {
                            app.refresh(ledger);
                            app.set_status("All transactions deleted");
                        }
                        Err(LedgerError::Persistence(e)) => {
                            app.refresh(ledger);
                            app.set_status(format!("Cleared, but saving failed: {e}"));
                        }
                        Err(e) => app.set_status(format!("Clear failed: {e}")),
                    },
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, ledger: &mut Ledger, screen: Screen) {
    app.screen = screen;
    app.refresh(ledger);
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
        Screen::Limits => scroll_down(
            &mut app.limit_index,
            &mut app.limit_scroll,
            app.limit_rows.len(),
            page,
        ),
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Limits => scroll_up(&mut app.limit_index, &mut app.limit_scroll),
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll)
        }
        Screen::Limits => scroll_to_top(&mut app.limit_index, &mut app.limit_scroll),
        _ => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
        Screen::Limits => scroll_to_bottom(
            &mut app.limit_index,
            &mut app.limit_scroll,
            app.limit_rows.len(),
            page,
        ),
        _ => {}
    }
}
