//! Mention CLI - Terminal demo of @mention tracking

mod io;
mod logging;
mod ui;

use std::io::stdout;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{info, warn};

use mention_core::{App, Mode};

fn main() -> Result<()> {
    // Optional `--config PATH`
    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str);

    logging::init();

    // Config errors are reported before the terminal is taken over
    let config = io::load_config(config_path)?;
    let mut app = App::new(config).context("Invalid mention template")?;
    app.set_status("Type @ to mention someone, F1 for help");
    info!(contacts = app.contacts().len(), "mention cli started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Clear status on any key
                app.clear_status();

                match app.mode {
                    Mode::Compose => handle_compose_mode(app, key),
                    Mode::Picker => handle_picker(app, key.code),
                    Mode::Help => app.toggle_help(),
                }
            }
            Event::Paste(text) if app.mode == Mode::Compose => app.paste(&text),
            _ => {}
        }
    }
    Ok(())
}

fn handle_compose_mode(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Esc => app.running = false,
        KeyCode::F(1) => app.toggle_help(),

        // Message actions
        KeyCode::Enter => {
            app.send();
        }
        KeyCode::Char('p') if ctrl => {
            app.preview();
        }
        KeyCode::Char('e') if ctrl => export(app),
        KeyCode::Char('n') if ctrl => app.newline(),
        KeyCode::Char('a') if ctrl => app.add_demo_mention(),

        // Mentions
        KeyCode::Tab => app.open_picker(false),

        // Deletion
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),

        // Navigation
        KeyCode::Left if ctrl => app.move_word_back(shift),
        KeyCode::Right if ctrl => app.move_word_forward(shift),
        KeyCode::Left => app.move_left(shift),
        KeyCode::Right => app.move_right(shift),
        KeyCode::Up => app.move_up(shift),
        KeyCode::Down => app.move_down(shift),
        KeyCode::Home => app.move_to_line_start(shift),
        KeyCode::End => app.move_to_line_end(shift),

        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            app.type_char(c)
        }

        _ => {}
    }
}

fn handle_picker(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_picker(),
        KeyCode::Down | KeyCode::Tab => app.picker_next(),
        KeyCode::Up | KeyCode::BackTab => app.picker_prev(),
        KeyCode::Enter => {
            app.confirm_picker();
        }
        _ => {}
    }
}

fn export(app: &mut App) {
    if app.sent.is_empty() {
        app.set_status("Nothing sent yet");
        return;
    }
    match io::export_messages(&app.sent) {
        Ok(path) => app.set_status(&format!("Exported to {}", path.display())),
        Err(e) => {
            warn!(error = %e, "export failed");
            app.set_status(&format!("Export failed: {}", e));
        }
    }
}
