//! Mention Web - WebAssembly demo of @mention tracking
//!
//! Runs the same composer as mention-cli in the browser, using Ratzilla
//! for terminal rendering in the DOM. Sent messages persist in
//! localStorage.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::Terminal;
use ratzilla::{
    event::{KeyCode, KeyEvent},
    DomBackend, WebRenderer,
};
use wasm_bindgen::prelude::*;

use mention_core::{App, MentionConfig, Mode};

pub mod io;
mod ui;

/// Initialize the web application
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    let mut app = App::new(MentionConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    match io::load_sent() {
        Ok(sent) => app.sent = sent,
        Err(e) => web_sys::console::warn_1(&e),
    }
    app.set_status("Type @ to mention someone, F1 for help");

    let app_state = Rc::new(RefCell::new(app));

    let backend = DomBackend::new()
        .map_err(|e| JsValue::from_str(&format!("Failed to create backend: {:?}", e)))?;
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JsValue::from_str(&format!("Failed to create terminal: {:?}", e)))?;

    terminal.on_key_event({
        let app_state_cloned = app_state.clone();
        move |event| {
            let mut app = app_state_cloned.borrow_mut();
            app.clear_status();

            match app.mode {
                Mode::Compose => handle_compose_mode(&mut app, event),
                Mode::Picker => handle_picker(&mut app, event.code),
                Mode::Help => app.toggle_help(),
            }
        }
    });

    terminal.draw_web(move |frame| {
        let app = app_state.borrow();
        ui::draw(frame, &app);
    });

    web_sys::console::log_1(&"Mention WASM initialized".into());

    Ok(())
}

fn handle_compose_mode(app: &mut App, event: KeyEvent) {
    let ctrl = event.ctrl;
    let shift = event.shift;

    match event.code {
        KeyCode::F(1) => app.toggle_help(),

        KeyCode::Enter => send(app),
        KeyCode::Char('p') if ctrl => {
            app.preview();
        }
        KeyCode::Char('e') if ctrl => export(app),
        KeyCode::Char('n') if ctrl => app.newline(),
        KeyCode::Char('a') if ctrl => app.add_demo_mention(),

        KeyCode::Tab => app.open_picker(false),

        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),

        KeyCode::Left if ctrl => app.move_word_back(shift),
        KeyCode::Right if ctrl => app.move_word_forward(shift),
        KeyCode::Left => app.move_left(shift),
        KeyCode::Right => app.move_right(shift),
        KeyCode::Up => app.move_up(shift),
        KeyCode::Down => app.move_down(shift),
        KeyCode::Home => app.move_to_line_start(shift),
        KeyCode::End => app.move_to_line_end(shift),

        KeyCode::Char(c) if !ctrl && !event.alt => app.type_char(c),

        _ => {}
    }
}

fn handle_picker(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_picker(),
        KeyCode::Down | KeyCode::Tab => app.picker_next(),
        KeyCode::Up => app.picker_prev(),
        KeyCode::Enter => {
            app.confirm_picker();
        }
        _ => {}
    }
}

fn send(app: &mut App) {
    if app.send().is_some() {
        if let Err(e) = io::save_sent(&app.sent) {
            web_sys::console::warn_1(&e);
        }
    }
}

fn export(app: &mut App) {
    if app.sent.is_empty() {
        app.set_status("Nothing sent yet");
        return;
    }
    match mention_core::to_json(&app.sent) {
        Ok(json) => {
            if let Err(e) = io::download_json("mentions.json", &json) {
                app.set_status(&format!("Export failed: {:?}", e));
            } else {
                app.set_status("Exported to mentions.json");
            }
        }
        Err(e) => app.set_status(&format!("Serialization failed: {}", e)),
    }
}
