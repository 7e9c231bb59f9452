//! Terminal UI rendering for the web demo
//!
//! Mirrors mention-cli's UI on ratzilla's renderer. The DOM has no terminal
//! cursor, so the caret is drawn as a reversed cell.

use ratzilla::ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use mention_core::{App, Mode, Rgb};

// Catppuccin Mocha colors
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const TEAL: Color = Color::Rgb(148, 226, 213);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_main_area(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    match app.mode {
        Mode::Picker => draw_picker(frame, app),
        Mode::Help => draw_help(frame),
        Mode::Compose => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_bar = Paragraph::new(format!(" Mention (Web) - {}", app.title()))
        .style(Style::default().fg(TEXT).bg(SURFACE0));
    frame.render_widget(title_bar, area);
}

fn draw_main_area(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(columns[0]);

    draw_editor(frame, app, rows[0]);
    draw_preview(frame, app, rows[1]);
    draw_sent(frame, app, columns[1]);
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.editor.is_mention_selected() {
        "Compose [mention selected]"
    } else {
        "Compose"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selection = app.editor.selection();
    let caret = app.editor.caret();
    let show_caret = app.mode == Mode::Compose;

    let lines: Vec<Line> = app
        .content_lines()
        .into_iter()
        .map(|(line_start, line_text)| {
            let mut spans: Vec<Span> = line_text
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    let offset = line_start + col;
                    let mut style = Style::default().fg(TEXT);
                    if let Some(color) = app.editor.highlights().color_at(offset) {
                        style = style.fg(to_color(color)).add_modifier(Modifier::BOLD);
                    }
                    if selection.contains(offset) {
                        style = style.bg(SURFACE1);
                    }
                    if show_caret && offset == caret {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(ch.to_string(), style)
                })
                .collect();

            // Caret at end of line
            let line_len = line_text.chars().count();
            if show_caret && caret == line_start + line_len {
                spans.push(Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let (row, col) = app.caret_pos();
    let scroll_y = (row + 1).saturating_sub(inner.height as usize);
    let scroll_x = (col + 1).saturating_sub(inner.width as usize);

    let paragraph = Paragraph::new(lines).scroll((scroll_y as u16, scroll_x as u16));
    frame.render_widget(paragraph, inner);
}

fn draw_preview(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title(format!("Preview {}", app.format.as_str()));

    let (text, style) = match app.preview.as_deref() {
        Some(preview) => (preview, Style::default().fg(TEXT)),
        None => ("Ctrl-P to preview", Style::default().fg(SUBTEXT0)),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_sent(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title(format!("Sent ({})", app.sent.len()));

    let items: Vec<ListItem> = app
        .sent
        .iter()
        .rev()
        .map(|message| {
            let text_preview: String = message
                .text
                .chars()
                .take(30)
                .collect::<String>()
                .replace('\n', " ");

            ListItem::new(vec![
                Line::from(Span::styled(
                    format!(
                        "{} ({} mention(s))",
                        message.created_at.format("%H:%M:%S"),
                        message.mention_count()
                    ),
                    Style::default().fg(TEAL),
                )),
                Line::from(Span::styled(text_preview, Style::default().fg(TEXT))),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Compose => "COMPOSE",
        Mode::Picker => "PICKER",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");
    let help_hint = "@ mention | Enter send | Ctrl-P preview | Ctrl-E download | F1 help";

    let status_bar = Paragraph::new(format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    ))
    .style(Style::default().fg(SUBTEXT0).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_picker(frame: &mut Frame, app: &App) {
    let area = centered_rect(40, app.contacts().len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MAUVE))
        .title("Mention (Up/Down, Enter, Esc)");

    let items: Vec<ListItem> = app
        .contacts()
        .iter()
        .enumerate()
        .map(|(i, contact)| {
            let selected = i == app.picker_selected;
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                Style::default()
                    .fg(to_color(app.editor.highlight_color()))
                    .bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };
            ListItem::new(format!("{} {} (#{})", marker, contact.name, contact.id)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 19, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Mentions", heading)),
        Line::from("  @          Type trigger and pick a contact"),
        Line::from("  Tab        Pick a contact without trigger"),
        Line::from("  Ctrl-A     Insert a numbered demo mention"),
        Line::from("  Backspace  Select mention, again to delete"),
        Line::from(""),
        Line::from(Span::styled("Editing", heading)),
        Line::from("  Arrows     Move (Shift selects, Ctrl by word)"),
        Line::from("  Home/End   Line start/end"),
        Line::from("  Ctrl-N     New line"),
        Line::from(""),
        Line::from(Span::styled("Message", heading)),
        Line::from("  Enter      Send and clear"),
        Line::from("  Ctrl-P     Preview rendered text"),
        Line::from("  Ctrl-E     Download sent messages as JSON"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(GREEN))),
    ];

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
