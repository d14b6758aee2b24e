//! Frame layout: a one-row header over the editor grid

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, HEADER_HEIGHT};

mod palette {
    use ratatui::style::Color;

    pub const HEADER_BG: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;
    pub const ERROR: Color = Color::Red;
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [header_area, main_area] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Fill(1)])
            .areas(frame.area());

    draw_header(frame, header_area, app);
    draw_editor(frame, main_area, app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let filename = app
        .path
        .as_ref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("Untitled");

    let modified = if app.editor.is_modified() { " [+]" } else { "" };
    let cursor = app.editor.cursor();
    let mut spans = vec![
        Span::raw(format!(" pixide - {filename}{modified} ")),
        Span::raw(format!(" {}:{} ", cursor.line + 1, cursor.col + 1)).fg(palette::ACCENT),
    ];
    if let Some(msg) = &app.status_message {
        let color = if msg == "Saved" {
            palette::ACCENT
        } else {
            palette::ERROR
        };
        spans.push(Span::raw(format!(" {msg}")).fg(color));
    }

    let header = Paragraph::new(Line::from(spans))
        .style(Style::new().bg(palette::HEADER_BG).fg(Color::White));
    frame.render_widget(header, area);
}

fn draw_editor(frame: &mut Frame, area: Rect, app: &mut App) {
    app.editor.render(&mut app.grid);
    frame.render_widget(&app.grid, area);
    if let Some((x, y)) = app.grid.cursor() {
        if x < area.width && y < area.height {
            frame.set_cursor_position((area.x + x, area.y + y));
        }
    }
}
