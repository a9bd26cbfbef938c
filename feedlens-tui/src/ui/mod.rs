//! Top-level UI layout: header, input pane, dashboard pane, status bar.

pub mod dashboard;
pub mod input_panel;
pub mod overlays;
pub mod status_bar;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    input_panel::render(f, panes[0], app);
    dashboard::render(f, panes[1], app);
    status_bar::render(f, chunks[2], app);

    match &app.overlay {
        Overlay::Help => overlays::render_help(f, chunks[1]),
        Overlay::OpenFile => overlays::render_open_file(f, chunks[1], &app.path_input),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[1], app),
        Overlay::None => {}
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let line = Line::from(vec![
        Span::styled(" FeedLens ", theme::accent_bold()),
        Span::styled("feedback sentiment dashboard", theme::muted()),
        Span::raw("  "),
        Span::styled(app.endpoint.as_str(), theme::muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
