//! Left pane: feedback text, import status, analyze trigger.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme;

const PLACEHOLDER: &str = "Type or paste feedback, one entry per line. Ctrl+O imports a .txt or .csv file.";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Input;
    let controls = app.controller.controls();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(" Feedback ")
        .title_style(theme::panel_title(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_text(f, rows[0], app, focused && controls.input_enabled);

    let status = app.controller.import_status();
    let status_style = if status.is_imported() {
        theme::positive()
    } else {
        theme::muted()
    };
    f.render_widget(
        Paragraph::new(Span::styled(status.text(), status_style)),
        rows[1],
    );

    let trigger = if controls.busy {
        Line::from(vec![
            Span::styled(format!("{} ", app.spinner()), theme::warning()),
            Span::styled("Analyzing...", theme::warning().add_modifier(Modifier::BOLD)),
        ])
    } else if controls.analyze_enabled {
        Line::from(Span::styled("[ Analyze  Ctrl+R ]", theme::accent_bold()))
    } else {
        Line::from(Span::styled("[ Analyze ]", theme::muted()))
    };
    f.render_widget(Paragraph::new(trigger), rows[2]);
}

fn render_text(f: &mut Frame, area: Rect, app: &AppState, show_cursor: bool) {
    let input = app.controller.input();
    let locked = !app.controller.controls().input_enabled;
    let style = if locked { theme::muted() } else { theme::text() };

    if input.is_empty() {
        let para = Paragraph::new(Span::styled(PLACEHOLDER, theme::muted())).wrap(Wrap { trim: true });
        f.render_widget(para, area);
        return;
    }

    let mut lines: Vec<Line> = input
        .split('\n')
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    if show_cursor {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("_", theme::accent()));
        }
    }

    // Keep the tail visible: the cursor is always at the end.
    let height = area.height as usize;
    let skip = lines.len().saturating_sub(height) as u16;
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((skip, 0));
    f.render_widget(para, area);
}
