//! Overlay widgets: help, open-file prompt, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use feedlens_core::controller::IMPORT_HINT;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

const KEYS: [(&str, &str); 9] = [
    ("Ctrl+R / F5", "Analyze the feedback text"),
    ("Ctrl+O", "Import a .txt or .csv file"),
    ("Tab", "Switch focus between input and dashboard"),
    ("Enter", "New line (input)"),
    ("Ctrl+U", "Clear the input"),
    ("j / k", "Scroll example lists (dashboard)"),
    ("Ctrl+E", "Error history"),
    ("q", "Quit (dashboard)"),
    ("Ctrl+C", "Quit"),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys ")
        .title_style(theme::accent_bold());

    let mut lines = vec![Line::from("")];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:>12}  "), theme::accent()),
            Span::styled(action, theme::muted()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to dismiss...",
        theme::neutral(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_open_file(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(60, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Import File [Enter]open [Esc]cancel ")
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Path to a feedback file ({IMPORT_HINT}):"),
            theme::muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No errors recorded.", theme::muted())),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
        .map(|(i, err)| {
            let style = if i == app.error_scroll {
                theme::negative().add_modifier(Modifier::BOLD)
            } else {
                theme::muted()
            };
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                    theme::muted(),
                ),
                Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
                Span::styled(err.message.as_str(), style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}
