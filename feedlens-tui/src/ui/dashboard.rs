//! Right pane. Shows one of the idle hint, loading indicator, error banner
//! or the dashboard (three charts plus two example lists).

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use feedlens_core::chart::ChartSlot;
use feedlens_core::controller::UiState;
use feedlens_core::examples::{ExampleCategory, ExampleMarkup};

use crate::app::{AppState, Focus};
use crate::engine::ChartView;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Dashboard;
    let title = match (app.controller.state(), app.dashboard.total_feedbacks()) {
        (UiState::Dashboard, Some(total)) => format!(" Dashboard | {total} feedbacks "),
        _ => " Dashboard ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(title)
        .title_style(theme::panel_title(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.controller.state() {
        UiState::Idle => render_idle(f, inner),
        UiState::Loading => render_loading(f, inner, app),
        UiState::Error(message) => render_error(f, inner, message),
        UiState::Dashboard => render_dashboard(f, inner, app),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No analysis yet.", theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Enter feedback on the left and press Ctrl+R (or F5) to analyze.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).centered().wrap(Wrap { trim: true }), area);
}

fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    let y = area.y + area.height / 2;
    let line = Line::from(vec![
        Span::styled(format!("{} ", app.spinner()), theme::warning()),
        Span::styled("Analyzing feedback...", theme::warning().add_modifier(Modifier::BOLD)),
    ]);
    f.render_widget(
        Paragraph::new(line).centered(),
        Rect::new(area.x, y, area.width, 1.min(area.height)),
    );
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let banner = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(" Error ")
        .title_style(theme::negative().add_modifier(Modifier::BOLD));
    let height = 5.min(area.height);
    let rect = Rect::new(area.x, area.y, area.width, height);
    let para = Paragraph::new(Span::styled(message, theme::negative()))
        .block(banner)
        .wrap(Wrap { trim: true });
    f.render_widget(para, rect);
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    render_chart(f, top[0], app, ChartSlot::Sentiment);
    render_chart(f, top[1], app, ChartSlot::Themes);
    render_chart(f, rows[1], app, ChartSlot::Words);

    for (rect, category) in [
        (bottom[0], ExampleCategory::Positive),
        (bottom[1], ExampleCategory::Negative),
    ] {
        render_examples(f, rect, app.dashboard.examples(category), category, app.examples_scroll);
    }
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState, slot: ChartSlot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {} ", slot.title()))
        .title_style(theme::accent());
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.dashboard.registry().get(slot) {
        Some(chart) => f.render_widget(ChartView::new(chart), inner),
        None => f.render_widget(
            Paragraph::new(Span::styled("Chart unavailable", theme::muted())),
            inner,
        ),
    }
}

fn render_examples(
    f: &mut Frame,
    area: Rect,
    markup: Option<&ExampleMarkup>,
    category: ExampleCategory,
    scroll: u16,
) {
    let (title, style) = match category {
        ExampleCategory::Positive => (" Positive examples ", theme::positive()),
        ExampleCategory::Negative => (" Negative examples ", theme::negative()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
        .title_style(style);

    let lines: Vec<Line> = markup
        .map(|m| {
            m.blocks
                .iter()
                .map(|b| Line::from(Span::styled(b.display_text(), theme::text())))
                .collect()
        })
        .unwrap_or_default();
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(para, area);
}
