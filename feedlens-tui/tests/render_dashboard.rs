//! Full-frame rendering through `ui::draw` on a `TestBackend`.

use std::sync::mpsc::{self, Receiver, Sender};

use ratatui::backend::TestBackend;
use ratatui::Terminal;

use feedlens_core::{AnalysisResult, SentimentCounts, ThemeFrequency, WordCount};
use feedlens_tui::app::{AppState, Overlay};
use feedlens_tui::ui;
use feedlens_tui::worker::{WorkerCommand, WorkerResponse};

fn app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(cmd_tx, resp_rx, "http://test/api/index".into(), 0);
    (app, cmd_rx, resp_tx)
}

fn screen(app: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buf = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf.cell((x, y)).unwrap().symbol());
        }
        out.push('\n');
    }
    out
}

fn sample_result() -> AnalysisResult {
    let mut themes = ThemeFrequency::new();
    themes.insert("Delivery", 3);
    themes.insert("Price", 1);
    AnalysisResult {
        total_feedbacks: Some(4),
        sentiment_counts: SentimentCounts::new(3, 1, 0),
        theme_frequency: themes,
        top_words: vec![WordCount::new("fast", 3), WordCount::new("slow", 1)],
        positive_examples: vec!["great service".into()],
        negative_examples: vec![],
    }
}

fn run_analysis(app: &mut AppState, cmd_rx: &Receiver<WorkerCommand>, resp_tx: &Sender<WorkerResponse>, outcome_ok: bool) {
    app.controller.set_input("great service\nslow delivery");
    app.request_analysis();
    let ticket = match cmd_rx.try_recv().unwrap() {
        WorkerCommand::Analyze { ticket } => ticket,
        other => panic!("unexpected command {other:?}"),
    };
    let outcome = if outcome_ok {
        Ok(sample_result())
    } else {
        Err(feedlens_core::RemoteError::Transport("connection refused".into()))
    };
    resp_tx
        .send(WorkerResponse::AnalysisDone { ticket, outcome })
        .unwrap();
    app.drain_responses();
}

#[test]
fn idle_screen_shows_hint_and_placeholder() {
    let (app, _cmd_rx, _resp_tx) = app();
    let text = screen(&app);
    assert!(text.contains("FeedLens"));
    assert!(text.contains("No analysis yet."));
    assert!(text.contains("[ Analyze  Ctrl+R ]"));
    assert!(text.contains("TXT or CSV"));
}

#[test]
fn loading_screen_locks_trigger() {
    let (mut app, _cmd_rx, _resp_tx) = app();
    app.controller.set_input("good");
    app.request_analysis();
    let text = screen(&app);
    assert!(text.contains("Analyzing feedback..."));
    assert!(!text.contains("[ Analyze  Ctrl+R ]"));
}

#[test]
fn dashboard_screen_shows_charts_and_examples() {
    let (mut app, cmd_rx, resp_tx) = app();
    run_analysis(&mut app, &cmd_rx, &resp_tx, true);
    let text = screen(&app);
    assert!(text.contains("Sentiment"));
    assert!(text.contains("Themes"));
    assert!(text.contains("Top Words"));
    assert!(text.contains("Delivery"));
    assert!(text.contains("fast"));
    assert!(text.contains("great service"));
    assert!(text.contains("No negative examples found."));
    assert!(text.contains("Dashboard | 4 feedbacks"));
    assert!(text.contains("4 feedbacks analyzed"));
    assert!(!text.contains("No analysis yet."));
}

#[test]
fn failed_analysis_shows_error_banner_only() {
    let (mut app, cmd_rx, resp_tx) = app();
    run_analysis(&mut app, &cmd_rx, &resp_tx, false);
    let text = screen(&app);
    assert!(text.contains("connection refused"));
    assert!(!text.contains("Top Words"));
    assert!(!text.contains("Analyzing feedback..."));
}

#[test]
fn help_overlay_lists_keys() {
    let (mut app, _cmd_rx, _resp_tx) = app();
    app.overlay = Overlay::Help;
    let text = screen(&app);
    assert!(text.contains("Keys"));
    assert!(text.contains("Press any key to dismiss..."));
}

#[test]
fn error_history_overlay_lists_records() {
    let (mut app, _cmd_rx, _resp_tx) = app();
    app.request_analysis();
    app.overlay = Overlay::ErrorHistory;
    let text = screen(&app);
    assert!(text.contains("Error History (1)"));
    assert!(text.contains("[INPUT]"));
}
