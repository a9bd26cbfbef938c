//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! the controller and dashboard are only touched from the event loop.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use feedlens_core::controller::{AnalysisError, Settled};
use feedlens_core::{AnalysisResult, AnalysisTicket, Dashboard, RemoteError, UiController};

use crate::engine::TerminalEngine;
use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Which pane receives typing and scroll keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Dashboard,
}

impl Focus {
    pub fn toggle(self) -> Focus {
        match self {
            Focus::Input => Focus::Dashboard,
            Focus::Dashboard => Focus::Input,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Remote,
    Import,
    Render,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "INPUT",
            ErrorCategory::Remote => "NET",
            ErrorCategory::Import => "FILE",
            ErrorCategory::Render => "DRAW",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    OpenFile,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,

    // Core
    pub controller: UiController,
    pub dashboard: Dashboard<TerminalEngine>,
    pub endpoint: String,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub path_input: String,
    pub examples_scroll: u16,
    pub tick_count: u64,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        endpoint: String,
        animation_frames: u16,
    ) -> Self {
        Self {
            running: true,
            focus: Focus::Input,
            controller: UiController::new(),
            dashboard: Dashboard::new(TerminalEngine::new(animation_frames)),
            endpoint,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            path_input: String::new(),
            examples_scroll: 0,
            tick_count: 0,
        }
    }

    /// Push an error to the history, capping its length.
    pub fn push_error(&mut self, category: ErrorCategory, message: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[(self.tick_count as usize / 2) % SPINNER.len()]
    }

    /// One event-loop tick: advance spinner and chart animations.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.dashboard.registry_mut().tick_all();
    }

    // ── Analysis ─────────────────────────────────────────────────────

    /// Start an analysis of the current input on the worker.
    pub fn request_analysis(&mut self) {
        let ticket = match self.controller.begin_analysis() {
            Ok(ticket) => ticket,
            Err(AnalysisError::Busy) => {
                self.set_warning("Analysis already running");
                return;
            }
            Err(err @ AnalysisError::Validation(_)) => {
                self.push_error(ErrorCategory::Validation, err.to_string());
                return;
            }
        };

        tracing::info!(ticket = ticket.id(), endpoint = %self.endpoint, "analysis requested");
        self.set_status(format!("Analyzing via {}", self.endpoint));
        if let Err(err) = self.worker_tx.send(WorkerCommand::Analyze {
            ticket: ticket.clone(),
        }) {
            // Worker is gone; settle immediately so controls come back.
            let outcome = Err(RemoteError::Transport(format!("worker unavailable: {err}")));
            self.settle(ticket, outcome);
        }
    }

    fn settle(&mut self, ticket: AnalysisTicket, outcome: Result<AnalysisResult, RemoteError>) {
        let is_remote_failure = outcome.is_err();
        match self.controller.finish_analysis(ticket, outcome, &mut self.dashboard) {
            Settled::Dashboard => {
                self.examples_scroll = 0;
                let total = self
                    .dashboard
                    .total_feedbacks()
                    .map(|n| format!("{n} feedbacks analyzed"))
                    .unwrap_or_else(|| "Analysis complete".to_string());
                self.set_status(total);
            }
            Settled::Failed(message) => {
                let category = if is_remote_failure {
                    ErrorCategory::Remote
                } else {
                    ErrorCategory::Render
                };
                self.push_error(category, message);
            }
            Settled::Stale => {}
        }
    }

    // ── Import ───────────────────────────────────────────────────────

    pub fn open_file_prompt(&mut self) {
        if !self.controller.can_import() {
            self.set_warning("Input is locked while an analysis runs");
            return;
        }
        self.path_input.clear();
        self.overlay = Overlay::OpenFile;
    }

    /// Send the typed path to the worker for reading.
    pub fn request_import(&mut self, path: PathBuf) {
        if !self.controller.can_import() {
            self.set_warning("Input is locked while an analysis runs");
            return;
        }
        tracing::info!(path = %path.display(), "import requested");
        if self.worker_tx.send(WorkerCommand::ImportFile { path }).is_err() {
            self.push_error(ErrorCategory::Import, "Worker unavailable".to_string());
        }
    }

    // ── Worker responses ─────────────────────────────────────────────

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::AnalysisDone { ticket, outcome } => self.settle(ticket, outcome),
            WorkerResponse::FileRead { name, outcome } => {
                let detail = outcome.as_ref().err().map(|e| e.to_string());
                let applied = self.controller.apply_import(&name, outcome);
                let status = self.controller.import_status().text();
                match (applied, detail) {
                    (true, _) => self.set_status(status),
                    (false, Some(detail)) => {
                        self.push_error(ErrorCategory::Import, format!("{name}: {detail}"))
                    }
                    (false, None) => self.set_warning(status),
                }
            }
        }
    }

    /// Drain every pending worker response without blocking.
    pub fn drain_responses(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.handle_response(resp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use feedlens_core::import::NormalizedImport;
    use feedlens_core::{SentimentCounts, UiState};

    fn app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let app = AppState::new(cmd_tx, resp_rx, "http://test/api/index".into(), 0);
        (app, cmd_rx, resp_tx)
    }

    #[test]
    fn focus_toggles() {
        assert_eq!(Focus::Input.toggle(), Focus::Dashboard);
        assert_eq!(Focus::Dashboard.toggle(), Focus::Input);
    }

    #[test]
    fn blank_input_sends_nothing() {
        let (mut app, cmd_rx, _resp_tx) = app();
        app.request_analysis();
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Validation);
        assert!(app.controller.visibility().error);
    }

    #[test]
    fn analysis_round_trip_through_channels() {
        let (mut app, cmd_rx, resp_tx) = app();
        app.controller.set_input("great service");
        app.request_analysis();
        assert!(app.controller.is_loading());

        let ticket = match cmd_rx.try_recv().unwrap() {
            WorkerCommand::Analyze { ticket } => ticket,
            other => panic!("unexpected command {other:?}"),
        };
        let result = AnalysisResult {
            total_feedbacks: Some(1),
            sentiment_counts: SentimentCounts::new(1, 0, 0),
            ..Default::default()
        };
        resp_tx
            .send(WorkerResponse::AnalysisDone {
                ticket,
                outcome: Ok(result),
            })
            .unwrap();
        app.drain_responses();

        assert_eq!(app.controller.state(), &UiState::Dashboard);
        assert_eq!(app.dashboard.registry().live_count(), 3);
        assert_eq!(
            app.status_message,
            Some(("1 feedbacks analyzed".to_string(), StatusLevel::Info))
        );
    }

    #[test]
    fn dead_worker_still_restores_controls() {
        let (mut app, cmd_rx, _resp_tx) = app();
        drop(cmd_rx);
        app.controller.set_input("text");
        app.request_analysis();

        assert!(!app.controller.is_loading());
        assert!(app.controller.controls().analyze_enabled);
        assert_eq!(app.error_history[0].category, ErrorCategory::Remote);
    }

    #[test]
    fn imported_file_replaces_input() {
        let (mut app, _cmd_rx, _resp_tx) = app();
        app.handle_response(WorkerResponse::FileRead {
            name: "x.csv".into(),
            outcome: Ok(NormalizedImport {
                text: "good\nbad\nok".into(),
                line_count: 3,
            }),
        });
        assert_eq!(app.controller.input(), "good\nbad\nok");
        assert_eq!(
            app.status_message,
            Some(("Imported: x.csv (3 lines)".to_string(), StatusLevel::Info))
        );
    }

    #[test]
    fn error_history_is_capped() {
        let (mut app, _cmd_rx, _resp_tx) = app();
        for i in 0..(ERROR_HISTORY_CAP + 5) {
            app.push_error(ErrorCategory::Remote, format!("e{i}"));
        }
        assert_eq!(app.error_history.len(), ERROR_HISTORY_CAP);
        assert_eq!(app.error_history[0].message, format!("e{}", ERROR_HISTORY_CAP + 4));
    }
}
