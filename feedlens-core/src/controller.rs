//! UI state controller: which of loading / error / dashboard is showing,
//! and whether the analyze trigger and input are usable.
//!
//! An analysis is split around its one suspension point:
//! `begin_analysis` validates and enters `Loading`, the caller performs the
//! remote call however it likes (worker thread, inline), and
//! `finish_analysis` settles the outcome. Controls are restored at the start
//! of `finish_analysis`, before the rendering fan-out runs, so they come back
//! on every exit path.

use thiserror::Error;

use crate::chart::ChartEngine;
use crate::dashboard::Dashboard;
use crate::import::{ImportError, NormalizedImport};
use crate::model::AnalysisResult;
use crate::remote::{AnalysisService, RemoteError};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze.";
pub const IMPORT_HINT: &str = "TXT or CSV";
pub const IMPORT_FAILED_MESSAGE: &str = "Could not read the file. Upload a .txt or .csv.";

/// Which view the dashboard area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    /// Nothing shown yet, or input was just replaced by an import.
    Idle,
    Loading,
    Error(String),
    Dashboard,
}

impl UiState {
    pub fn visibility(&self) -> Visibility {
        Visibility {
            loading: matches!(self, UiState::Loading),
            error: matches!(self, UiState::Error(_)),
            dashboard: matches!(self, UiState::Dashboard),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Error(_) => "error",
            UiState::Dashboard => "dashboard",
        }
    }
}

/// Visible regions, derived from [`UiState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub loading: bool,
    pub error: bool,
    pub dashboard: bool,
}

/// Interactive controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub analyze_enabled: bool,
    pub input_enabled: bool,
    /// Busy indicator on the analyze trigger.
    pub busy: bool,
}

impl Controls {
    fn interactive() -> Self {
        Self {
            analyze_enabled: true,
            input_enabled: true,
            busy: false,
        }
    }

    fn locked() -> Self {
        Self {
            analyze_enabled: false,
            input_enabled: false,
            busy: true,
        }
    }
}

/// File-selection status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// No import yet; shows the accepted file types.
    Hint,
    Imported { name: String, lines: usize },
    /// Last import failed; the line reverts to the hint plus this message.
    Failed { message: String },
}

impl ImportStatus {
    pub fn text(&self) -> String {
        match self {
            ImportStatus::Hint => IMPORT_HINT.to_string(),
            ImportStatus::Imported { name, lines } => format!("Imported: {name} ({lines} lines)"),
            ImportStatus::Failed { message } => format!("{IMPORT_HINT} | {message}"),
        }
    }

    pub fn is_imported(&self) -> bool {
        matches!(self, ImportStatus::Imported { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{}", EMPTY_INPUT_MESSAGE)]
pub struct ValidationError;

/// Why an analysis could not start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("an analysis is already running")]
    Busy,
}

/// Proof that an analysis was started; carries the text to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    id: u64,
    text: String,
}

impl AnalysisTicket {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// How a settled analysis ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Dashboard,
    Failed(String),
    /// Ticket did not match the request in flight; nothing changed.
    Stale,
}

/// The state machine plus the input it analyzes.
#[derive(Debug)]
pub struct UiController {
    state: UiState,
    controls: Controls,
    input: String,
    import_status: ImportStatus,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl Default for UiController {
    fn default() -> Self {
        Self::new()
    }
}

impl UiController {
    pub fn new() -> Self {
        Self {
            state: UiState::Idle,
            controls: Controls::interactive(),
            input: String::new(),
            import_status: ImportStatus::Hint,
            in_flight: None,
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn visibility(&self) -> Visibility {
        self.state.visibility()
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn import_status(&self) -> &ImportStatus {
        &self.import_status
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    fn transition(&mut self, next: UiState) {
        if self.state != next {
            tracing::info!(from = self.state.label(), to = next.label(), "ui state");
        }
        self.state = next;
    }

    // ── Input editing ────────────────────────────────────────────────

    /// Replace the input text. Ignored while input is disabled.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if !self.controls.input_enabled {
            return false;
        }
        self.input = text.into();
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.controls.input_enabled {
            return false;
        }
        self.input.push(c);
        true
    }

    pub fn newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    pub fn backspace(&mut self) -> bool {
        if !self.controls.input_enabled {
            return false;
        }
        self.input.pop();
        true
    }

    pub fn clear_input(&mut self) -> bool {
        self.set_input(String::new())
    }

    // ── Analysis ─────────────────────────────────────────────────────

    /// Validate the input and enter `Loading`.
    ///
    /// Blank input goes straight to `Error` without a ticket, so no remote
    /// call is made.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, AnalysisError> {
        if self.in_flight.is_some() || !self.controls.analyze_enabled {
            return Err(AnalysisError::Busy);
        }
        if self.input.trim().is_empty() {
            tracing::warn!("analysis requested with empty input");
            self.transition(UiState::Error(EMPTY_INPUT_MESSAGE.to_string()));
            return Err(ValidationError.into());
        }

        let id = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(id);
        self.controls = Controls::locked();
        self.transition(UiState::Loading);

        Ok(AnalysisTicket {
            id,
            text: self.input.clone(),
        })
    }

    /// Settle the call started by `ticket`.
    pub fn finish_analysis<E: ChartEngine>(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, RemoteError>,
        dashboard: &mut Dashboard<E>,
    ) -> Settled {
        if self.in_flight != Some(ticket.id) {
            tracing::warn!(ticket = ticket.id, "ignoring stale analysis outcome");
            return Settled::Stale;
        }
        self.in_flight = None;
        self.controls = Controls::interactive();

        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                let message = format!("Analysis failed: {err}.");
                tracing::warn!(error = %err, "analysis failed");
                self.transition(UiState::Error(message.clone()));
                return Settled::Failed(message);
            }
        };

        self.transition(UiState::Dashboard);
        match dashboard.render(result) {
            Ok(()) => Settled::Dashboard,
            Err(err) => {
                let message = format!("Could not draw the dashboard: {err}.");
                tracing::warn!(error = %err, "dashboard render failed");
                self.transition(UiState::Error(message.clone()));
                Settled::Failed(message)
            }
        }
    }

    /// Start, call `service` inline, and settle.
    pub fn analyze_with<S, E>(&mut self, service: &S, dashboard: &mut Dashboard<E>) -> Settled
    where
        S: AnalysisService + ?Sized,
        E: ChartEngine,
    {
        match self.begin_analysis() {
            Ok(ticket) => {
                let outcome = service.analyze(ticket.text());
                self.finish_analysis(ticket, outcome, dashboard)
            }
            Err(err) => Settled::Failed(err.to_string()),
        }
    }

    // ── Import ───────────────────────────────────────────────────────

    /// Whether a file import may start now.
    pub fn can_import(&self) -> bool {
        self.controls.input_enabled
    }

    /// Apply a finished file import.
    ///
    /// Success replaces the input and hides error and dashboard. Failure only
    /// touches the import status; input and view state stay as they were.
    pub fn apply_import(
        &mut self,
        name: &str,
        outcome: Result<NormalizedImport, ImportError>,
    ) -> bool {
        if !self.can_import() {
            tracing::warn!(file = name, "import finished while input is locked; discarded");
            self.import_status = ImportStatus::Failed {
                message: "Import discarded while an analysis is running.".to_string(),
            };
            return false;
        }

        match outcome {
            Ok(imported) => {
                tracing::info!(file = name, lines = imported.line_count, "imported feedback file");
                self.input = imported.text;
                self.import_status = ImportStatus::Imported {
                    name: name.to_string(),
                    lines: imported.line_count,
                };
                self.controls = Controls::interactive();
                self.transition(UiState::Idle);
                true
            }
            Err(err) => {
                tracing::warn!(file = name, error = %err, "import failed");
                self.import_status = ImportStatus::Failed {
                    message: IMPORT_FAILED_MESSAGE.to_string(),
                };
                false
            }
        }
    }
}
