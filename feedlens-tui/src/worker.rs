//! Background worker thread for the two slow operations: the remote
//! analysis call and reading an imported file.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Commands
//! are handled one at a time, in arrival order.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use feedlens_core::import::{self, ImportError, NormalizedImport};
use feedlens_core::{AnalysisResult, AnalysisService, AnalysisTicket, RemoteError};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Analyze { ticket: AnalysisTicket },
    ImportFile { path: PathBuf },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    AnalysisDone {
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, RemoteError>,
    },
    FileRead {
        name: String,
        outcome: Result<NormalizedImport, ImportError>,
    },
}

/// Spawn the worker thread. It exits on `Shutdown` or when every sender
/// has been dropped.
pub fn spawn_worker<S>(
    service: S,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>>
where
    S: AnalysisService + Send + 'static,
{
    thread::Builder::new()
        .name("feedlens-worker".into())
        .spawn(move || worker_loop(service, rx, tx))
}

/// Send `Shutdown` and wait up to `grace` for the worker to exit.
///
/// A worker still blocked in a request after `grace` is detached and dies
/// with the process. Returns whether the thread was joined.
pub fn shutdown_worker(
    tx: &Sender<WorkerCommand>,
    handle: JoinHandle<()>,
    grace: Duration,
) -> bool {
    let _ = tx.send(WorkerCommand::Shutdown);
    let deadline = Instant::now() + grace;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            tracing::warn!(?grace, "worker still busy at shutdown; detaching");
            return false;
        }
        thread::sleep(Duration::from_millis(10));
    }
    let _ = handle.join();
    true
}

fn worker_loop<S: AnalysisService>(
    service: S,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    loop {
        let response = match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Analyze { ticket }) => {
                let outcome = service.analyze(ticket.text());
                WorkerResponse::AnalysisDone { ticket, outcome }
            }
            Ok(WorkerCommand::ImportFile { path }) => WorkerResponse::FileRead {
                name: import::display_name(&path),
                outcome: import::import_file(&path),
            },
        };
        if tx.send(response).is_err() {
            tracing::debug!("response channel closed; worker exiting");
            break;
        }
    }
    tracing::debug!("worker stopped");
}
