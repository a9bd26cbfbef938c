//! Feedlens core: everything between raw feedback text and drawn charts.
//!
//! - `import`: file content → clean, line-oriented feedback text
//! - `model`: the analysis result returned by the remote service
//! - `remote`: HTTP client for the analysis service
//! - `chart`: chart specs, colors, the chart-instance registry, draw hooks
//! - `adapters`: analysis result → chart specs
//! - `examples`: example feedback lists → annotated markup
//! - `dashboard`: fan-out of one result to charts and example lists
//! - `controller`: the loading / error / dashboard state machine
//! - `config` / `logging`: ambient setup shared by the binaries

pub mod adapters;
pub mod chart;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod examples;
pub mod import;
pub mod logging;
pub mod model;
pub mod remote;

pub use chart::{ChartEngine, ChartHandle, ChartInstanceRegistry, ChartSlot, ChartSpec};
pub use config::FeedlensConfig;
pub use controller::{AnalysisTicket, UiController, UiState};
pub use dashboard::Dashboard;
pub use model::{AnalysisResult, SentimentCounts, ThemeFrequency, WordCount};
pub use remote::{AnalysisService, HttpAnalysisService, RemoteError};
