//! FeedLens TUI: terminal dashboard for customer feedback sentiment.
//!
//! - `app`: single-owner state driven by the event loop
//! - `worker`: background thread for HTTP analysis and file reads
//! - `engine`: chart engine that rasterizes specs into ratatui buffers
//! - `ui`: layout, panes, overlays, chart widgets

pub mod app;
pub mod canvas;
pub mod engine;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use engine::{TerminalChart, TerminalEngine};
