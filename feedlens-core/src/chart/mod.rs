//! Chart model and lifecycle.
//!
//! - `color`: RGB colors and linear gradients
//! - `spec`: the tagged `ChartSpec` handed to engines
//! - `palette`: fixed color palettes for the three dashboard charts
//! - `overlay`: pre-draw hooks, including the center-caption renderer
//! - `registry`: one live chart handle per slot, destroy-before-recreate
//! - `headless`: an engine that keeps specs without drawing them

pub mod color;
pub mod headless;
pub mod overlay;
pub mod palette;
pub mod registry;
pub mod spec;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use color::{ColorStop, Gradient, GradientDirection, Rgb};
pub use headless::{HeadlessChart, HeadlessEngine};
pub use overlay::{DrawContext, DrawHook, HookSet, OverlayTextRenderer, PlotArea};
pub use registry::{ChartEngine, ChartHandle, ChartInstanceRegistry, RegistryStats};
pub use spec::{ChartData, ChartKind, ChartSpec, Dataset};

/// Fixed dashboard locations, each holding at most one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Sentiment,
    Themes,
    Words,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 3] = [ChartSlot::Sentiment, ChartSlot::Themes, ChartSlot::Words];

    pub fn index(self) -> usize {
        match self {
            ChartSlot::Sentiment => 0,
            ChartSlot::Themes => 1,
            ChartSlot::Words => 2,
        }
    }

    /// Slot identifier as used by the dashboard layout.
    pub fn id(self) -> &'static str {
        match self {
            ChartSlot::Sentiment => "sentiment",
            ChartSlot::Themes => "themes",
            ChartSlot::Words => "words",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartSlot::Sentiment => "Sentiment",
            ChartSlot::Themes => "Themes",
            ChartSlot::Words => "Top Words",
        }
    }
}

/// Engine-side failures while creating or drawing a chart.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{kind} chart for slot '{slot}' has no dataset")]
    EmptySpec { slot: &'static str, kind: &'static str },

    #[error("chart engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("render error: {0}")]
    Other(String),
}
