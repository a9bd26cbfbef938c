//! Chart specifications: data plus visual options, per chart kind.

use serde::{Deserialize, Serialize};

use super::color::{Gradient, Rgb};

/// Chart kind, used where only the tag matters (logging, engine dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    Bar,
}

impl ChartKind {
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Doughnut => "doughnut",
            ChartKind::Bar => "bar",
        }
    }
}

/// Fill for a dataset: one gradient per data point, or one for the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    PerPoint(Vec<Gradient>),
    Series(Gradient),
}

impl Fill {
    /// Gradient for the point at `index`. Per-point fills cycle if shorter
    /// than the data.
    pub fn gradient_for(&self, index: usize) -> Option<&Gradient> {
        match self {
            Fill::PerPoint(gradients) if gradients.is_empty() => None,
            Fill::PerPoint(gradients) => gradients.get(index % gradients.len()),
            Fill::Series(gradient) => Some(gradient),
        }
    }
}

/// Border color(s), same per-point / series split as [`Fill`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderColor {
    PerPoint(Vec<Rgb>),
    Series(Rgb),
    /// Border takes each point's fill gradient.
    MatchFill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub color: BorderColor,
    pub width: u16,
    /// Corner radius for bars; ignored by arcs.
    pub radius: u16,
    /// When false, every edge of a bar gets a border.
    pub skip_base_edge: bool,
}

/// Hover emphasis for arcs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverBorder {
    pub color: Rgb,
    pub width: u16,
}

/// One numeric series with its styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: Option<String>,
    pub values: Vec<f64>,
    pub fill: Fill,
    pub border: Border,
    pub hover: Option<HoverBorder>,
}

/// Category labels plus one or more datasets sharing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Hidden,
    Top,
    Bottom,
}

/// Where a value label sits relative to its bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    Center,
    End,
}

/// How each data point's on-chart label is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueLabels {
    /// Integer percentage of `total`; `0%` when `total` is zero.
    PercentOfTotal { total: u64 },
    /// Value rounded to the nearest integer.
    Rounded { anchor: LabelAnchor },
}

impl ValueLabels {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueLabels::PercentOfTotal { total } => format!("{}%", percent_of(value, *total)),
            ValueLabels::Rounded { .. } => format!("{}", value.round() as i64),
        }
    }
}

/// `value / total` as a rounded integer percentage, 0 when `total` is 0.
pub fn percent_of(value: f64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (value / total as f64 * 100.0).round().max(0.0) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoughnutOptions {
    pub title: Option<String>,
    pub legend: LegendPosition,
    pub value_labels: ValueLabels,
    /// Caption drawn at the center of the plot area by the overlay hook.
    pub overlay_caption: Option<String>,
    /// Inner radius as a percentage of the outer radius.
    pub cutout_pct: u8,
}

/// Which axis carries the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexAxis {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarOptions {
    /// `Y` draws horizontal bars.
    pub index_axis: IndexAxis,
    pub legend: LegendPosition,
    pub value_labels: ValueLabels,
    pub label_color: Rgb,
    pub tick_color: Rgb,
}

/// A chart ready to hand to an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Doughnut {
        data: ChartData,
        options: DoughnutOptions,
    },
    Bar {
        data: ChartData,
        options: BarOptions,
    },
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Doughnut { .. } => ChartKind::Doughnut,
            ChartSpec::Bar { .. } => ChartKind::Bar,
        }
    }

    pub fn data(&self) -> &ChartData {
        match self {
            ChartSpec::Doughnut { data, .. } | ChartSpec::Bar { data, .. } => data,
        }
    }

    pub fn value_labels(&self) -> &ValueLabels {
        match self {
            ChartSpec::Doughnut { options, .. } => &options.value_labels,
            ChartSpec::Bar { options, .. } => &options.value_labels,
        }
    }

    /// Center caption configured for this chart, if any.
    pub fn overlay_caption(&self) -> Option<&str> {
        match self {
            ChartSpec::Doughnut { options, .. } => options.overlay_caption.as_deref(),
            ChartSpec::Bar { .. } => None,
        }
    }

    /// Labels of the first dataset, formatted for display.
    pub fn formatted_values(&self) -> Vec<String> {
        let labels = self.value_labels();
        self.data()
            .datasets
            .first()
            .map(|ds| ds.values.iter().map(|v| labels.format(*v)).collect())
            .unwrap_or_default()
    }
}
