//! Result adapters: one analysis-result field → one chart spec.
//!
//! The `build_*` functions are pure. The `render_*` functions hand the built
//! spec to the registry under the adapter's fixed slot.

use crate::chart::palette;
use crate::chart::spec::{
    BarOptions, Border, BorderColor, ChartData, ChartSpec, Dataset, DoughnutOptions, Fill,
    HoverBorder, IndexAxis, LabelAnchor, LegendPosition, ValueLabels,
};
use crate::chart::{ChartEngine, ChartInstanceRegistry, ChartSlot, RenderError, Rgb};
use crate::model::{SentimentCounts, ThemeFrequency, WordCount};

pub const SENTIMENT_LABELS: [&str; 3] = ["Positive", "Negative", "Neutral"];

const BAR_BORDER_WIDTH: u16 = 2;
const BAR_RADIUS: u16 = 12;

/// Integer percentages in `[positive, negative, neutral]` order.
pub fn sentiment_percentages(counts: &SentimentCounts) -> [u32; 3] {
    let total = counts.total();
    let pct = |v: u64| crate::chart::spec::percent_of(v as f64, total);
    [pct(counts.positive), pct(counts.negative), pct(counts.neutral)]
}

/// Doughnut of positive / negative / neutral with the total as center caption.
pub fn build_sentiment_chart(counts: &SentimentCounts) -> ChartSpec {
    let total = counts.total();
    let entries = [palette::POSITIVE, palette::NEGATIVE, palette::NEUTRAL];

    let dataset = Dataset {
        label: None,
        values: vec![
            counts.positive as f64,
            counts.negative as f64,
            counts.neutral as f64,
        ],
        fill: Fill::PerPoint(entries.iter().map(|e| palette::sentiment_gradient(*e)).collect()),
        border: Border {
            color: BorderColor::PerPoint(entries.iter().map(|e| e.2).collect()),
            width: 3,
            radius: 0,
            skip_base_edge: true,
        },
        hover: Some(HoverBorder {
            color: Rgb::WHITE,
            width: 4,
        }),
    };

    ChartSpec::Doughnut {
        data: ChartData {
            labels: SENTIMENT_LABELS.iter().map(|l| l.to_string()).collect(),
            datasets: vec![dataset],
        },
        options: DoughnutOptions {
            title: Some(format!("{total} Feedbacks Analyzed")),
            legend: LegendPosition::Bottom,
            value_labels: ValueLabels::PercentOfTotal { total },
            overlay_caption: Some(total.to_string()),
            cutout_pct: 70,
        },
    }
}

fn horizontal_bar_options() -> BarOptions {
    BarOptions {
        index_axis: IndexAxis::Y,
        legend: LegendPosition::Hidden,
        value_labels: ValueLabels::Rounded {
            anchor: LabelAnchor::End,
        },
        label_color: palette::LABEL_TEXT,
        tick_color: palette::TICK_TEXT,
    }
}

/// One horizontal bar per theme, in map order, colors cycling every 4 bars.
pub fn build_theme_chart(themes: &ThemeFrequency) -> ChartSpec {
    let (labels, values): (Vec<String>, Vec<f64>) = themes
        .iter()
        .map(|(name, count)| (name.to_string(), count as f64))
        .unzip();
    let gradients = (0..labels.len()).map(palette::theme_gradient).collect();

    let dataset = Dataset {
        label: Some("Mentions".to_string()),
        values,
        fill: Fill::PerPoint(gradients),
        border: Border {
            color: BorderColor::MatchFill,
            width: BAR_BORDER_WIDTH,
            radius: BAR_RADIUS,
            skip_base_edge: false,
        },
        hover: None,
    };

    ChartSpec::Bar {
        data: ChartData {
            labels,
            datasets: vec![dataset],
        },
        options: horizontal_bar_options(),
    }
}

/// One horizontal bar per word, input order kept, one shared gradient.
pub fn build_word_chart(words: &[WordCount]) -> ChartSpec {
    let dataset = Dataset {
        label: Some("Frequency".to_string()),
        values: words.iter().map(|w| w.count as f64).collect(),
        fill: Fill::Series(palette::word_gradient()),
        border: Border {
            color: BorderColor::Series(palette::WORD_BORDER),
            width: BAR_BORDER_WIDTH,
            radius: BAR_RADIUS,
            skip_base_edge: false,
        },
        hover: None,
    };

    ChartSpec::Bar {
        data: ChartData {
            labels: words.iter().map(|w| w.word.clone()).collect(),
            datasets: vec![dataset],
        },
        options: horizontal_bar_options(),
    }
}

pub fn render_sentiment<E: ChartEngine>(
    registry: &mut ChartInstanceRegistry<E>,
    counts: &SentimentCounts,
) -> Result<(), RenderError> {
    registry.render(ChartSlot::Sentiment, build_sentiment_chart(counts))
}

pub fn render_themes<E: ChartEngine>(
    registry: &mut ChartInstanceRegistry<E>,
    themes: &ThemeFrequency,
) -> Result<(), RenderError> {
    registry.render(ChartSlot::Themes, build_theme_chart(themes))
}

pub fn render_words<E: ChartEngine>(
    registry: &mut ChartInstanceRegistry<E>,
    words: &[WordCount],
) -> Result<(), RenderError> {
    registry.render(ChartSlot::Words, build_word_chart(words))
}
