//! Property tests: terminal charts stay inside the area they are given.

use proptest::prelude::*;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use feedlens_core::adapters::{build_sentiment_chart, build_theme_chart, build_word_chart};
use feedlens_core::chart::{ChartInstanceRegistry, ChartSlot, ChartSpec};
use feedlens_core::{SentimentCounts, ThemeFrequency, WordCount};
use feedlens_tui::engine::{ChartView, TerminalEngine};

const CANVAS: Rect = Rect {
    x: 0,
    y: 0,
    width: 64,
    height: 32,
};

fn outside_untouched(before: &Buffer, after: &Buffer, area: Rect) -> bool {
    for y in CANVAS.top()..CANVAS.bottom() {
        for x in CANVAS.left()..CANVAS.right() {
            let inside = x >= area.left() && x < area.right() && y >= area.top() && y < area.bottom();
            if !inside && before.cell((x, y)) != after.cell((x, y)) {
                return false;
            }
        }
    }
    true
}

fn draw_clipped(slot: ChartSlot, spec: ChartSpec, area: Rect, frames: u16) -> bool {
    let mut reg = ChartInstanceRegistry::new(TerminalEngine::new(frames));
    reg.initialize();
    reg.render(slot, spec).unwrap();
    let Some(chart) = reg.get(slot) else {
        return false;
    };
    let before = Buffer::empty(CANVAS);
    let mut after = before.clone();
    ChartView::new(chart).render(area, &mut after);
    outside_untouched(&before, &after, area)
}

fn area() -> impl Strategy<Value = Rect> {
    (0u16..24, 0u16..12, 0u16..40, 0u16..20).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn doughnut_never_draws_outside(
        pos in 0u64..500, neg in 0u64..500, neu in 0u64..500,
        area in area(), frames in 0u16..6,
    ) {
        let spec = build_sentiment_chart(&SentimentCounts::new(pos, neg, neu));
        prop_assert!(draw_clipped(ChartSlot::Sentiment, spec, area, frames));
    }

    #[test]
    fn theme_bars_never_draw_outside(
        counts in prop::collection::vec(0u64..1000, 0..12),
        area in area(),
    ) {
        let mut themes = ThemeFrequency::new();
        for (i, n) in counts.iter().enumerate() {
            themes.insert(format!("theme-{i}"), *n);
        }
        prop_assert!(draw_clipped(ChartSlot::Themes, build_theme_chart(&themes), area, 0));
    }

    #[test]
    fn word_bars_never_draw_outside(
        words in prop::collection::vec(("[a-z]{1,18}", 0u64..10_000), 0..15),
        area in area(),
    ) {
        let words: Vec<WordCount> = words.into_iter().map(|(w, n)| WordCount::new(w, n)).collect();
        prop_assert!(draw_clipped(ChartSlot::Words, build_word_chart(&words), area, 0));
    }
}
