//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Single-record CSV: `k` delimiters normalize to `k + 1` lines
//! 2. Sentiment percentages: zero total is all zeros, otherwise bounded
//! 3. Registry: repeated renders on one slot leave exactly one live handle
//! 4. Theme palette: colors repeat with period 4
//! 5. Top words: adapter keeps input order
//! 6. Example lists: one block per example, or one fallback block

use proptest::prelude::*;

use feedlens_core::adapters::{
    build_theme_chart, build_word_chart, sentiment_percentages, SENTIMENT_LABELS,
};
use feedlens_core::chart::{ChartInstanceRegistry, ChartSlot, HeadlessEngine};
use feedlens_core::examples::{render_examples, ExampleBlock, ExampleCategory};
use feedlens_core::import::normalize;
use feedlens_core::{SentimentCounts, ThemeFrequency, WordCount};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_cell() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,12}"
}

fn arb_counts() -> impl Strategy<Value = SentimentCounts> {
    (0u64..10_000, 0u64..10_000, 0u64..10_000)
        .prop_map(|(p, n, u)| SentimentCounts::new(p, n, u))
}

fn arb_themes() -> impl Strategy<Value = ThemeFrequency> {
    prop::collection::vec(0u64..500, 0..24).prop_map(|counts| {
        counts
            .into_iter()
            .enumerate()
            .map(|(i, c)| (format!("theme_{i}"), c))
            .collect()
    })
}

// ── 1. Single-record CSV ─────────────────────────────────────────────

proptest! {
    #[test]
    fn csv_record_splits_into_k_plus_one_lines(cells in prop::collection::vec(arb_cell(), 1..30)) {
        let record = cells.join(",");
        let out = normalize(record.as_bytes(), "export.csv").unwrap();

        prop_assert_eq!(out.line_count, cells.len());
        let expected = cells.join("\n");
        prop_assert_eq!(out.text.as_str(), expected.trim());
    }

    #[test]
    fn txt_record_is_never_split(cells in prop::collection::vec(arb_cell(), 1..30)) {
        let record = cells.join(",");
        let out = normalize(record.as_bytes(), "export.txt").unwrap();
        prop_assert_eq!(out.line_count, 1);
        prop_assert!(!out.text.contains('\n'));
    }
}

// ── 2. Sentiment percentages ─────────────────────────────────────────

proptest! {
    #[test]
    fn percentages_are_bounded(counts in arb_counts()) {
        let pct = sentiment_percentages(&counts);
        if counts.total() == 0 {
            prop_assert_eq!(pct, [0, 0, 0]);
        } else {
            for p in pct {
                prop_assert!(p <= 100);
            }
            let sum: u32 = pct.iter().sum();
            // Independent rounding of three shares drifts by at most one each way.
            prop_assert!((98..=102).contains(&sum), "sum = {}", sum);
        }
        prop_assert_eq!(SENTIMENT_LABELS.len(), pct.len());
    }
}

// ── 3. Registry ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn repeated_renders_keep_one_live_handle(renders in 1usize..40, themes in arb_themes()) {
        let engine = HeadlessEngine::new();
        let live = engine.live();
        let mut registry = ChartInstanceRegistry::new(engine);
        registry.initialize();

        for _ in 0..renders {
            registry.render(ChartSlot::Themes, build_theme_chart(&themes)).unwrap();
            prop_assert_eq!(registry.live_count(), 1);
            prop_assert_eq!(live.get(), 1);
        }

        let stats = registry.stats();
        prop_assert_eq!(stats.created, renders as u64);
        prop_assert_eq!(stats.released, renders as u64 - 1);
        prop_assert_eq!(registry.engine().created(), renders);
    }
}

// ── 4. Theme palette ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn theme_colors_have_period_four(themes in arb_themes()) {
        let spec = build_theme_chart(&themes);
        let fill = &spec.data().datasets[0].fill;
        for i in 0..themes.len().saturating_sub(4) {
            prop_assert_eq!(fill.gradient_for(i), fill.gradient_for(i + 4));
        }
    }
}

// ── 5. Top words ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn word_order_is_preserved(counts in prop::collection::vec(0u64..1000, 0..15)) {
        let words: Vec<WordCount> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| WordCount::new(format!("w{i}"), *c))
            .collect();
        let spec = build_word_chart(&words);
        let labels: Vec<String> = words.iter().map(|w| w.word.clone()).collect();
        let values: Vec<f64> = counts.iter().map(|c| *c as f64).collect();
        prop_assert_eq!(&spec.data().labels, &labels);
        prop_assert_eq!(&spec.data().datasets[0].values, &values);
    }
}

// ── 6. Example lists ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn example_blocks_match_input(examples in prop::collection::vec(".{0,40}", 0..8)) {
        let markup = render_examples(&examples, ExampleCategory::Negative);
        if examples.is_empty() {
            prop_assert_eq!(
                markup.blocks,
                vec![ExampleBlock::Empty { category: ExampleCategory::Negative }]
            );
        } else {
            prop_assert_eq!(markup.blocks.len(), examples.len());
            for (block, text) in markup.blocks.iter().zip(&examples) {
                let is_match = matches!(
                    block,
                    ExampleBlock::Example { text: t, .. } if t == text
                );
                prop_assert!(is_match);
            }
        }
    }
}
