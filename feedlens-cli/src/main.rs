//! FeedLens CLI: headless access to the feedback pipeline.
//!
//! Commands:
//! - `normalize`: read a .txt/.csv file and print the normalized feedback text
//! - `analyze`: send feedback to the analysis service and print the dashboard
//!   as a summary, chart specs as JSON, or example lists as HTML
//! - `config`: print the effective configuration as TOML

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use feedlens_core::chart::{ChartSlot, HeadlessEngine};
use feedlens_core::controller::Settled;
use feedlens_core::examples::ExampleCategory;
use feedlens_core::import;
use feedlens_core::{logging, Dashboard, FeedlensConfig, HttpAnalysisService, UiController};

#[derive(Parser)]
#[command(name = "feedlens-cli", about = "FeedLens CLI — feedback sentiment analysis")]
struct Cli {
    /// Config file. Defaults to {config_dir}/feedlens/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a .txt or .csv file into one feedback entry per line.
    Normalize {
        /// File to read.
        file: PathBuf,
    },
    /// Analyze feedback from a file or inline text.
    Analyze {
        /// File to read (.txt or .csv).
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Inline feedback text, one entry per line.
        #[arg(long)]
        text: Option<String>,

        /// Analysis endpoint. Overrides config and FEEDLENS_ENDPOINT.
        #[arg(long)]
        endpoint: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
    Html,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = FeedlensConfig::load(cli.config.as_deref())?.with_env_overrides();
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_stderr(level);

    match cli.command {
        Commands::Normalize { file } => run_normalize(&file),
        Commands::Analyze {
            file,
            text,
            endpoint,
            format,
        } => {
            let endpoint = endpoint.unwrap_or_else(|| config.service.endpoint.clone());
            run_analyze(file.as_deref(), text, &endpoint, format)
        }
        Commands::Config => {
            let rendered = config
                .to_toml()
                .map_err(|e| anyhow::anyhow!("failed to render config: {e}"))?;
            print!("{rendered}");
            Ok(())
        }
    }
}

fn run_normalize(file: &Path) -> Result<()> {
    let normalized = import::import_file(file)
        .with_context(|| format!("failed to import {}", file.display()))?;
    println!("{}", normalized.text);
    eprintln!(
        "{}: {} lines",
        import::display_name(file),
        normalized.line_count
    );
    Ok(())
}

fn run_analyze(
    file: Option<&Path>,
    text: Option<String>,
    endpoint: &str,
    format: OutputFormat,
) -> Result<()> {
    let mut controller = UiController::new();
    match (file, text) {
        (Some(path), _) => {
            let outcome = import::import_file(path)
                .with_context(|| format!("failed to import {}", path.display()))?;
            controller.apply_import(&import::display_name(path), Ok(outcome));
        }
        (None, Some(text)) => {
            controller.set_input(text);
        }
        (None, None) => bail!("one of <FILE> or --text is required"),
    }

    let service = HttpAnalysisService::new(endpoint)?;
    let mut dashboard = Dashboard::new(HeadlessEngine::new());

    match controller.analyze_with(&service, &mut dashboard) {
        Settled::Dashboard => {}
        Settled::Failed(message) => bail!(message),
        Settled::Stale => bail!("analysis result was discarded"),
    }

    let output = match format {
        OutputFormat::Summary => summary(&dashboard),
        OutputFormat::Json => serde_json::to_string_pretty(&dashboard_json(&dashboard))?,
        OutputFormat::Html => html(&dashboard),
    };
    println!("{output}");
    Ok(())
}

// ── Output formats ──────────────────────────────────────────────────

fn summary(dashboard: &Dashboard<HeadlessEngine>) -> String {
    let mut out = Vec::new();
    if let Some(total) = dashboard.total_feedbacks() {
        out.push(format!("{total} feedbacks analyzed"));
    }
    for slot in ChartSlot::ALL {
        let Some(chart) = dashboard.registry().get(slot) else {
            continue;
        };
        out.push(String::new());
        match chart.spec.overlay_caption() {
            Some(caption) => out.push(format!("{} (total {caption})", slot.title())),
            None => out.push(slot.title().to_string()),
        }
        let values = chart.spec.formatted_values();
        for (label, value) in chart.spec.data().labels.iter().zip(values) {
            out.push(format!("  {label:<24} {value:>6}"));
        }
    }
    for category in [ExampleCategory::Positive, ExampleCategory::Negative] {
        if let Some(markup) = dashboard.examples(category) {
            out.push(String::new());
            out.push(format!("{} examples", capitalize(category.label())));
            for block in &markup.blocks {
                out.push(format!("  {}", block.display_text()));
            }
        }
    }
    out.join("\n")
}

fn dashboard_json(dashboard: &Dashboard<HeadlessEngine>) -> serde_json::Value {
    let mut charts = serde_json::Map::new();
    for slot in ChartSlot::ALL {
        if let Some(chart) = dashboard.registry().get(slot) {
            charts.insert(slot.id().to_string(), json!(chart.spec));
        }
    }
    json!({
        "total_feedbacks": dashboard.total_feedbacks(),
        "charts": charts,
        "examples": {
            "positive": dashboard.examples(ExampleCategory::Positive),
            "negative": dashboard.examples(ExampleCategory::Negative),
        },
    })
}

fn html(dashboard: &Dashboard<HeadlessEngine>) -> String {
    [ExampleCategory::Positive, ExampleCategory::Negative]
        .into_iter()
        .filter_map(|category| dashboard.examples(category))
        .map(|markup| markup.to_html())
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedlens_core::{AnalysisResult, SentimentCounts, ThemeFrequency, WordCount};

    fn rendered() -> Dashboard<HeadlessEngine> {
        let mut themes = ThemeFrequency::new();
        themes.insert("Delivery", 3);
        let result = AnalysisResult {
            total_feedbacks: Some(4),
            sentiment_counts: SentimentCounts::new(3, 1, 0),
            theme_frequency: themes,
            top_words: vec![WordCount::new("fast", 3)],
            positive_examples: vec!["<b>great</b>".into()],
            negative_examples: vec![],
        };
        let mut dashboard = Dashboard::new(HeadlessEngine::new());
        dashboard.render(result).unwrap();
        dashboard
    }

    #[test]
    fn summary_lists_every_chart_and_example() {
        let text = summary(&rendered());
        assert!(text.starts_with("4 feedbacks analyzed"));
        assert!(text.contains("Sentiment (total 4)"));
        assert!(text.contains("Top Words"));
        assert!(text.contains("Delivery"));
        assert!(text.contains("No negative examples found."));
    }

    #[test]
    fn json_holds_one_spec_per_slot() {
        let value = dashboard_json(&rendered());
        assert_eq!(value["total_feedbacks"], 4);
        let charts = value["charts"].as_object().unwrap();
        assert_eq!(charts.len(), 3);
        for slot in ChartSlot::ALL {
            assert!(charts.contains_key(slot.id()));
        }
    }

    #[test]
    fn html_escapes_example_text() {
        let out = html(&rendered());
        assert!(out.contains("&lt;b&gt;great&lt;/b&gt;"));
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("positive"), "Positive");
        assert_eq!(capitalize(""), "");
    }
}
