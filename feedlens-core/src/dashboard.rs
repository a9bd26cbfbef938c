//! Dashboard contents: the three chart slots plus both example lists.

use crate::adapters;
use crate::chart::{ChartEngine, ChartInstanceRegistry, RenderError};
use crate::examples::{render_examples, ExampleCategory, ExampleMarkup};
use crate::model::AnalysisResult;

/// What the dashboard container holds after a successful analysis.
pub struct Dashboard<E: ChartEngine> {
    registry: ChartInstanceRegistry<E>,
    positive: Option<ExampleMarkup>,
    negative: Option<ExampleMarkup>,
    total_feedbacks: Option<u64>,
}

impl<E: ChartEngine> Dashboard<E> {
    /// Wrap `engine` in an initialized registry.
    pub fn new(engine: E) -> Self {
        let mut registry = ChartInstanceRegistry::new(engine);
        registry.initialize();
        Self {
            registry,
            positive: None,
            negative: None,
            total_feedbacks: None,
        }
    }

    /// Fan one result out to the three charts and both example lists.
    /// The result is consumed; nothing of it is kept besides what was drawn.
    pub fn render(&mut self, result: AnalysisResult) -> Result<(), RenderError> {
        adapters::render_sentiment(&mut self.registry, &result.sentiment_counts)?;
        adapters::render_themes(&mut self.registry, &result.theme_frequency)?;
        adapters::render_words(&mut self.registry, &result.top_words)?;

        self.positive = Some(render_examples(
            &result.positive_examples,
            ExampleCategory::Positive,
        ));
        self.negative = Some(render_examples(
            &result.negative_examples,
            ExampleCategory::Negative,
        ));
        self.total_feedbacks = result.total_feedbacks;
        Ok(())
    }

    pub fn registry(&self) -> &ChartInstanceRegistry<E> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ChartInstanceRegistry<E> {
        &mut self.registry
    }

    pub fn examples(&self, category: ExampleCategory) -> Option<&ExampleMarkup> {
        match category {
            ExampleCategory::Positive => self.positive.as_ref(),
            ExampleCategory::Negative => self.negative.as_ref(),
        }
    }

    pub fn total_feedbacks(&self) -> Option<u64> {
        self.total_feedbacks
    }
}
