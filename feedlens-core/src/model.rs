//! Analysis result: the aggregate the remote service returns for one batch.
//!
//! Field names follow the service's snake_case JSON. `theme_frequency` keeps
//! the order the service wrote its keys in; the dashboard draws bars in that
//! order, so it must not go through a hashing map.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Per-category sentiment counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentCounts {
    pub fn new(positive: u64, negative: u64, neutral: u64) -> Self {
        Self {
            positive,
            negative,
            neutral,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.neutral)
    }
}

/// One entry of the ranked word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Theme name → mention count, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeFrequency(Vec<(String, u64)>);

impl ThemeFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a theme. Overwriting keeps the original position.
    pub fn insert(&mut self, theme: impl Into<String>, count: u64) {
        let theme = theme.into();
        match self.0.iter_mut().find(|(name, _)| *name == theme) {
            Some(entry) => entry.1 = count,
            None => self.0.push((theme, count)),
        }
    }

    pub fn get(&self, theme: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| name == theme)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for ThemeFrequency {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut themes = ThemeFrequency::new();
        for (name, count) in iter {
            themes.insert(name, count);
        }
        themes
    }
}

impl Serialize for ThemeFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

struct ThemeFrequencyVisitor;

impl<'de> Visitor<'de> for ThemeFrequencyVisitor {
    type Value = ThemeFrequency;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of theme names to mention counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut themes = ThemeFrequency::new();
        while let Some((name, count)) = access.next_entry::<String, u64>()? {
            themes.insert(name, count);
        }
        Ok(themes)
    }
}

impl<'de> Deserialize<'de> for ThemeFrequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ThemeFrequencyVisitor)
    }
}

/// Full response body of a successful analysis call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Number of non-blank feedback lines the service analyzed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_feedbacks: Option<u64>,
    pub sentiment_counts: SentimentCounts,
    #[serde(default)]
    pub theme_frequency: ThemeFrequency,
    #[serde(default)]
    pub top_words: Vec<WordCount>,
    #[serde(default)]
    pub positive_examples: Vec<String>,
    #[serde(default)]
    pub negative_examples: Vec<String>,
}
