//! Text heuristics over the e-IPO card markup: title classification, title
//! splitting and label-anchored field extraction.

use std::collections::HashMap;
use std::sync::LazyLock;

use eipo_core::config::FieldLabels;
use eipo_core::error::AppError;
use eipo_core::models::ListingField;
use eipo_core::traits::{FieldExtractor, TitlePredicate};
use regex::Regex;

static RE_TICKER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([A-Z0-9]{3,5}\)$").expect("invalid regex: ticker suffix")
});

static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\(([^()]+)\)\s*$").expect("invalid regex: title")
});

/// Characters trimmed from both ends of an extracted value.
const VALUE_TRIM: &[char] = &[' ', '-', ':', '|'];

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `"PT Super Bank Indonesia Tbk (SUPA)"` into name and ticker.
///
/// Without a trailing parenthetical the whole trimmed title is the name.
/// A title that is nothing but `(XXXX)` keeps the full text as its name.
pub fn split_title(title: &str) -> (String, Option<String>) {
    let title = title.trim();
    match RE_TITLE.captures(title) {
        Some(caps) => {
            let name = caps[1].trim();
            let ticker = caps[2].trim().to_string();
            let name = if name.is_empty() { title } else { name };
            (name.to_string(), Some(ticker))
        }
        None => (title.to_string(), None),
    }
}

/// Accepts headings that contain the company marker (`"PT "`) or end with
/// a `(TICKER)` suffix.
#[derive(Debug, Clone)]
pub struct MarkerTitlePredicate {
    marker: String,
}

impl MarkerTitlePredicate {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl TitlePredicate for MarkerTitlePredicate {
    fn accepts(&self, title: &str) -> bool {
        !title.is_empty() && (title.contains(&self.marker) || RE_TICKER_SUFFIX.is_match(title))
    }
}

/// Splits card text on known labels; each label's value runs to the next
/// label or the end of the text.
#[derive(Debug, Clone)]
pub struct LabelSplitExtractor {
    splitter: Regex,
    fields: HashMap<String, ListingField>,
}

impl LabelSplitExtractor {
    pub fn new(labels: &FieldLabels) -> Result<Self, AppError> {
        let mut entries: Vec<(ListingField, &str)> = labels.entries().to_vec();
        // Longest first, so a label that prefixes another cannot shadow it.
        entries.sort_by_key(|(_, label)| std::cmp::Reverse(label.len()));

        let alternation = entries
            .iter()
            .map(|(_, label)| regex::escape(label))
            .collect::<Vec<_>>()
            .join("|");
        let splitter = Regex::new(&alternation)
            .map_err(|e| AppError::ConfigError(format!("Invalid field labels: {e}")))?;

        let fields = entries
            .into_iter()
            .map(|(field, label)| (label.to_string(), field))
            .collect();

        Ok(Self { splitter, fields })
    }
}

impl FieldExtractor for LabelSplitExtractor {
    fn extract(&self, text: &str) -> HashMap<ListingField, String> {
        let matches: Vec<_> = self.splitter.find_iter(text).collect();
        let mut out = HashMap::new();

        for (i, m) in matches.iter().enumerate() {
            let end = matches.get(i + 1).map_or(text.len(), |next| next.start());
            let value = text[m.end()..end].trim_matches(VALUE_TRIM);
            if value.is_empty() {
                continue;
            }
            if let Some(field) = self.fields.get(m.as_str()) {
                out.insert(*field, value.to_string());
            }
        }

        out
    }
}
