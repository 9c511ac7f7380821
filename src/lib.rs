pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;

pub use checker::LanguageChecker;
pub use config::Config;
pub use error::{Error, Result};

use serde::{Deserialize, Serialize};

/// The outcome of one check: findings in the order the engine reported them.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub language: Option<String>,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn total(&self) -> usize {
        self.findings.len()
    }
}

/// A single issue reported by the engine, augmented with its position in the
/// checked text once resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub offset: usize,
    #[serde(default)]
    pub length: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_message: Option<String>,
    pub context: Context,
    pub rule: Rule,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Finding {
    /// The offending span as it appears inside the context window.
    pub fn bad_text(&self) -> String {
        self.context.split().1
    }
}

/// Window of text surrounding a finding. `offset` and `length` locate the
/// offending span inside `text`, counted in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    pub text: String,
    pub offset: usize,
    pub length: usize,
}

impl Context {
    /// Split the window into (before, span, after). Out-of-range offsets are
    /// clamped to the window.
    pub fn split(&self) -> (String, String, String) {
        let chars: Vec<char> = self.text.chars().collect();
        let start = self.offset.min(chars.len());
        let end = start.saturating_add(self.length).min(chars.len());

        (
            chars[..start].iter().collect(),
            chars[start..end].iter().collect(),
            chars[end..].iter().collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub issue_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub value: String,
}
