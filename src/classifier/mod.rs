// src/classifier/mod.rs
// Symptom classifier: ordered keyword rules mapping an utterance to a Verdict

mod rules;

use serde::Serialize;
use std::fmt;
use tracing::debug;

pub use rules::{rules, Rule};

/// Severity bucket attached to every verdict.
///
/// The numeric codes are what the mood log stores and what the chart plots
/// on its 0-8 y-axis, so they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Critical,
    Low,
    Neutral,
    Sick,
    #[serde(rename = "Women Health")]
    WomenHealth,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::Low,
        Severity::Neutral,
        Severity::Sick,
        Severity::WomenHealth,
    ];

    /// Storage / plotting code
    pub fn code(self) -> i64 {
        match self {
            Severity::Critical => 1,
            Severity::Low => 2,
            Severity::Neutral => 3,
            Severity::Sick => 7,
            Severity::WomenHealth => 8,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Low => "Low",
            Severity::Neutral => "Neutral",
            Severity::Sick => "Sick",
            Severity::WomenHealth => "Women Health",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub advice: String,
    pub severity: Severity,
    /// Name of the rule that fired, `None` for the fallback verdict
    pub rule: Option<&'static str>,
}

impl Verdict {
    /// Critical verdicts are the only ones that page the emergency contact
    pub fn requires_alert(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// Classify an utterance against the standard rule table.
pub fn classify(utterance: &str) -> Verdict {
    classify_with(rules(), utterance)
}

/// Classify against an arbitrary ordered rule table. First match wins; no match
/// echoes the untouched input into the fallback advice.
pub fn classify_with(table: &[Rule], utterance: &str) -> Verdict {
    let normalized = utterance.trim().to_lowercase();

    for rule in table {
        if (rule.matches)(&normalized) {
            debug!(rule = rule.name, severity = %rule.severity, "classifier rule matched");
            return Verdict {
                advice: rule.advice.to_string(),
                severity: rule.severity,
                rule: Some(rule.name),
            };
        }
    }

    fallback(utterance)
}

fn fallback(utterance: &str) -> Verdict {
    Verdict {
        advice: format!(
            "Based on your symptom '{}', rest, hydration and monitoring advised. Consult doctor if worsening.",
            utterance
        ),
        severity: Severity::Neutral,
        rule: None,
    }
}
