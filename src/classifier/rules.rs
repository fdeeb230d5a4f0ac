// src/classifier/rules.rs
// Ordered rule table for the symptom classifier. Order is significant.

use super::Severity;

/// One entry in the decision list: a predicate over the trimmed, lower-cased
/// utterance and the fixed outcome it produces.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub advice: &'static str,
    pub severity: Severity,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("severity", &self.severity)
            .finish()
    }
}

const GREETING: &str = "Hello 👋 I am Dr. Emily — your virtual health assistant. Tell me what health problem you are facing.";

const EMERGENCY: &str =
    "⚠️ Emergency detected! Please go to the nearest hospital immediately or call someone nearby.";

const LOW_MOOD: &str = "Emotional stress can affect health. Rest, hydrate, and talk to someone you trust. Seek help if unsafe thoughts occur.";

const ACIDITY: &str = "Likely acidity. Avoid spicy food at night, don't lie down after meals, and take an antacid if needed.";

const FEVER: &str = "Take paracetamol, fluids, and rest. See doctor if >3 days.";

const BODY_PAIN: &str = "Body and muscle pain usually settles with rest, warm compresses, gentle stretching and fluids. See a doctor if it lasts more than a few days or comes with fever.";

const PERIOD_CRAMPS: &str = "Yes — mild cramps on first day of periods are normal. Use heating pad and warm fluids. Consult doctor if severe pain or vomiting.";

const PERIOD: &str = "Irregular or uncomfortable periods are common. Track your cycle, stay hydrated and rest. Consult a doctor if bleeding is very heavy or the cycle changes suddenly.";

const CRAMPS: &str = "For cramps, apply a heating pad, drink warm fluids and stretch gently. Consult a doctor if the pain is severe or keeps coming back.";

static RULES: [Rule; 12] = [
    Rule {
        name: "greeting",
        matches: is_greeting,
        advice: GREETING,
        severity: Severity::Neutral,
    },
    Rule {
        name: "cardiac",
        matches: cardiac,
        advice: EMERGENCY,
        severity: Severity::Critical,
    },
    Rule {
        name: "breathing",
        matches: breathing,
        advice: EMERGENCY,
        severity: Severity::Critical,
    },
    Rule {
        name: "self_harm",
        matches: self_harm,
        advice: EMERGENCY,
        severity: Severity::Critical,
    },
    Rule {
        name: "severe_trauma",
        matches: severe_trauma,
        advice: EMERGENCY,
        severity: Severity::Critical,
    },
    Rule {
        name: "low_mood",
        matches: low_mood,
        advice: LOW_MOOD,
        severity: Severity::Low,
    },
    Rule {
        name: "acidity",
        matches: acidity,
        advice: ACIDITY,
        severity: Severity::Sick,
    },
    Rule {
        name: "fever",
        matches: fever,
        advice: FEVER,
        severity: Severity::Sick,
    },
    Rule {
        name: "body_pain",
        matches: body_pain,
        advice: BODY_PAIN,
        severity: Severity::Sick,
    },
    Rule {
        name: "period_cramps",
        matches: period_cramps,
        advice: PERIOD_CRAMPS,
        severity: Severity::WomenHealth,
    },
    Rule {
        name: "period",
        matches: period,
        advice: PERIOD,
        severity: Severity::WomenHealth,
    },
    Rule {
        name: "cramps",
        matches: cramps,
        advice: CRAMPS,
        severity: Severity::WomenHealth,
    },
];

/// The standard decision list, in evaluation order
pub fn rules() -> &'static [Rule] {
    &RULES
}

fn contains_any(msg: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| msg.contains(n))
}

fn is_greeting(msg: &str) -> bool {
    matches!(msg, "hi" | "hello" | "hey")
}

fn cardiac(msg: &str) -> bool {
    msg.contains("chest") && contains_any(msg, &["left arm", "numb", "sweating"])
}

fn breathing(msg: &str) -> bool {
    contains_any(msg, &["cant breathe", "can't breathe"]) && contains_any(msg, &["faint", "dizzy"])
}

fn self_harm(msg: &str) -> bool {
    contains_any(msg, &["suicide", "kill myself", "want to die"])
}

// "bleeding heavily" alone counts, with or without trauma context
fn severe_trauma(msg: &str) -> bool {
    contains_any(msg, &["unconscious", "accident", "bleeding heavily"])
}

fn low_mood(msg: &str) -> bool {
    contains_any(msg, &["sad", "depressed", "crying"])
}

fn acidity(msg: &str) -> bool {
    contains_any(msg, &["acidity", "heartburn", "burning chest", "after spicy"])
}

fn fever(msg: &str) -> bool {
    msg.contains("fever")
}

fn body_pain(msg: &str) -> bool {
    contains_any(msg, &["body pain", "muscle pain"])
}

fn period_cramps(msg: &str) -> bool {
    msg.contains("period cramps") || (msg.contains("period") && msg.contains("cramps"))
}

fn period(msg: &str) -> bool {
    msg.contains("period")
}

fn cramps(msg: &str) -> bool {
    msg.contains("cramps")
}
