//! Known pricing signals in typed notes and voice transcripts.

use serde::{Deserialize, Serialize};

/// Where a signal was heard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOrigin {
    Text,
    Voice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedSignal {
    pub name: &'static str,
    pub label: &'static str,
    /// Signed fraction, e.g. 0.15 for +15%.
    pub percent: f64,
    pub origin: SignalOrigin,
}

struct SignalRule {
    name: &'static str,
    label: &'static str,
    percent: f64,
    phrases: &'static [&'static str],
}

const RULES: &[SignalRule] = &[
    SignalRule {
        name: "rush",
        label: "Rush job",
        percent: 0.15,
        phrases: &["rush", "asap", "urgent", "expedite", "as soon as possible"],
    },
    SignalRule {
        name: "after_hours",
        label: "After-hours or weekend work",
        percent: 0.10,
        phrases: &["after hours", "weekend", "overnight", "evening work"],
    },
    SignalRule {
        name: "difficult_access",
        label: "Difficult site access",
        percent: 0.10,
        phrases: &[
            "difficult access",
            "hard to access",
            "hard to reach",
            "tight access",
            "no access",
        ],
    },
    SignalRule {
        name: "repeat_customer",
        label: "Repeat customer",
        percent: -0.05,
        phrases: &[
            "repeat customer",
            "returning customer",
            "loyal customer",
            "worked with us before",
        ],
    },
];

/// Confidence attached to a keyword-detected signal.
pub const SIGNAL_CONFIDENCE: f64 = 0.6;

/// Signals in rule order; each at most once. A signal present in the notes
/// is a text signal even if the transcript mentions it too.
pub fn detect_signals(notes: Option<&str>, voice_transcript: Option<&str>) -> Vec<DetectedSignal> {
    let notes = notes.map(word_padded);
    let voice = voice_transcript.map(word_padded);
    let mentions = |text: &Option<String>, rule: &SignalRule| {
        text.as_deref().is_some_and(|t| {
            rule.phrases
                .iter()
                .any(|p| t.contains(&format!(" {p} ")))
        })
    };

    RULES
        .iter()
        .filter_map(|rule| {
            let origin = if mentions(&notes, rule) {
                SignalOrigin::Text
            } else if mentions(&voice, rule) {
                SignalOrigin::Voice
            } else {
                return None;
            };
            Some(DetectedSignal {
                name: rule.name,
                label: rule.label,
                percent: rule.percent,
                origin,
            })
        })
        .collect()
}

/// Lowercase words separated by single spaces, padded on both ends, so
/// phrases only match on word boundaries ("brush" never matches "rush").
fn word_padded(text: &str) -> String {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!(" {} ", words.join(" "))
}
