use serde_json::Value;

use crate::models::CorrectionRecord;

/// Typed result contract of the optional natural-language correction analyzer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzerOutcome {
    Success {
        adjustments: Vec<String>,
        tailored_prompt: Option<String>,
    },
    Empty,
    Malformed {
        reason: String,
    },
}

impl AnalyzerOutcome {
    /// Parse raw analyzer text (`{"adjustments": [...], "tailored_prompt": "..."}`).
    ///
    /// Markdown code fences are stripped. Non-string adjustments and blank
    /// statements are dropped. Nothing usable yields `Empty`.
    pub fn from_raw_json(raw: &str) -> Self {
        let trimmed = strip_code_fence(raw.trim());
        if trimmed.is_empty() {
            return Self::Empty;
        }

        let value: Value = match serde_json::from_str(trimmed) {
            Ok(v) => v,
            Err(e) => {
                return Self::Malformed {
                    reason: format!("invalid JSON: {e}"),
                }
            }
        };

        let Some(object) = value.as_object() else {
            return Self::Malformed {
                reason: "expected a JSON object".to_string(),
            };
        };

        let adjustments = match object.get("adjustments") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(_) => {
                return Self::Malformed {
                    reason: "`adjustments` must be an array of strings".to_string(),
                }
            }
        };

        let tailored_prompt = object
            .get("tailored_prompt")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        if adjustments.is_empty() && tailored_prompt.is_none() {
            Self::Empty
        } else {
            Self::Success {
                adjustments,
                tailored_prompt,
            }
        }
    }

    /// Adjustment statements carried by a successful outcome.
    pub fn adjustments(&self) -> &[String] {
        match self {
            Self::Success { adjustments, .. } => adjustments,
            _ => &[],
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Optional external analyzer turning a correction into adjustment statements.
///
/// Implementations may block; callers run them under a bounded timeout.
pub trait ICorrectionAnalyzer: Send + Sync {
    fn analyze(&self, record: &CorrectionRecord, notes: Option<&str>) -> AnalyzerOutcome;
}
