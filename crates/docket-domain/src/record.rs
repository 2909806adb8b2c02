//! Result records - the unit of output for a refinement run

use crate::document::QaPair;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker stored in `error` when completion text is not valid JSON
pub const PARSE_FAILURE_MARKER: &str = "Failed to parse API response";

/// Marker stored in `error` when an item could not be sent or answered
pub const ITEM_FAILURE_MARKER: &str = "Failed to process item";

/// Error object stored in place of parsed model output
///
/// A parse failure serializes as exactly
/// `{"error": "Failed to parse API response", "raw_response": "..."}`.
/// Item failures carry a `kind` label and a `detail` message instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorSentinel {
    /// Failure marker
    pub error: String,

    /// Cleaned completion text that failed to parse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,

    /// Stable error kind label (item failures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Human readable error message (item failures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSentinel {
    /// Sentinel for completion text that could not be parsed as JSON
    pub fn parse_failure(raw_response: impl Into<String>) -> Self {
        Self {
            error: PARSE_FAILURE_MARKER.to_string(),
            raw_response: Some(raw_response.into()),
            kind: None,
            detail: None,
        }
    }

    /// Sentinel for an item that failed before a response could be parsed
    pub fn item_failure(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: ITEM_FAILURE_MARKER.to_string(),
            raw_response: None,
            kind: Some(kind.into()),
            detail: Some(detail.into()),
        }
    }

    /// Whether this sentinel records a JSON parse failure
    pub fn is_parse_failure(&self) -> bool {
        self.error == PARSE_FAILURE_MARKER
    }
}

/// Model output for one record: parsed JSON or an error sentinel
///
/// The parsed value is opaque. No schema is enforced beyond "valid JSON".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategorizedIntents {
    /// Error sentinel in place of model output
    Failed(ErrorSentinel),

    /// Successfully parsed model output
    Parsed(Value),
}

impl CategorizedIntents {
    /// The parsed value, if any
    pub fn as_parsed(&self) -> Option<&Value> {
        match self {
            CategorizedIntents::Parsed(value) => Some(value),
            CategorizedIntents::Failed(_) => None,
        }
    }

    /// The error sentinel, if any
    pub fn as_failure(&self) -> Option<&ErrorSentinel> {
        match self {
            CategorizedIntents::Failed(sentinel) => Some(sentinel),
            CategorizedIntents::Parsed(_) => None,
        }
    }

    /// Whether the model output was parsed
    pub fn is_parsed(&self) -> bool {
        matches!(self, CategorizedIntents::Parsed(_))
    }
}

/// One output record
///
/// Question and answer are copied verbatim from the input document. They are
/// only ever absent on item-failure records where the document did not
/// provide them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Question text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    /// Answer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Parsed model output or error sentinel
    pub categorized_intents: CategorizedIntents,
}

impl ResultRecord {
    /// Record carrying parsed model output
    pub fn parsed(pair: QaPair, value: Value) -> Self {
        Self::from_pair(pair, CategorizedIntents::Parsed(value))
    }

    /// Record carrying a parse-failure sentinel
    pub fn parse_failure(pair: QaPair, raw_response: impl Into<String>) -> Self {
        Self::from_pair(
            pair,
            CategorizedIntents::Failed(ErrorSentinel::parse_failure(raw_response)),
        )
    }

    /// Record for an item that failed before its response could be parsed
    pub fn item_failure(
        question: Option<String>,
        answer: Option<String>,
        kind: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            question,
            answer,
            categorized_intents: CategorizedIntents::Failed(ErrorSentinel::item_failure(
                kind, detail,
            )),
        }
    }

    /// Record built from a complete question/answer pair
    pub fn from_pair(pair: QaPair, categorized_intents: CategorizedIntents) -> Self {
        Self {
            question: Some(pair.question),
            answer: Some(pair.answer),
            categorized_intents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_failure_shape() {
        let record = ResultRecord::parse_failure(
            QaPair::new("Q", "A"),
            "I cannot help with that.",
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "question": "Q",
                "answer": "A",
                "categorized_intents": {
                    "error": "Failed to parse API response",
                    "raw_response": "I cannot help with that."
                }
            })
        );
    }

    #[test]
    fn test_item_failure_omits_missing_fields() {
        let record = ResultRecord::item_failure(
            Some("Q".to_string()),
            None,
            "malformed_input",
            "missing answer text",
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["question"], "Q");
        assert!(value.get("answer").is_none());
        assert_eq!(value["categorized_intents"]["kind"], "malformed_input");
        assert_eq!(value["categorized_intents"]["error"], ITEM_FAILURE_MARKER);
    }

    #[test]
    fn test_parsed_round_trip() {
        let record = ResultRecord::parsed(
            QaPair::new("Q", "A"),
            json!({"question_intent": "Insight", "answer_intents": []}),
        );

        let text = serde_json::to_string(&record).unwrap();
        let back: ResultRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
        assert!(back.categorized_intents.is_parsed());
    }

    #[test]
    fn test_sentinel_deserializes_as_failure() {
        let intents: CategorizedIntents = serde_json::from_value(json!({
            "error": "Failed to parse API response",
            "raw_response": "nope"
        }))
        .unwrap();

        let sentinel = intents.as_failure().unwrap();
        assert!(sentinel.is_parse_failure());
        assert_eq!(sentinel.raw_response.as_deref(), Some("nope"));
    }
}
