//! Input documents and the question/answer pair they carry

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON pointer to the question text inside an input document
pub const QUESTION_TEXT_POINTER: &str = "/dataSet/question/raw/text";

/// JSON pointer to the answer text inside an input document
pub const ANSWER_TEXT_POINTER: &str = "/dataSet/answer/raw/text";

/// A decoded input document
///
/// Documents are supplied from outside and are not owned by Docket. Only two
/// nested text fields are ever read; everything else is carried untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDocument {
    /// Identifier used in logs (usually the file name)
    pub source: String,

    /// The decoded JSON body
    pub body: Value,
}

impl InputDocument {
    /// Wrap an already decoded JSON body
    pub fn new(source: impl Into<String>, body: Value) -> Self {
        Self {
            source: source.into(),
            body,
        }
    }

    /// Decode a document from raw bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use docket_domain::InputDocument;
    ///
    /// let doc = InputDocument::from_slice("a.json", br#"{"dataSet": {}}"#).unwrap();
    /// assert_eq!(doc.source, "a.json");
    /// assert!(doc.question_text().is_none());
    /// ```
    pub fn from_slice(source: impl Into<String>, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let body = serde_json::from_slice(bytes)?;
        Ok(Self::new(source, body))
    }

    /// String value at a JSON pointer, if present and a string
    pub fn text_at(&self, pointer: &str) -> Option<&str> {
        self.body.pointer(pointer).and_then(Value::as_str)
    }

    /// The nested question text
    pub fn question_text(&self) -> Option<&str> {
        self.text_at(QUESTION_TEXT_POINTER)
    }

    /// The nested answer text
    pub fn answer_text(&self) -> Option<&str> {
        self.text_at(ANSWER_TEXT_POINTER)
    }
}

/// Question and answer text taken verbatim from an input document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QaPair {
    /// Interview question
    pub question: String,

    /// Candidate's answer
    pub answer: String,
}

impl QaPair {
    /// Create a new pair
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
