//! Prompt templates for the completion service
//!
//! A template is plain text with `{question}` and `{answer}` placeholders.
//! Rendering is a single left-to-right pass, so placeholder-like text inside a
//! question or answer is copied through untouched.

use crate::config::PromptKind;
use crate::error::RefinerError;
use docket_domain::QaPair;
use std::fs;
use std::path::Path;

/// Placeholder replaced by the question text
pub const QUESTION_PLACEHOLDER: &str = "{question}";

/// Placeholder replaced by the answer text
pub const ANSWER_PLACEHOLDER: &str = "{answer}";

/// Parameters for one rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptParams<'a> {
    /// Question text
    pub question: &'a str,
    /// Answer text
    pub answer: &'a str,
}

impl<'a> From<&'a QaPair> for PromptParams<'a> {
    fn from(pair: &'a QaPair) -> Self {
        Self {
            question: &pair.question,
            answer: &pair.answer,
        }
    }
}

/// A named prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    text: String,
}

impl PromptTemplate {
    /// Intent categorization template
    pub fn categorize() -> Self {
        Self {
            name: PromptKind::Categorize.as_str().to_string(),
            text: CATEGORIZE_TEMPLATE.to_string(),
        }
    }

    /// Answer appropriateness template
    pub fn evaluate() -> Self {
        Self {
            name: PromptKind::Evaluate.as_str().to_string(),
            text: EVALUATE_TEMPLATE.to_string(),
        }
    }

    /// Built-in template for a prompt kind
    pub fn for_kind(kind: PromptKind) -> Self {
        match kind {
            PromptKind::Categorize => Self::categorize(),
            PromptKind::Evaluate => Self::evaluate(),
        }
    }

    /// Custom template from text
    ///
    /// # Errors
    ///
    /// Returns `RefinerError::Configuration` unless both placeholders appear.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Result<Self, RefinerError> {
        let name = name.into();
        let text = text.into();

        for placeholder in [QUESTION_PLACEHOLDER, ANSWER_PLACEHOLDER] {
            if !text.contains(placeholder) {
                return Err(RefinerError::Configuration(format!(
                    "Template '{}' is missing the {} placeholder",
                    name, placeholder
                )));
            }
        }

        Ok(Self { name, text })
    }

    /// Custom template from a file, named after the file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RefinerError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            RefinerError::Configuration(format!(
                "Failed to read template '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_text(path.display().to_string(), text)
    }

    /// Template name (built-in kind or file path)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template for one question/answer pair
    pub fn render(&self, params: &PromptParams<'_>) -> String {
        let mut prompt =
            String::with_capacity(self.text.len() + params.question.len() + params.answer.len());
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find('{') {
            prompt.push_str(&rest[..start]);
            let tail = &rest[start..];

            if let Some(after) = tail.strip_prefix(QUESTION_PLACEHOLDER) {
                prompt.push_str(params.question);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(ANSWER_PLACEHOLDER) {
                prompt.push_str(params.answer);
                rest = after;
            } else {
                prompt.push('{');
                rest = &tail[1..];
            }
        }

        prompt.push_str(rest);
        prompt
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::categorize()
    }
}

const CATEGORIZE_TEMPLATE: &str = r#"Analyze the interview question and answer below and identify the intent elements present in each, using the intent element traits listed here.
Anything that fits none of the five traits is categorized as "Other".

###
<<Intent element traits>>
Personality characteristic: the question or answer reveals the applicant's personality or disposition.
Philosophy characteristic: the question or answer reveals beliefs, ideas or values the applicant holds important.
Self-improvement characteristic: the question asks about, or the answer describes, efforts to improve oneself or to act self-directedly.
Insight characteristic: the question asks, or the answer shows, how the applicant reads a situation or phenomenon, or what the best choice for it would be.
Expertise characteristic: the question or answer concerns occupational knowledge, jargon or concepts, or confirms professional expertise.
Other: anything else (work experience, self-description, adaptability, ...).
###

###
<<Interview question and answer>>
Question: {question}
Answer: {answer}
###

Respond with a single JSON object and nothing else, in this shape:
{"question_intent": "<trait>", "answer_intents": [{"intent": "<trait>", "justification": "<one sentence>"}]}"#;

const EVALUATE_TEMPLATE: &str = r#"Using the characteristics of appropriate and inappropriate answers below, evaluate the interviewee's demeanor and the quality of the answer to the given question, and decide whether the answer is appropriate.
Mark "O" for an appropriate answer and "X" for an inappropriate one, and add three to four sentences of analysis.

###
<<Characteristics of an appropriate answer>>
Answers the question that was asked, with concrete and relevant examples.
Stays consistent, honest and professional in tone.

<<Characteristics of an inappropriate answer>>
Avoids the question, stays vague, or contradicts itself.
Shows disrespect, exaggeration, or missing essential expertise.
###

###
<<Interview question and answer>>
Question: {question}
Answer: {answer}
###

Respond with a single JSON object and nothing else, in this shape:
{"verdict": "O" or "X", "analysis": "<three to four sentences>"}"#;
