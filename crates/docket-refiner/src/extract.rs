//! Pull question and answer text out of an input document

use crate::error::ItemError;
use docket_domain::document::{ANSWER_TEXT_POINTER, QUESTION_TEXT_POINTER};
use docket_domain::{InputDocument, QaPair};

/// Dotted name of the question field, for error messages
pub const QUESTION_FIELD: &str = "dataSet.question.raw.text";

/// Dotted name of the answer field, for error messages
pub const ANSWER_FIELD: &str = "dataSet.answer.raw.text";

/// Extract the question/answer pair, verbatim
///
/// # Errors
///
/// `ItemError::MalformedInput` if either field is missing, null, or not a
/// string. The question is checked first.
pub fn extract_pair(document: &InputDocument) -> Result<QaPair, ItemError> {
    let question = required_text(document, QUESTION_TEXT_POINTER, QUESTION_FIELD)?;
    let answer = required_text(document, ANSWER_TEXT_POINTER, ANSWER_FIELD)?;
    Ok(QaPair::new(question, answer))
}

fn required_text<'a>(
    document: &'a InputDocument,
    pointer: &str,
    field: &'static str,
) -> Result<&'a str, ItemError> {
    document
        .text_at(pointer)
        .ok_or_else(|| ItemError::MalformedInput {
            item: document.source.clone(),
            field,
        })
}
