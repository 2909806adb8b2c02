//! Docket Refiner
//!
//! Turns a directory of interview transcripts into one JSON array of
//! question/answer records annotated by a language model.
//!
//! # Overview
//!
//! Each input document carries a question and an answer at
//! `dataSet.question.raw.text` and `dataSet.answer.raw.text`. The refiner
//! renders both into a prompt, sends it to a completion service, and parses
//! the reply as JSON. Replies that are not JSON are kept as a sentinel object
//! so no model output is lost.
//!
//! # Architecture
//!
//! ```text
//! Directory → Source → Extract → Prompt → Provider → Normalize → Sink
//! ```
//!
//! # Key Features
//!
//! - **Failure isolation**: a bad document never aborts the run
//! - **Item cap**: stop after N records
//! - **Prompt templates**: built-in categorize/evaluate prompts or a custom file
//! - **Run report**: counts of parsed, unparsable and failed items
//!
//! # Example Usage
//!
//! ```no_run
//! use docket_refiner::{BatchDriver, JsonFileSink, PromptTemplate, RefinerConfig};
//! use docket_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"question_intent": "Insight"}"#);
//! let sink = JsonFileSink::new("refined.json");
//! let mut driver = BatchDriver::new(
//!     provider,
//!     sink,
//!     PromptTemplate::categorize(),
//!     RefinerConfig::default(),
//! );
//!
//! let report = driver.run("./data", 100).await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod driver;
mod error;
mod extract;
mod normalize;
mod prompt;
mod report;
mod source;
mod writer;


pub use config::{PromptKind, RefinerConfig};
pub use driver::BatchDriver;
pub use error::{ItemError, RefinerError};
pub use extract::{extract_pair, ANSWER_FIELD, QUESTION_FIELD};
pub use normalize::{clean_response, normalize_response};
pub use prompt::{PromptParams, PromptTemplate, ANSWER_PLACEHOLDER, QUESTION_PLACEHOLDER};
pub use report::RunReport;
pub use source::{item_name, list_documents, read_document};
pub use writer::{JsonFileSink, MemorySink, WriteError};
