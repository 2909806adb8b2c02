//! Docket Domain Layer
//!
//! Core data model for Docket refinement runs. This crate defines the values
//! that flow through a run and the trait seams that infrastructure crates
//! implement.
//!
//! ## Key Concepts
//!
//! - **InputDocument**: a loosely structured JSON document read from disk
//! - **QaPair**: the question and answer text pulled out of a document
//! - **ResultRecord**: one output unit, pairing a question/answer with either
//!   the model's parsed output or an error sentinel
//! - **RunId / RunState**: identity and lifecycle of a single batch run
//!
//! ## Architecture
//!
//! - No I/O in this crate
//! - Model output is kept opaque (`serde_json::Value`)
//! - Completion services and result writers are reached through traits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod record;
pub mod run;
pub mod traits;

// Re-exports for convenience
pub use document::{InputDocument, QaPair};
pub use record::{
    CategorizedIntents, ErrorSentinel, ResultRecord, ITEM_FAILURE_MARKER,
    PARSE_FAILURE_MARKER,
};
pub use run::{RunId, RunState};
