//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the refinement pipeline and
//! infrastructure. Implementations live in other crates.

use crate::record::ResultRecord;
use std::future::Future;

/// Trait for text-completion services
///
/// Implemented by the infrastructure layer (docket-llm)
pub trait CompletionProvider {
    /// Error type for completion calls
    type Error;

    /// Send a prompt and return the raw completion text
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for persisting a finished batch of records
///
/// Implemented by the application layer (docket-refiner)
pub trait ResultSink {
    /// Error type for persistence
    type Error;

    /// Persist every record of a batch, in order
    fn persist(&mut self, records: &[ResultRecord]) -> Result<(), Self::Error>;
}
