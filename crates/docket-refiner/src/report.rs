//! Summary of a finished run

use docket_domain::{ResultRecord, RunId, RunState};
use serde::{Deserialize, Serialize};

/// Counters collected while a run processes documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier
    pub run_id: RunId,

    /// Lifecycle state when the report was taken
    pub state: RunState,

    /// Matching files found in the input directory
    pub files_found: usize,

    /// Files skipped because they could not be read or decoded
    pub files_skipped: usize,

    /// Records appended to the batch
    pub records_written: usize,

    /// Records with parsed model output
    pub parsed: usize,

    /// Records whose completion was not valid JSON
    pub parse_failures: usize,

    /// Records for items that failed before a response was parsed
    pub item_failures: usize,

    /// Wall-clock time of the run
    pub processing_time_ms: u64,
}

impl RunReport {
    /// Empty report for a run
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            state: RunState::Idle,
            files_found: 0,
            files_skipped: 0,
            records_written: 0,
            parsed: 0,
            parse_failures: 0,
            item_failures: 0,
            processing_time_ms: 0,
        }
    }

    /// Count a skipped file
    pub fn record_skip(&mut self) {
        self.files_skipped += 1;
    }

    /// Count an appended record by outcome
    pub fn record_outcome(&mut self, record: &ResultRecord) {
        self.records_written += 1;
        match record.categorized_intents.as_failure() {
            None => self.parsed += 1,
            Some(sentinel) if sentinel.is_parse_failure() => self.parse_failures += 1,
            Some(_) => self.item_failures += 1,
        }
    }

    /// Whether every record carries parsed output and nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.files_skipped == 0 && self.parse_failures == 0 && self.item_failures == 0
    }

    /// Multi-line human readable summary
    pub fn summary(&self) -> String {
        [
            format!("Run {} ({})", self.run_id, self.state),
            format!("  Files found:     {}", self.files_found),
            format!("  Files skipped:   {}", self.files_skipped),
            format!("  Records written: {}", self.records_written),
            format!("    parsed:         {}", self.parsed),
            format!("    parse failures: {}", self.parse_failures),
            format!("    item failures:  {}", self.item_failures),
            format!("  Elapsed:         {} ms", self.processing_time_ms),
        ]
        .join("\n")
    }
}
