//! Batch driver: one pass over an input directory

use crate::config::RefinerConfig;
use crate::error::{ItemError, RefinerError};
use crate::extract::extract_pair;
use crate::normalize::normalize_response;
use crate::prompt::{PromptParams, PromptTemplate};
use crate::report::RunReport;
use crate::source::{list_documents, read_document};
use docket_domain::traits::{CompletionProvider, ResultSink};
use docket_domain::{InputDocument, ResultRecord, RunId, RunState};
use std::fmt::Display;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs documents through extract → prompt → complete → normalize
///
/// Documents are handled one at a time, in file-name order. A failing
/// document never stops the run: unreadable or undecodable files are skipped,
/// every other failure becomes an error record. The batch is persisted once,
/// after the last document.
pub struct BatchDriver<P, W> {
    provider: P,
    sink: W,
    template: PromptTemplate,
    config: RefinerConfig,
    state: RunState,
}

impl<P, W> BatchDriver<P, W>
where
    P: CompletionProvider,
    P::Error: Display,
    W: ResultSink,
    W::Error: Display,
{
    /// Create a new driver
    pub fn new(provider: P, sink: W, template: PromptTemplate, config: RefinerConfig) -> Self {
        Self {
            provider,
            sink,
            template,
            config,
            state: RunState::Idle,
        }
    }

    /// Create a driver using the template selected by the configuration
    pub fn from_config(provider: P, sink: W, config: RefinerConfig) -> Result<Self, RefinerError> {
        config.validate()?;
        let template = config.load_template()?;
        Ok(Self::new(provider, sink, template, config))
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The result sink
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Refine every matching document in `source_dir`, up to `max_items`
    /// records, and persist the batch
    ///
    /// # Errors
    ///
    /// Only failures that affect the whole run are returned: the configuration
    /// is invalid, the directory cannot be listed, or the batch cannot be
    /// persisted. The driver goes back to `Idle` in that case.
    pub async fn run(
        &mut self,
        source_dir: impl AsRef<Path>,
        max_items: usize,
    ) -> Result<RunReport, RefinerError> {
        let source_dir = source_dir.as_ref();
        if let Err(e) = self.config.validate() {
            self.state = RunState::Idle;
            return Err(e);
        }

        let start_time = Instant::now();
        let run_id = RunId::new();
        let mut report = RunReport::new(run_id);

        self.state = RunState::Running;
        info!(
            "Run {} started: source '{}', template '{}', max {} items",
            run_id,
            source_dir.display(),
            self.template.name(),
            max_items
        );

        let paths = match list_documents(source_dir, self.config.extension()) {
            Ok(paths) => paths,
            Err(e) => {
                self.state = RunState::Idle;
                return Err(e);
            }
        };
        report.files_found = paths.len();
        info!("Found {} input documents", paths.len());

        let mut batch: Vec<ResultRecord> = Vec::new();
        for path in &paths {
            if batch.len() >= max_items {
                info!("Reached max of {} items, stopping", max_items);
                break;
            }

            let document = match read_document(path) {
                Ok(document) => document,
                Err(e) => {
                    warn!(item = e.item(), kind = e.kind(), "Skipping document: {}", e);
                    report.record_skip();
                    continue;
                }
            };

            debug!("Processing {}/{}: {}", batch.len() + 1, max_items, document.source);
            let record = self.refine_document(&document).await;
            report.record_outcome(&record);
            batch.push(record);
        }

        if batch.is_empty() {
            warn!("No records were produced; writing an empty batch");
        }

        if let Err(e) = self.sink.persist(&batch) {
            self.state = RunState::Idle;
            return Err(RefinerError::Persistence(e.to_string()));
        }

        self.state = RunState::Completed;
        report.state = self.state;
        report.processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Run {} complete: {} records ({} parsed, {} parse failures, {} item failures), {} skipped",
            run_id,
            report.records_written,
            report.parsed,
            report.parse_failures,
            report.item_failures,
            report.files_skipped
        );

        Ok(report)
    }

    /// Refine a single decoded document
    ///
    /// Always yields a record: extraction and completion failures are turned
    /// into an error record carrying whatever question/answer text exists.
    pub async fn refine_document(&self, document: &InputDocument) -> ResultRecord {
        match self.try_refine(document).await {
            Ok(record) => record,
            Err(e) => {
                warn!(item = e.item(), kind = e.kind(), "Recording item failure: {}", e);
                ResultRecord::item_failure(
                    document.question_text().map(str::to_string),
                    document.answer_text().map(str::to_string),
                    e.kind(),
                    e.to_string(),
                )
            }
        }
    }

    async fn try_refine(&self, document: &InputDocument) -> Result<ResultRecord, ItemError> {
        let pair = extract_pair(document)?;

        let prompt = self.template.render(&PromptParams::from(&pair));
        debug!("Prompt length for {}: {} bytes", document.source, prompt.len());

        let raw = self
            .provider
            .complete(&prompt)
            .await
            .map_err(|e| ItemError::Collaborator {
                item: document.source.clone(),
                message: e.to_string(),
            })?;
        debug!("Raw completion for {}:\n{}", document.source, raw);

        let intents = normalize_response(&raw);
        if !intents.is_parsed() {
            warn!(item = %document.source, "Completion could not be parsed as JSON");
        }

        Ok(ResultRecord::from_pair(pair, intents))
    }
}
