use std::{
    slice,
    time::{Duration, Instant},
};

use log::{debug, info, warn};
use uuid::Uuid;

use crate::{
    core::build_name,
    error::ImportError,
    item::csv::csv_reader::RawRow,
    product::ProductRecord,
};

use super::item::{ItemProcessor, ItemReader, ItemWriter, Outcome, Rejection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Starting,
    Started,
    Success,
}

/// Counters and messages accumulated while a step runs.
///
/// `imported + skipped` is the number of processed rows. Blank rows are only
/// counted in `ignored_count`.
#[derive(Debug)]
pub struct StepExecution {
    /// Unique identifier for this step instance
    pub id: Uuid,
    /// Human-readable name for the step
    pub name: String,
    /// Current status of the step execution
    pub status: StepStatus,
    pub start_time: Instant,
    pub end_time: Instant,
    pub duration: Duration,
    /// Number of data rows read, blank ones included
    pub read_count: usize,
    /// Number of all-blank rows passed over silently
    pub ignored_count: usize,
    pub imported_count: usize,
    /// Number of rows skipped by a rule or lost to an error
    pub skipped_count: usize,
    /// The part of `skipped_count` caused by unexpected errors
    pub error_count: usize,
    /// One message per skipped row, in input order
    pub messages: Vec<String>,
}

impl StepExecution {
    pub fn new(name: &str) -> Self {
        let now = Instant::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status: StepStatus::Starting,
            start_time: now,
            end_time: now,
            duration: Duration::ZERO,
            read_count: 0,
            ignored_count: 0,
            imported_count: 0,
            skipped_count: 0,
            error_count: 0,
            messages: Vec::new(),
        }
    }

    pub fn processed_count(&self) -> usize {
        self.imported_count + self.skipped_count
    }

    fn record(&mut self, outcome: &Outcome<ProductRecord>) {
        match outcome {
            Outcome::Accepted(record) => {
                info!("Imported product: {}", record.name);
                self.imported_count += 1;
                return;
            }
            Outcome::Skipped { .. } => {}
            Outcome::Errored { .. } => self.error_count += 1,
        }

        self.skipped_count += 1;
        if let Some(message) = outcome.message() {
            warn!("{}", message);
            self.messages.push(message);
        }
    }
}

/// Drives rows from the reader through the processor and, in live mode, hands
/// each accepted record to the writer before the next row is read.
///
/// A step without a writer is a dry run: every decision is taken the same way
/// but nothing is persisted. Row-level failures never stop the step.
pub struct ImportStep<'a> {
    name: String,
    /// Component responsible for reading rows from the source
    reader: &'a dyn ItemReader<RawRow>,
    /// Component responsible for classifying rows
    processor: &'a dyn ItemProcessor<RawRow, ProductRecord>,
    /// Record sink, absent in dry-run mode
    writer: Option<&'a dyn ItemWriter<ProductRecord>>,
}

impl ImportStep<'_> {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn is_dry_run(&self) -> bool {
        self.writer.is_none()
    }

    pub fn execute(&self) -> StepExecution {
        let mut step_execution = StepExecution::new(&self.name);
        step_execution.status = StepStatus::Started;

        info!(
            "Start of step: {}, id: {}",
            step_execution.name, step_execution.id
        );

        if let Some(writer) = self.writer {
            Self::manage_error(writer.open());
        }

        loop {
            let row = match self.reader.read() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(error) => {
                    step_execution.read_count += 1;
                    step_execution.record(&Outcome::errored("unreadable row", error));
                    continue;
                }
            };
            step_execution.read_count += 1;

            if row.is_blank() {
                debug!("Ignoring blank record {}", row.record);
                step_execution.ignored_count += 1;
                continue;
            }

            let outcome = match self.processor.process(&row) {
                Outcome::Accepted(record) => self.write(record),
                other => other,
            };

            step_execution.record(&outcome);
        }

        if let Some(writer) = self.writer {
            Self::manage_error(writer.flush());
            Self::manage_error(writer.close());
        }

        step_execution.status = StepStatus::Success;
        step_execution.end_time = Instant::now();
        step_execution.duration = step_execution.start_time.elapsed();

        info!(
            "End of step: {}, id: {}",
            step_execution.name, step_execution.id
        );

        step_execution
    }

    /// Persists one accepted record.
    ///
    /// A unique-key violation means another writer got there first, so the row
    /// is a duplicate rather than a failure.
    fn write(&self, record: ProductRecord) -> Outcome<ProductRecord> {
        let Some(writer) = self.writer else {
            return Outcome::Accepted(record);
        };

        match writer.write(slice::from_ref(&record)) {
            Ok(()) => Outcome::Accepted(record),
            Err(ImportError::DuplicateKey(_)) => {
                Outcome::skipped(record.name, Rejection::DuplicateCode)
            }
            Err(error) => Outcome::errored(record.name, error),
        }
    }

    /// Logs lifecycle errors from the writer without failing the step.
    fn manage_error(result: Result<(), ImportError>) {
        if let Err(error) = result {
            warn!("Non-fatal error: {}", error);
        }
    }
}

pub struct StepBuilder<'a> {
    name: Option<String>,
    reader: Option<&'a dyn ItemReader<RawRow>>,
    processor: Option<&'a dyn ItemProcessor<RawRow, ProductRecord>>,
    writer: Option<&'a dyn ItemWriter<ProductRecord>>,
}

impl Default for StepBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> StepBuilder<'a> {
    pub fn new() -> Self {
        Self {
            name: None,
            reader: None,
            processor: None,
            writer: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn reader(mut self, reader: &'a dyn ItemReader<RawRow>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn processor(mut self, processor: &'a dyn ItemProcessor<RawRow, ProductRecord>) -> Self {
        self.processor = Some(processor);
        self
    }

    /// Sets the record sink. Leave it unset for a dry run.
    pub fn writer(mut self, writer: Option<&'a dyn ItemWriter<ProductRecord>>) -> Self {
        self.writer = writer;
        self
    }

    /// # Errors
    ///
    /// [`ImportError::MissingComponent`] when no reader or processor was set.
    pub fn build(self) -> Result<ImportStep<'a>, ImportError> {
        Ok(ImportStep {
            name: self.name.unwrap_or_else(build_name),
            reader: self.reader.ok_or(ImportError::MissingComponent("reader"))?,
            processor: self
                .processor
                .ok_or(ImportError::MissingComponent("processor"))?,
            writer: self.writer,
        })
    }
}
