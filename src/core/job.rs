use std::{
    borrow::Cow,
    fs,
    path::PathBuf,
    time::{Duration, Instant},
};

use log::{debug, info};
use uuid::Uuid;

use crate::{
    error::ImportError,
    item::{
        csv::{csv_reader::CsvRowReaderBuilder, delimiter::detect_delimiter, encoding::normalize},
        memory::InMemoryCodeRegistry,
    },
    product::{HeaderMapping, ProductProcessor, ProductRecord, REQUIRED_COLUMNS},
};

use super::{
    build_name,
    item::{DuplicateLookup, ItemReader, ItemWriter},
    report::ImportReport,
    step::StepBuilder,
};

/// Type alias for job execution results.
///
/// An `Err` is always a file-level failure: nothing was imported.
type JobResult<T> = Result<T, ImportError>;

/// Represents a job that can be executed.
///
/// A job owns the file-level work of an import: loading the input, detecting
/// its encoding and delimiter, and enforcing the header contract. Rows are then
/// handed to an [`ImportStep`](super::step::ImportStep).
pub trait Job {
    /// Runs the job and returns the result of the job execution.
    ///
    /// # Returns
    /// - `Ok(JobExecution)` when every row was looked at, even if some were skipped
    /// - `Err(ImportError)` when the file is missing, unreadable or fails the
    ///   header contract, or when a live job lacks its store
    fn run(&self) -> JobResult<JobExecution>;
}

/// Represents the execution of a job.
#[derive(Debug)]
pub struct JobExecution {
    /// The time when the job started executing
    pub start: Instant,
    /// The time when the job finished executing
    pub end: Instant,
    /// The total duration of the job execution
    pub duration: Duration,
    /// Counts and messages for the operator
    pub report: ImportReport,
}

/// Where the job reads its input from.
enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl Source {
    fn load(&self) -> JobResult<Cow<'_, [u8]>> {
        match self {
            Source::Path(path) => fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| ImportError::Io {
                    path: path.clone(),
                    source,
                }),
            Source::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

/// An import of one product file.
///
/// Built through [`JobBuilder`].
pub struct ImportJob<'a> {
    /// Unique identifier for this job instance
    id: Uuid,
    /// Human-readable name for the job
    name: String,
    source: Source,
    dry_run: bool,
    lookup: Option<&'a dyn DuplicateLookup>,
    writer: Option<&'a dyn ItemWriter<ProductRecord>>,
}

impl ImportJob<'_> {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Job for ImportJob<'_> {
    /// Runs the import.
    ///
    /// This method:
    /// 1. Picks the duplicate lookup and writer for the mode
    /// 2. Loads and normalizes the input
    /// 3. Detects the delimiter and checks the header contract
    /// 4. Runs the import step over the remaining rows
    /// 5. Turns the step execution into an [`ImportReport`]
    fn run(&self) -> JobResult<JobExecution> {
        let start = Instant::now();

        info!("Start of job: {}, id: {}", self.name, self.id);

        let registry = InMemoryCodeRegistry::default();
        let (lookup, writer): (&dyn DuplicateLookup, Option<&dyn ItemWriter<ProductRecord>>) =
            if self.dry_run {
                info!("Running in dry-run mode. No data will be inserted.");
                (&registry, None)
            } else {
                let lookup = self
                    .lookup
                    .ok_or(ImportError::MissingComponent("duplicate lookup"))?;
                let writer = self
                    .writer
                    .ok_or(ImportError::MissingComponent("record writer"))?;
                (lookup, Some(writer))
            };

        let bytes = self.source.load()?;
        let text = normalize(&bytes);
        let encoding = text.encoding();
        let delimiter = detect_delimiter(text.first_line());
        debug!("Detected delimiter: {:?}", char::from(delimiter));

        let reader = CsvRowReaderBuilder::new()
            .delimiter(delimiter)
            .from_text(text);

        let header = reader
            .read()?
            .ok_or_else(|| ImportError::HeaderMismatch {
                missing: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            })?;
        let mapping = HeaderMapping::from_header(&header)?;

        let processor = ProductProcessor::new(mapping, lookup);
        let step = StepBuilder::new()
            .name(&self.name)
            .reader(&reader)
            .processor(&processor)
            .writer(writer)
            .build()?;

        let execution = step.execute();
        let report = ImportReport::from_execution(&execution, self.dry_run, encoding, delimiter);

        info!("End of job: {}, id: {}", self.name, self.id);

        Ok(JobExecution {
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            report,
        })
    }
}

/// Builder for creating an import job.
///
/// # Example
///
/// ```
/// use product_import::core::job::{Job, JobBuilder};
///
/// let csv = "Product Code,Product Name,Product Description,Stock,Cost in GBP,Discontinued
/// P0001,TV,32 inch,10,399.99,
/// P0002,Cd Player,Nice CD player,11,50.12,yes";
///
/// let job = JobBuilder::new()
///     .name("preview".to_string())
///     .bytes(csv.as_bytes().to_vec())
///     .dry_run(true)
///     .build()
///     .unwrap();
///
/// let execution = job.run().unwrap();
/// assert_eq!(execution.report.imported, 2);
/// ```
#[derive(Default)]
pub struct JobBuilder<'a> {
    /// Optional name for the job (generated randomly if not specified)
    name: Option<String>,
    source: Option<Source>,
    dry_run: bool,
    lookup: Option<&'a dyn DuplicateLookup>,
    writer: Option<&'a dyn ItemWriter<ProductRecord>>,
}

impl<'a> JobBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: String) -> JobBuilder<'a> {
        self.name = Some(name);
        self
    }

    /// Reads the input from a file.
    pub fn path(mut self, path: impl Into<PathBuf>) -> JobBuilder<'a> {
        self.source = Some(Source::Path(path.into()));
        self
    }

    /// Reads the input from memory.
    pub fn bytes(mut self, bytes: Vec<u8>) -> JobBuilder<'a> {
        self.source = Some(Source::Bytes(bytes));
        self
    }

    /// Validates and de-duplicates without persisting anything.
    ///
    /// A dry run only catches codes repeated within the file itself: it never
    /// asks the durable store, so a code that already exists there is
    /// reported as importable. The configured lookup and writer are ignored.
    pub fn dry_run(mut self, dry_run: bool) -> JobBuilder<'a> {
        self.dry_run = dry_run;
        self
    }

    /// Duplicate lookup backed by the durable store, used in live mode.
    pub fn lookup(mut self, lookup: &'a dyn DuplicateLookup) -> JobBuilder<'a> {
        self.lookup = Some(lookup);
        self
    }

    /// Record sink, used in live mode.
    pub fn writer(mut self, writer: &'a dyn ItemWriter<ProductRecord>) -> JobBuilder<'a> {
        self.writer = Some(writer);
        self
    }

    /// # Errors
    ///
    /// [`ImportError::MissingComponent`] when no input was configured.
    pub fn build(self) -> JobResult<ImportJob<'a>> {
        Ok(ImportJob {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            source: self.source.ok_or(ImportError::MissingComponent("source"))?,
            dry_run: self.dry_run,
            lookup: self.lookup,
            writer: self.writer,
        })
    }
}
