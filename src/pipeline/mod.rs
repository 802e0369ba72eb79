//! # Local Pipeline Runner
//!
//! Runs extraction and aggregation as a map / shuffle / reduce job on a
//! worker thread pool:
//!
//! ```text
//! input lines ─▶ [extract × workers] ─▶ shuffle (by headword) ─▶ [aggregate × reducers]
//!                                                                   └─▶ _temporary/part-r-NNNNN
//! all tasks ok ─▶ commit: part files moved into <output>, _SUCCESS written
//! any task out of attempts ─▶ job fails, <output> removed
//! ```
//!
//! Each task is retried up to `max_attempts`. Counters from failed attempts
//! are discarded; only successful attempts are merged into the job counters.

pub mod config;
pub mod shuffle;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::counters::{self, CounterValue};
use crate::aggregate::{Counters, MemoryCounters, aggregate};
use crate::export;
use crate::extract::extract;
use crate::lexicon::Lexicon;
use crate::model::*;
use crate::{Error, Result};

pub use config::{PipelineConfig, ShuffleOrder, OutputFormat};
pub use shuffle::{Partition, partition_of};

const TEMP_DIR: &str = "_temporary";
const SUCCESS_MARKER: &str = "_SUCCESS";

// ============================================================================
// Job summary
// ============================================================================

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub input_lines: usize,
    pub edges: usize,
    /// Headwords that produced a record.
    pub records: usize,
    pub output_files: Vec<PathBuf>,
    pub counters: Vec<CounterValue>,
}

// ============================================================================
// Pipeline
// ============================================================================

/// A single local job over a shared lexicon.
pub struct Pipeline<L: Lexicon> {
    lexicon: Arc<L>,
    config: PipelineConfig,
    counters: MemoryCounters,
}

impl<L: Lexicon> Pipeline<L> {
    pub fn new(lexicon: Arc<L>, config: PipelineConfig) -> Self {
        Self {
            lexicon,
            config,
            counters: MemoryCounters::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the job. The lexicon is closed when the run ends, on every path.
    pub fn run(self, input: &Path, output: &Path) -> Result<JobSummary> {
        let _lexicon = CloseOnDrop(self.lexicon.as_ref());
        self.config.validate()?;
        let started_at = Utc::now();

        let mut out = OutputDir::create(output)?;
        let lines = read_input(input)?;
        let input_lines = lines.len();
        self.counters.increment(counters::GROUP, counters::INPUT_LINES, input_lines as u64);
        info!(input = %input.display(), lines = input_lines, "starting map stage");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("linker-worker-{i}"))
            .build()
            .map_err(|e| Error::Config(format!("cannot start worker pool: {e}")))?;

        // Map
        let mapped: Vec<(String, Result<Vec<RelationEdge>>)> = pool.install(|| {
            lines
                .par_iter()
                .map(|line| (line.trim().to_string(), self.map_task(line)))
                .collect()
        });
        let (edges, failures) = split_outcomes(mapped);
        if !failures.is_empty() {
            return Err(self.fail(failures));
        }
        let edge_count: usize = edges.iter().map(Vec::len).sum();
        info!(edges = edge_count, "map stage done, shuffling");

        // Shuffle
        let partitions = shuffle::shuffle(edges, self.config.reducers, self.config.shuffle_order);

        // Reduce
        let temp = out.temp_dir()?;
        let reduced: Vec<(String, Result<usize>)> = pool.install(|| {
            partitions
                .par_iter()
                .map(|partition| (part_name(partition.index), self.reduce_task(partition, &temp)))
                .collect()
        });
        let (record_counts, failures) = split_outcomes(reduced);
        if !failures.is_empty() {
            return Err(self.fail(failures));
        }
        let records: usize = record_counts.iter().sum();

        // Commit
        let output_files = out.commit(partitions.len())?;
        let summary = JobSummary {
            started_at,
            finished_at: Utc::now(),
            input_lines,
            edges: edge_count,
            records,
            output_files,
            counters: self.counters.snapshot(),
        };
        info!(
            records = summary.records,
            edges = summary.edges,
            output = %output.display(),
            "job committed",
        );
        Ok(summary)
    }

    /// Extract one input line.
    fn map_task(&self, line: &str) -> Result<Vec<RelationEdge>> {
        if Headword::normalize(line).is_none() {
            self.counters.increment(counters::GROUP, counters::BLANK_LINES, 1);
            return Ok(Vec::new());
        }
        let edges = self.with_retries(line.trim(), || extract(self.lexicon.as_ref(), line))?;
        self.counters.increment(counters::GROUP, counters::EDGES_EMITTED, edges.len() as u64);
        Ok(edges)
    }

    /// Aggregate one partition into `part-r-NNNNN` under `temp`.
    /// Returns the number of records written.
    fn reduce_task(&self, partition: &Partition, temp: &Path) -> Result<usize> {
        let name = part_name(partition.index);
        let path = temp.join(&name);
        let attempt_counters = self.with_retries(&name, || {
            let attempt_counters = MemoryCounters::new();
            write_partition(partition, &path, self.config.output_format, &attempt_counters)?;
            Ok(attempt_counters)
        })?;
        debug!(part = %name, groups = partition.groups.len(), "reduce task done");

        let mut written = 0;
        for counter in attempt_counters.snapshot() {
            if counter.name == counters::HEADWORDS_PROCESSED {
                written = counter.value as usize;
            }
            self.counters.increment(&counter.group, &counter.name, counter.value);
        }
        Ok(written)
    }

    fn with_retries<T>(&self, task: &str, mut attempt_fn: impl FnMut() -> Result<T>) -> Result<T> {
        let mut attempt = 1;
        loop {
            self.counters.increment(counters::GROUP, counters::TASK_ATTEMPTS, 1);
            match attempt_fn() {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.config.max_attempts => {
                    warn!(task, attempt, error = %e, "task attempt failed, retrying");
                    attempt += 1;
                }
                Err(e) => {
                    warn!(task, attempts = attempt, error = %e, "task failed");
                    return Err(e);
                }
            }
        }
    }

    fn fail(&self, failures: Vec<(String, Error)>) -> Error {
        self.counters.increment(counters::GROUP, counters::FAILED_TASKS, failures.len() as u64);
        let (task, error) = &failures[0];
        Error::JobFailed {
            failed: failures.len(),
            sample: format!("{task}: {error}"),
        }
    }
}

fn split_outcomes<T>(outcomes: Vec<(String, Result<T>)>) -> (Vec<T>, Vec<(String, Error)>) {
    let mut ok = Vec::with_capacity(outcomes.len());
    let mut failed = Vec::new();
    for (task, outcome) in outcomes {
        match outcome {
            Ok(value) => ok.push(value),
            Err(e) => failed.push((task, e)),
        }
    }
    (ok, failed)
}

fn part_name(index: usize) -> String {
    format!("part-r-{index:05}")
}

fn write_partition(
    partition: &Partition,
    path: &Path,
    format: OutputFormat,
    counters: &dyn Counters,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    if format == OutputFormat::Cypher {
        export::write_cypher_header(&mut writer)?;
    }
    for (headword, edges) in &partition.groups {
        let Some(record) = aggregate(headword, edges.iter().cloned(), counters) else {
            continue;
        };
        match format {
            OutputFormat::Tsv => writeln!(writer, "{record}")?,
            OutputFormat::Cypher => export::write_cypher_record(&record, &mut writer)?,
        }
    }
    writer.flush()?;
    Ok(())
}

// ============================================================================
// Input
// ============================================================================

/// All lines of `path`, or of every visible file in it when it is a directory.
/// Files starting with `_` or `.` are skipped, the rest are read in name order.
///
/// Lines are raw bytes; invalid UTF-8 is decoded lossily so one bad line
/// never fails the whole input.
pub fn read_input(path: &Path) -> Result<Vec<String>> {
    let files = if path.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('_') || name.starts_with('.') || !entry.file_type()?.is_file() {
                continue;
            }
            files.push(entry.path());
        }
        files.sort();
        files
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        return Err(Error::NotFound(format!("input {}", path.display())));
    };

    let mut lines = Vec::new();
    for file in files {
        for (index, line) in BufReader::new(File::open(&file)?).split(b'\n').enumerate() {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = match String::from_utf8(line) {
                Ok(line) => line,
                Err(e) => {
                    warn!(file = %file.display(), line = index + 1, "input line is not valid UTF-8");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            lines.push(line);
        }
    }
    Ok(lines)
}

// ============================================================================
// Output directory lifecycle
// ============================================================================

/// The output directory of a run. Removed on drop unless committed.
struct OutputDir {
    path: PathBuf,
    committed: bool,
}

impl OutputDir {
    fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(Error::OutputExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => Error::OutputExists(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Ok(Self { path: path.to_path_buf(), committed: false })
    }

    fn temp_dir(&mut self) -> Result<PathBuf> {
        let temp = self.path.join(TEMP_DIR);
        fs::create_dir_all(&temp)?;
        Ok(temp)
    }

    /// Move every part file out of `_temporary` and mark success.
    fn commit(&mut self, parts: usize) -> Result<Vec<PathBuf>> {
        let temp = self.path.join(TEMP_DIR);
        let mut files = Vec::with_capacity(parts);
        for index in 0..parts {
            let name = part_name(index);
            let target = self.path.join(&name);
            fs::rename(temp.join(&name), &target)
                .map_err(|e| Error::Output(format!("cannot commit {name}: {e}")))?;
            files.push(target);
        }
        fs::remove_dir_all(&temp)?;
        File::create(self.path.join(SUCCESS_MARKER))?;
        self.committed = true;
        Ok(files)
    }
}

impl Drop for OutputDir {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.path) {
            warn!(output = %self.path.display(), error = %e, "cannot remove uncommitted output");
        }
    }
}

/// Closes the lexicon when the run ends.
struct CloseOnDrop<'a, L: Lexicon>(&'a L);

impl<L: Lexicon> Drop for CloseOnDrop<'_, L> {
    fn drop(&mut self) {
        if let Err(e) = self.0.close() {
            warn!(error = %e, "closing lexicon failed");
        }
    }
}
