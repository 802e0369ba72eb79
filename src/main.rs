//! wordnet-linker command-line driver.
//!
//! ```text
//! wordnet-linker <INPUT> <OUTPUT> [--dict DIR | --snapshot FILE] [--config FILE] ...
//! ```
//!
//! Reads candidate headwords (one per line) from INPUT and writes one
//! `headword<TAB>target|KIND,...` line per linked headword into OUTPUT,
//! which must not exist yet.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use wordnet_linker::{Linker, LexiconConfig, OutputFormat, PipelineConfig, ShuffleOrder};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Tsv,
    Cypher,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Tsv => OutputFormat::Tsv,
            Format::Cypher => OutputFormat::Cypher,
        }
    }
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[clap(name = "wordnet-linker", about = "Links WordNet headwords through glosses and pointers")]
struct Args {
    /// Input file or directory of candidate headwords.
    input: PathBuf,

    /// Output directory. Must not exist.
    output: PathBuf,

    /// WordNet database directory (index.* / data.* files).
    #[clap(long, env = "WORDNET_DICT", default_value = "/app/wordnet_data/")]
    dict: PathBuf,

    /// Load a JSON lexicon snapshot instead of the WordNet directory.
    #[clap(long)]
    snapshot: Option<PathBuf>,

    /// JSON pipeline configuration file.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Worker threads (0 = one per CPU).
    #[clap(long)]
    workers: Option<usize>,

    /// Reduce partitions / output part files.
    #[clap(long)]
    reducers: Option<usize>,

    /// Attempts per task before the job fails.
    #[clap(long)]
    max_attempts: Option<u32>,

    /// Sort each headword's links by (kind, target).
    #[clap(long)]
    sorted: bool,

    /// Output format.
    #[clap(long, value_enum)]
    format: Option<Format>,
}

impl Args {
    fn pipeline_config(&self) -> wordnet_linker::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(reducers) = self.reducers {
            config.reducers = reducers;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if self.sorted {
            config.shuffle_order = ShuffleOrder::Sorted;
        }
        if let Some(format) = self.format {
            config.output_format = format.into();
        }
        config.validate()?;
        Ok(config)
    }

    fn lexicon_config(&self) -> LexiconConfig {
        match &self.snapshot {
            Some(path) => LexiconConfig::Snapshot(path.clone()),
            None => LexiconConfig::Wndb(self.dict.clone()),
        }
    }
}

fn run(args: &Args) -> wordnet_linker::Result<()> {
    let config = args.pipeline_config()?;
    let linker = Linker::open(&args.lexicon_config())?;
    let summary = linker.into_pipeline(config).run(&args.input, &args.output)?;
    info!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
