//! Pipeline configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Order of edges inside one headword's group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleOrder {
    /// Input-line order, then extractor order.
    #[default]
    Emission,
    /// Stable sort by (relation kind name, target).
    Sorted,
}

/// Format of the part files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `headword<TAB>target|KIND,...`
    #[default]
    Tsv,
    /// Cypher MERGE statements, see `export`.
    Cypher,
}

/// Knobs of a local pipeline run. Every field has a default, so `{}` is a
/// valid config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Worker threads for both stages. 0 means one per CPU.
    pub workers: usize,
    /// Reduce partitions, one part file each.
    pub reducers: usize,
    /// Attempts per task before the job fails.
    pub max_attempts: u32,
    pub shuffle_order: ShuffleOrder,
    pub output_format: OutputFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            reducers: 1,
            max_attempts: 4,
            shuffle_order: ShuffleOrder::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::Config(format!("cannot open {}: {e}", path.display())))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reducers == 0 {
            return Err(Error::Config("reducers must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}
