use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vinalchemy_generate::GenerateOptions;
use vinalchemy_generate::model::{DEFAULT_ROWS, DEFAULT_SEED};

pub const DEFAULT_OUT: &str = "wines.csv";
pub const DEFAULT_PREVIEW: usize = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub generate: GenerateSection,
}

/// `[generate]` table. Every key is optional; flags win over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    pub rows: Option<i64>,
    pub seed: Option<u64>,
    pub out: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub preview: Option<usize>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub rows: Option<i64>,
    pub seed: Option<u64>,
    pub out: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub as_of: Option<DateTime<Utc>>,
    pub preview: Option<usize>,
}

/// Fully resolved settings for one generate run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub options: GenerateOptions,
    pub out: PathBuf,
    pub report: Option<PathBuf>,
    pub preview: usize,
}

pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Merge flags over the file over built-in defaults. `now` is only used when
/// no `--as-of` was given.
pub fn resolve(overrides: Overrides, file: FileConfig, now: DateTime<Utc>) -> RunConfig {
    let section = file.generate;
    RunConfig {
        options: GenerateOptions {
            rows: overrides.rows.or(section.rows).unwrap_or(DEFAULT_ROWS),
            seed: overrides.seed.or(section.seed).unwrap_or(DEFAULT_SEED),
            as_of: overrides.as_of.unwrap_or(now),
        },
        out: overrides
            .out
            .or(section.out)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT)),
        report: overrides.report.or(section.report),
        preview: overrides
            .preview
            .or(section.preview)
            .unwrap_or(DEFAULT_PREVIEW),
    }
}
