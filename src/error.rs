use std::path::PathBuf;

use thiserror::Error;

/// Failures while computing a derived chart from a dataset collection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("No data available to compute '{0}'")]
    NoData(String),

    #[error("Dataset is missing attribute '{0}'")]
    MissingAttribute(String),

    #[error("Dataset is missing column '{0}'")]
    MissingColumn(String),

    #[error("Invalid update rate: {0} (must be positive)")]
    InvalidRate(f64),
}

/// Failures while assembling a dashboard tab.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    #[error("Missing attribute '{key}' on first dataset ({datasets} datasets given)")]
    MissingAttribute { key: String, datasets: usize },

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' has no header line")]
    EmptyFile(PathBuf),

    #[error("{path}:{line}: cannot parse '{value}' as a number")]
    Parse {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("{path}:{line}: expected {expected} cells, found {found}")]
    RowWidth {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid YAML in '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("'{path}' is missing key '{key}'")]
    MissingKey { path: PathBuf, key: String },

    #[error("'{path}' has an invalid value for '{key}'")]
    InvalidValue { path: PathBuf, key: String },

    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
