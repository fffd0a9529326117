use std::path::PathBuf;

use thiserror::Error;

use crate::inline::SpanKind;

/// Failures raised while turning Markdown into HTML.
///
/// None of these are recoverable: a single bad block aborts the whole page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("invalid Markdown syntax: no matching closing delimiter for '{delimiter}'")]
    UnbalancedDelimiter { delimiter: String },

    #[error("leaf node must include a value")]
    MissingValue,

    #[error("container node must include a tag")]
    MissingTag,

    #[error("container node must have children")]
    MissingChildren,

    #[error("{kind} span requires a target URL")]
    MissingTarget { kind: SpanKind },

    #[error("invalid block type: {name}")]
    InvalidBlockType { name: String },

    #[error("no level-1 heading found to use as page title")]
    MissingTitle,
}

/// Errors that can occur while generating a site.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to convert {path}: {source}")]
    Convert {
        path: PathBuf,
        source: ConvertError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
