//! Configuration error type.

use std::fmt;
use std::path::PathBuf;

/// File system operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a config file.
    Read,
    /// Writing a config file.
    Write,
    /// Creating the directory that holds it.
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Everything that can go wrong while loading, saving, or checking a config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File system failure on `path`.
    #[error("cannot {op} '{}': {source}", path.display())]
    Io {
        /// What was being attempted.
        op: FileOp,
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid TOML for [`TanDistConfig`](crate::TanDistConfig).
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be encoded as TOML.
    #[error("cannot encode config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Parsed fine but a value is out of range.
    #[error("invalid config: {0}")]
    Invalid(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    pub(crate) fn io(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// The failed file operation, if this is an I/O error.
    pub fn file_op(&self) -> Option<FileOp> {
        match self {
            ConfigError::Io { op, .. } => Some(*op),
            _ => None,
        }
    }
}
