//! Fatal error taxonomy shared by the generators and the lookup tool.
//!
//! Library functions return `anyhow::Result`; these variants sit at the root
//! of the chain so binaries and tests can tell the failure classes apart with
//! `downcast_ref::<MetadataError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    /// No usable descriptor source or project root could be resolved.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A file exists but could not be read or decoded as JSON.
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A prerequisite file produced by an earlier step is absent.
    #[error("{what} not found at {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },
}

impl MetadataError {
    pub fn parse(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        MetadataError::Parse {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        MetadataError::NotFound {
            what,
            path: path.into(),
        }
    }
}
