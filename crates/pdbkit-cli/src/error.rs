use pdbkit::core::io::config::ConfigError;
use pdbkit::core::io::pdb::PdbError;
use pdbkit::workflows::error::WorkflowError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pdbkit(#[from] WorkflowError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<PdbError> for CliError {
    fn from(e: PdbError) -> Self {
        match e {
            PdbError::Io(source) => CliError::Io(source),
            PdbError::Read(source) => CliError::Pdbkit(WorkflowError::Read { source }),
            PdbError::Pack(source) => CliError::Pdbkit(WorkflowError::Pack { source }),
        }
    }
}

impl CliError {
    /// Attributes a decoding failure to the file at `path`.
    pub fn reading(path: &Path, e: PdbError) -> Self {
        match e {
            PdbError::Read(source) => CliError::FileParsing {
                path: path.to_path_buf(),
                source: source.into(),
            },
            other => other.into(),
        }
    }
}
