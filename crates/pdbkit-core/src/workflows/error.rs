use crate::core::io::packer::PackError;
use crate::core::io::reader::ReadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to decode input: {source}")]
    Read {
        #[from]
        source: ReadError,
    },

    #[error("Failed to pack structure: {source}")]
    Pack {
        #[from]
        source: PackError,
    },
}
