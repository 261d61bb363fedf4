use crate::core::io::aggregator::pdb_dict_to_pdb_string_with;
use crate::core::io::config::WriteConfig;
use crate::core::io::packer::PackError;
use crate::core::io::reader::{ReadError, pdb_string_to_pdb_dict};
use crate::core::io::traits::StructureFile;
use crate::core::models::dict::PdbDict;
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Read error: {0}")]
    Read(#[from] ReadError),
    #[error("Pack error: {0}")]
    Pack(#[from] PackError),
}

/// The fixed-column PDB text format.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<PdbDict, Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(pdb_string_to_pdb_dict(&text)?)
    }

    fn write_to(
        pdb: &PdbDict,
        config: &WriteConfig,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let text = pdb_dict_to_pdb_string_with(pdb, config)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }
}
