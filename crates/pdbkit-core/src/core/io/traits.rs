use crate::core::io::config::WriteConfig;
use crate::core::models::dict::PdbDict;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing structure file formats.
///
/// Implementors decode a stream into a [`PdbDict`] and encode a dictionary
/// back into a stream. The path-based helpers wrap the stream methods in
/// buffered file handles.
pub trait StructureFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure dictionary from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or a line is not a valid record.
    fn read_from(reader: &mut impl BufRead) -> Result<PdbDict, Self::Error>;

    /// Writes a structure dictionary to a writer.
    ///
    /// # Arguments
    ///
    /// * `pdb` - The dictionary to write.
    /// * `config` - Line terminator and `END` record options.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be packed or writing fails.
    fn write_to(
        pdb: &PdbDict,
        config: &WriteConfig,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a structure dictionary from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoding fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<PdbDict, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a structure dictionary to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        pdb: &PdbDict,
        config: &WriteConfig,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(pdb, config, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
