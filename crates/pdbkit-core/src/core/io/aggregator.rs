use super::config::{LineEnding, WriteConfig};
use super::packer::{LinePacker, PackError};
use crate::core::models::dict::PdbDict;
use tracing::instrument;

/// Joins packed lines into file text, with no terminator after the last line.
pub fn lines_to_string<S: AsRef<str>>(lines: &[S], ending: LineEnding) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(ending.as_str())
}

/// Packs a whole dictionary into PDB text using the default [`WriteConfig`].
///
/// # Errors
///
/// Returns [`PackError`] as soon as one entry cannot be packed.
pub fn pdb_dict_to_pdb_string(pdb: &PdbDict) -> Result<String, PackError> {
    pdb_dict_to_pdb_string_with(pdb, &WriteConfig::default())
}

/// Packs a whole dictionary into PDB text: header, models, connections and,
/// if configured, a closing `END` record.
#[instrument(skip_all, fields(models = pdb.models.len()))]
pub fn pdb_dict_to_pdb_string_with(
    pdb: &PdbDict,
    config: &WriteConfig,
) -> Result<String, PackError> {
    let mut packer = LinePacker::new();
    packer.pack_structure(pdb)?;
    if config.end_record {
        packer.append_lines(["END"])?;
    }
    Ok(lines_to_string(packer.lines(), config.line_ending))
}
