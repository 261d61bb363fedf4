use super::format;
use crate::core::models::dict::{AtomDict, ModelDict, PdbDict};
use crate::core::record::{Record, RecordError};
use thiserror::Error;
use tracing::{debug, trace};

/// Title characters carried by the first `TITLE` line (columns 11-80).
pub const TITLE_FIRST_WIDTH: usize = 70;
/// Title characters carried by each continuation line (columns 12-80).
pub const TITLE_CONTINUATION_WIDTH: usize = 69;
/// Bonded atoms listed per `CONECT` line.
pub const BONDS_PER_CONECT: usize = 4;
const MAX_CONTINUATION: usize = 99;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PackError {
    #[error("Value '{value}' does not fit the {width}-column {field} field")]
    FieldOverflow {
        field: &'static str,
        width: usize,
        value: String,
    },
    #[error("Invalid line produced: {0}")]
    Record(#[from] RecordError),
}

/// Pads a packed line to the full record width, validating it on the way.
fn finish_line(line: &str) -> Result<String, PackError> {
    Ok(Record::new(line)?.padded().into_owned())
}

/// Formats one `ATOM` (or, with `hetero`, `HETATM`) line, padded to 80 columns.
///
/// # Errors
///
/// Returns [`PackError::FieldOverflow`] if any value is wider than its field.
pub fn atom_dict_to_atom_line(atom: &AtomDict, hetero: bool) -> Result<String, PackError> {
    let record_name = if hetero { "HETATM" } else { "ATOM" };
    let line = format!(
        "{:<6}{} {}{}{} {}{}{}   {}{}{}{}{}          {}{}",
        record_name,
        format::integer("atom id", atom.atom_id, format::SERIAL_WIDTH)?,
        format::atom_name(atom.atom_name.as_deref())?,
        format::flag(atom.alt_loc),
        format::text(
            "residue name",
            atom.residue_name.as_deref(),
            format::RESIDUE_NAME_WIDTH
        )?,
        format::flag(atom.chain_id),
        format::integer("residue id", atom.residue_id, format::RESIDUE_SEQ_WIDTH)?,
        format::flag(atom.insert_code),
        format::coordinate("x", atom.x)?,
        format::coordinate("y", atom.y)?,
        format::coordinate("z", atom.z)?,
        format::occupancy(atom.occupancy)?,
        format::temp_factor(atom.temp_factor)?,
        format::text("element", atom.element.as_deref(), format::ELEMENT_WIDTH)?,
        format::charge(atom.charge)?,
    );
    finish_line(&line)
}

/// Splits a title into `TITLE` line fragments: one wide first chunk followed
/// by narrower continuation chunks. The split ignores word boundaries.
fn title_chunks(title: &str) -> Vec<String> {
    let chars: Vec<char> = title.chars().collect();
    let first = chars.len().min(TITLE_FIRST_WIDTH);
    let mut chunks = vec![chars[..first].iter().collect::<String>()];
    chunks.extend(
        chars[first..]
            .chunks(TITLE_CONTINUATION_WIDTH)
            .map(|chunk| chunk.iter().collect::<String>()),
    );
    chunks
}

/// Builds the lines of a PDB file into an owned buffer.
///
/// Lines are only ever appended. Every line in the buffer is exactly 80
/// columns wide. When a packing call fails, the lines appended before the
/// failure stay in the buffer.
#[derive(Debug, Clone, Default)]
pub struct LinePacker {
    lines: Vec<String>,
}

impl LinePacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends arbitrary lines, padding each to 80 columns.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Record`] for a line that is not a valid record; the
    /// lines before it are kept.
    pub fn append_lines<I, S>(&mut self, lines: I) -> Result<&mut Self, PackError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.lines.push(finish_line(line.as_ref())?);
        }
        Ok(self)
    }

    /// Packs the `HEADER` and `TITLE` records.
    ///
    /// `HEADER` is written only when a deposition date or a code is present;
    /// `TITLE` lines only when a title is present.
    pub fn pack_header(&mut self, pdb: &PdbDict) -> Result<&mut Self, PackError> {
        let code = pdb.code.as_deref().filter(|c| !c.trim().is_empty());
        if pdb.deposition_date.is_some() || code.is_some() {
            let code = format::left("code", code.unwrap_or(""), format::CODE_WIDTH)?;
            let line = format!(
                "HEADER{}{}   {}",
                " ".repeat(44),
                format::date(pdb.deposition_date),
                code
            );
            self.append_lines([line])?;
        }

        if let Some(title) = pdb.title.as_deref().filter(|t| !t.trim().is_empty()) {
            for (index, chunk) in title_chunks(title).into_iter().enumerate() {
                let line = if index == 0 {
                    format!("TITLE     {}", chunk)
                } else {
                    let continuation = index + 1;
                    if continuation > MAX_CONTINUATION {
                        return Err(PackError::FieldOverflow {
                            field: "title continuation",
                            width: 2,
                            value: continuation.to_string(),
                        });
                    }
                    format!("TITLE   {:>2} {}", continuation, chunk)
                };
                self.append_lines([line])?;
            }
        }
        Ok(self)
    }

    /// Packs the atoms of one model.
    ///
    /// Chain atoms are written as `ATOM` lines, then molecule atoms as `HETATM`
    /// lines. Unless `sole` is set, the atoms are wrapped in bare
    /// `MODEL`/`ENDMDL` records.
    pub fn pack_model(&mut self, model: &ModelDict, sole: bool) -> Result<&mut Self, PackError> {
        if !sole {
            self.append_lines(["MODEL"])?;
        }
        for (atom, hetero) in model.atoms() {
            trace!(atom_id = ?atom.atom_id, hetero, "Packing atom line.");
            self.lines.push(atom_dict_to_atom_line(atom, hetero)?);
        }
        if !sole {
            self.append_lines(["ENDMDL"])?;
        }
        Ok(self)
    }

    /// Packs `CONECT` records, four bonded atoms per line.
    ///
    /// A connection with more bonds continues on further lines that repeat the
    /// source atom id. Connections are written in the order given.
    pub fn pack_connections(&mut self, pdb: &PdbDict) -> Result<&mut Self, PackError> {
        for connection in &pdb.connections {
            let atom = format::integer("atom id", Some(connection.atom), format::SERIAL_WIDTH)?;
            for group in connection.bond_to.chunks(BONDS_PER_CONECT) {
                let mut line = format!("CONECT{}", atom);
                for &bonded in group {
                    line.push_str(&format::integer(
                        "bonded atom id",
                        Some(bonded),
                        format::SERIAL_WIDTH,
                    )?);
                }
                self.append_lines([line])?;
            }
        }
        Ok(self)
    }

    /// Packs a whole dictionary: header, every model, then connections.
    ///
    /// A single model is written without `MODEL`/`ENDMDL` wrapping.
    pub fn pack_structure(&mut self, pdb: &PdbDict) -> Result<&mut Self, PackError> {
        self.pack_header(pdb)?;
        let sole = pdb.models.len() == 1;
        for (index, model) in pdb.models.iter().enumerate() {
            debug!(model = index + 1, sole, "Packing model.");
            self.pack_model(model, sole)?;
        }
        self.pack_connections(pdb)?;
        debug!(lines = self.lines.len(), "Packed PDB structure.");
        Ok(self)
    }
}
