//! Decoding of PDB text into a [`PdbDict`].
//!
//! Only the records the packer writes are interpreted (`HEADER`, `TITLE`,
//! `MODEL`, `ENDMDL`, `ATOM`, `HETATM`, `CONECT`); everything else is skipped.
//! Field decoding goes through [`Record`] slicing, so malformed numbers never
//! abort a read: they simply decode to an absent value.

use crate::core::models::dict::{
    AtomDict, ChainDict, ConnectionDict, ModelDict, MoleculeDict, PdbDict, ResidueDict,
};
use crate::core::record::{LINE_WIDTH, Record, RecordError};
use crate::core::utils::dates::parse_pdb_date;
use thiserror::Error;
use tracing::{debug, warn};

const TITLE_FIRST_START: usize = 10;
const TITLE_CONTINUATION_START: usize = 11;
const CONECT_BOND_COLUMNS: [(usize, usize); 4] = [(11, 16), (16, 21), (21, 26), (26, 31)];
const BONDS_PER_CONECT: usize = CONECT_BOND_COLUMNS.len();

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReadError {
    #[error("Invalid record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
}

/// Splits file text into records, accepting `\n` and `\r\n` terminators.
///
/// Trailing whitespace is dropped before the 80-column check.
pub fn string_to_records(text: &str) -> Result<Vec<Record>, ReadError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| {
            Record::new(line.trim_end()).map_err(|source| ReadError::Record {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Decodes PDB text into a dictionary.
///
/// # Errors
///
/// Returns [`ReadError`] if a line is not a valid record (too long or not
/// plain text). Field contents never cause an error.
pub fn pdb_string_to_pdb_dict(text: &str) -> Result<PdbDict, ReadError> {
    let records = string_to_records(text)?;
    Ok(records_to_pdb_dict(&records))
}

/// Decodes already split records into a dictionary.
pub fn records_to_pdb_dict(records: &[Record]) -> PdbDict {
    let mut builder = DictBuilder::default();
    for record in records {
        match record.name() {
            "HEADER" => builder.header(record),
            "TITLE" => builder.title(record),
            "MODEL" => builder.start_model(),
            "ENDMDL" => builder.end_model(),
            "ATOM" => builder.atom(record, false),
            "HETATM" => builder.atom(record, true),
            "CONECT" => builder.connection(record),
            _ => {}
        }
    }
    let pdb = builder.finish();
    debug!(
        models = pdb.models.len(),
        atoms = pdb.atom_count(),
        connections = pdb.connections.len(),
        "Decoded PDB records."
    );
    pdb
}

/// Decodes the fields of an `ATOM`/`HETATM` record.
pub fn atom_line_to_atom_dict(record: &Record) -> AtomDict {
    AtomDict {
        atom_id: record.field(6..11).as_int(),
        atom_name: record.raw_opt(12..16).map(str::to_string),
        alt_loc: record.raw_column(16),
        residue_name: record.raw_opt(17..20).map(str::to_string),
        chain_id: record.raw_column(21),
        residue_id: record.field(22..26).as_int(),
        insert_code: record.raw_column(26),
        x: record.field(30..38).as_float(),
        y: record.field(38..46).as_float(),
        z: record.field(46..54).as_float(),
        occupancy: record.field(54..60).as_float().unwrap_or(1.0),
        temp_factor: record.field(60..66).as_float(),
        element: record.raw_opt(76..78).map(str::to_string),
        charge: parse_charge(record.raw(78..80)),
    }
}

/// Reads a formal charge written as `2-`/`1+` (or the signed `-2`/`+1`).
fn parse_charge(text: &str) -> i32 {
    let (digits, negative) = match text.as_bytes() {
        [digit @ b'0'..=b'9', b'-'] | [b'-', digit @ b'0'..=b'9'] => (*digit, true),
        [digit @ b'0'..=b'9', b'+'] | [b'+', digit @ b'0'..=b'9'] => (*digit, false),
        [digit @ b'0'..=b'9'] => (*digit, false),
        _ => return 0,
    };
    let magnitude = i32::from(digits - b'0');
    if negative { -magnitude } else { magnitude }
}

#[derive(Default)]
struct DictBuilder {
    pdb: PdbDict,
    title_fragments: Vec<String>,
    current_model: Option<ModelDict>,
    /// Set while the last `CONECT` line was full, so a following line for
    /// the same atom continues it.
    connection_continues: bool,
}

impl DictBuilder {
    fn header(&mut self, record: &Record) {
        self.pdb.deposition_date = parse_pdb_date(record.raw(50..59));
        self.pdb.code = record.raw_opt(62..66).map(str::to_string);
    }

    fn title(&mut self, record: &Record) {
        let start = if record.raw_opt(8..10).is_some() {
            TITLE_CONTINUATION_START
        } else {
            TITLE_FIRST_START
        };
        let padded = record.padded();
        self.title_fragments.push(padded[start..LINE_WIDTH].to_string());
    }

    fn start_model(&mut self) {
        if let Some(model) = self.current_model.take() {
            self.pdb.models.push(model);
        }
        self.current_model = Some(ModelDict::default());
    }

    fn end_model(&mut self) {
        if let Some(model) = self.current_model.take() {
            self.pdb.models.push(model);
        }
    }

    fn atom(&mut self, record: &Record, hetero: bool) {
        let atom = atom_line_to_atom_dict(record);
        let model = self.current_model.get_or_insert_with(ModelDict::default);
        if hetero {
            add_molecule_atom(model, atom);
        } else {
            add_polymer_atom(model, atom);
        }
    }

    fn connection(&mut self, record: &Record) {
        let Some(atom) = record.field(6..11).as_int() else {
            warn!(record = %record, "Skipping CONECT record without a source atom id.");
            self.connection_continues = false;
            return;
        };
        let bonds: Vec<i64> = CONECT_BOND_COLUMNS
            .iter()
            .filter_map(|&(start, end)| record.field(start..end).as_int())
            .collect();
        let full = bonds.len() == BONDS_PER_CONECT;

        let connections = &mut self.pdb.connections;
        match connections.last_mut() {
            Some(last) if self.connection_continues && last.atom == atom => {
                last.bond_to.extend(bonds);
            }
            _ => connections.push(ConnectionDict {
                atom,
                bond_to: bonds,
            }),
        }
        self.connection_continues = full;
    }

    fn finish(mut self) -> PdbDict {
        if let Some(model) = self.current_model.take() {
            self.pdb.models.push(model);
        }
        self.pdb.title = join_title(&self.title_fragments);
        self.pdb
    }
}

/// Joins `TITLE` fragments at their full field width and drops the trailing
/// padding of the whole title.
///
/// Every fragment but the last is kept verbatim, spaces included, which is
/// the exact inverse of the packer's fixed-width chunking.
fn join_title(fragments: &[String]) -> Option<String> {
    let title = fragments.concat();
    let title = title.trim_end();
    (!title.trim().is_empty()).then(|| title.to_string())
}

fn add_polymer_atom(model: &mut ModelDict, atom: AtomDict) {
    if model
        .chains
        .last()
        .is_none_or(|chain| chain.chain_id != atom.chain_id)
    {
        model.chains.push(ChainDict {
            chain_id: atom.chain_id,
            residues: Vec::new(),
        });
    }
    let Some(chain) = model.chains.last_mut() else {
        return;
    };

    let same_residue = |residue: &ResidueDict| {
        residue.residue_id == atom.residue_id
            && residue.insert_code == atom.insert_code
            && residue.residue_name == atom.residue_name
    };
    if !chain.residues.last().is_some_and(same_residue) {
        chain.residues.push(ResidueDict {
            residue_id: atom.residue_id,
            insert_code: atom.insert_code,
            residue_name: atom.residue_name.clone(),
            atoms: Vec::new(),
        });
    }
    if let Some(residue) = chain.residues.last_mut() {
        residue.atoms.push(atom);
    }
}

fn add_molecule_atom(model: &mut ModelDict, atom: AtomDict) {
    let same_molecule = |molecule: &MoleculeDict| {
        molecule.chain_id == atom.chain_id
            && molecule.molecule_id == atom.residue_id
            && molecule.insert_code == atom.insert_code
            && molecule.molecule_name == atom.residue_name
    };
    if !model.molecules.last().is_some_and(same_molecule) {
        model.molecules.push(MoleculeDict {
            molecule_id: atom.residue_id,
            insert_code: atom.insert_code,
            molecule_name: atom.residue_name.clone(),
            chain_id: atom.chain_id,
            atoms: Vec::new(),
        });
    }
    if let Some(molecule) = model.molecules.last_mut() {
        molecule.atoms.push(atom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::aggregator::pdb_dict_to_pdb_string;
    use chrono::NaiveDate;

    fn atom(id: i64, name: &str, res_name: &str, chain: char, res_id: i64) -> AtomDict {
        AtomDict {
            atom_id: Some(id),
            atom_name: Some(name.into()),
            residue_name: Some(res_name.into()),
            chain_id: Some(chain),
            residue_id: Some(res_id),
            x: Some(id as f64 * 1.5),
            y: Some(-(id as f64) / 4.0),
            z: Some(0.125),
            temp_factor: Some(20.0),
            element: Some(name[..1].into()),
            ..Default::default()
        }
    }

    fn residue(atoms: Vec<AtomDict>) -> ResidueDict {
        ResidueDict {
            residue_id: atoms[0].residue_id,
            insert_code: atoms[0].insert_code,
            residue_name: atoms[0].residue_name.clone(),
            atoms,
        }
    }

    fn molecule(atoms: Vec<AtomDict>) -> MoleculeDict {
        MoleculeDict {
            molecule_id: atoms[0].residue_id,
            insert_code: atoms[0].insert_code,
            molecule_name: atoms[0].residue_name.clone(),
            chain_id: atoms[0].chain_id,
            atoms,
        }
    }

    fn model(offset: i64) -> ModelDict {
        let mut ca = atom(offset + 2, "CA", "GLY", 'A', 1);
        ca.alt_loc = Some('A');
        ca.occupancy = 0.5;
        let mut hcg2 = atom(offset + 3, "HCG2", "VAL", 'A', 2);
        hcg2.insert_code = Some('B');
        let mut zn = atom(offset + 5, "ZN", "ZN", 'B', 101);
        zn.charge = 2;
        let mut o = atom(offset + 6, "O", "HOH", 'B', 102);
        o.charge = -1;
        ModelDict {
            chains: vec![
                ChainDict {
                    chain_id: Some('A'),
                    residues: vec![
                        residue(vec![atom(offset + 1, "N", "GLY", 'A', 1), ca]),
                        residue(vec![hcg2]),
                    ],
                },
                ChainDict {
                    chain_id: Some('B'),
                    residues: vec![residue(vec![atom(offset + 4, "N", "SER", 'B', 1)])],
                },
            ],
            molecules: vec![molecule(vec![zn]), molecule(vec![o])],
        }
    }

    fn full_dict() -> PdbDict {
        PdbDict {
            deposition_date: NaiveDate::from_ymd_opt(1990, 9, 1),
            code: Some("1XYZ".into()),
            title: Some("ABC".repeat(40)),
            models: vec![model(0), model(100)],
            connections: vec![
                ConnectionDict {
                    atom: 5,
                    bond_to: vec![1, 2, 3, 4, 6, 999],
                },
                ConnectionDict {
                    atom: 6,
                    bond_to: vec![5],
                },
            ],
        }
    }

    #[test]
    fn string_to_records_accepts_crlf_and_reports_bad_lines() {
        let records = string_to_records("HEADER\r\nEND   \r\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text(), "END");

        let err = string_to_records(&format!("END\n{}", "X".repeat(81))).unwrap_err();
        assert!(matches!(err, ReadError::Record { line: 2, .. }));
    }

    #[test]
    fn atom_line_decodes_every_field() {
        let record = Record::new(concat!(
            "ATOM    107  N  AGLY B  13C   ",
            "  12.681  37.302 -25.211",
            "  0.50 15.56           N2-"
        ))
        .unwrap();
        let atom = atom_line_to_atom_dict(&record);
        assert_eq!(atom.atom_id, Some(107));
        assert_eq!(atom.atom_name.as_deref(), Some("N"));
        assert_eq!(atom.alt_loc, Some('A'));
        assert_eq!(atom.residue_name.as_deref(), Some("GLY"));
        assert_eq!(atom.chain_id, Some('B'));
        assert_eq!(atom.residue_id, Some(13));
        assert_eq!(atom.insert_code, Some('C'));
        assert_eq!(atom.x, Some(12.681));
        assert_eq!(atom.y, Some(37.302));
        assert_eq!(atom.z, Some(-25.211));
        assert_eq!(atom.occupancy, 0.5);
        assert_eq!(atom.temp_factor, Some(15.56));
        assert_eq!(atom.element.as_deref(), Some("N"));
        assert_eq!(atom.charge, -2);
    }

    #[test]
    fn bare_atom_line_decodes_to_defaults() {
        let atom = atom_line_to_atom_dict(&Record::new("ATOM").unwrap());
        assert_eq!(atom, AtomDict::default());
    }

    #[test]
    fn malformed_numbers_decode_to_absent_values() {
        let record = Record::new(
            "ATOM    abc  CA  ALA A  xx       1.2.3   2.000   3.000  n/a                    C",
        )
        .unwrap();
        let atom = atom_line_to_atom_dict(&record);
        assert_eq!(atom.atom_id, None);
        assert_eq!(atom.residue_id, None);
        assert_eq!(atom.x, None);
        assert_eq!(atom.y, Some(2.0));
        assert_eq!(atom.occupancy, 1.0);
    }

    #[test]
    fn charge_accepts_both_sign_positions() {
        assert_eq!(parse_charge("2-"), -2);
        assert_eq!(parse_charge("-2"), -2);
        assert_eq!(parse_charge("1+"), 1);
        assert_eq!(parse_charge("+3"), 3);
        assert_eq!(parse_charge("1"), 1);
        assert_eq!(parse_charge(""), 0);
        assert_eq!(parse_charge("x-"), 0);
    }

    #[test]
    fn header_and_title_are_decoded() {
        let text = format!(
            "HEADER{}01-SEP-90   1XYZ\nTITLE     {}A\nTITLE    2 BC{}",
            " ".repeat(44),
            "ABC".repeat(23),
            "ABC".repeat(16)
        );
        let pdb = pdb_string_to_pdb_dict(&text).unwrap();
        assert_eq!(pdb.deposition_date, NaiveDate::from_ymd_opt(1990, 9, 1));
        assert_eq!(pdb.code.as_deref(), Some("1XYZ"));
        assert_eq!(pdb.title, Some("ABC".repeat(40)));
    }

    #[test]
    fn title_fragments_keep_their_full_field_width() {
        let text = "TITLE     CRYSTAL STRUCTURE OF\nTITLE    2 A PROTEIN   \n";
        let pdb = pdb_string_to_pdb_dict(text).unwrap();
        let expected = format!("{:<70}A PROTEIN", "CRYSTAL STRUCTURE OF");
        assert_eq!(pdb.title, Some(expected));
    }

    #[test]
    fn blank_title_lines_decode_to_no_title() {
        let pdb = pdb_string_to_pdb_dict("TITLE\nTITLE    2   \n").unwrap();
        assert_eq!(pdb.title, None);
    }

    #[test]
    fn atoms_outside_models_form_one_implicit_model() {
        let text = "\
REMARK   2 RESOLUTION.    1.90 ANGSTROMS.
ATOM      1  N   GLY A   1      -6.778  -1.424   4.200  1.00  8.76           N
ATOM      2  CA  GLY A   1      -6.453  -0.728   2.967  1.00  8.45           C
ATOM      3  N   ALA A   2      -5.000  -1.000   2.000  1.00  8.00           N
TER       4      ALA A   2
ATOM      5  N   SER B   1       1.000   1.000   1.000  1.00  9.00           N
HETATM    6 ZN    ZN B 101       2.000   2.000   2.000  1.00 10.00          ZN2+
HETATM    7  O   HOH B 201       3.000   3.000   3.000  1.00 11.00           O
HETATM    8  O   HOH B 202       4.000   4.000   4.000  1.00 12.00           O
END
";
        let pdb = pdb_string_to_pdb_dict(text).unwrap();
        assert_eq!(pdb.models.len(), 1);
        let model = &pdb.models[0];
        assert_eq!(model.chains.len(), 2);
        assert_eq!(model.chains[0].chain_id, Some('A'));
        assert_eq!(model.chains[0].residues.len(), 2);
        assert_eq!(model.chains[0].residues[0].atoms.len(), 2);
        assert_eq!(model.chains[1].residues[0].residue_name.as_deref(), Some("SER"));
        assert_eq!(model.molecules.len(), 3);
        assert_eq!(model.molecules[0].molecule_name.as_deref(), Some("ZN"));
        assert_eq!(model.molecules[0].atoms[0].charge, 2);
        assert_eq!(model.molecules[2].molecule_id, Some(202));
        assert!(pdb.title.is_none());
        assert!(pdb.code.is_none());
    }

    #[test]
    fn model_blocks_become_separate_models() {
        let text = "\
MODEL        1
ATOM      1  N   GLY A   1       0.000   0.000   0.000
ENDMDL
MODEL        2
ATOM      1  N   GLY A   1       1.000   0.000   0.000
ATOM      2  CA  GLY A   1       2.000   0.000   0.000
ENDMDL
";
        let pdb = pdb_string_to_pdb_dict(text).unwrap();
        assert_eq!(pdb.models.len(), 2);
        assert_eq!(pdb.models[0].atom_count(), 1);
        assert_eq!(pdb.models[1].atom_count(), 2);
        assert_eq!(pdb.models[1].chains[0].residues[0].atoms[0].x, Some(1.0));
    }

    #[test]
    fn full_conect_line_continues_into_the_next_for_the_same_atom() {
        let text = "\
CONECT 1179  746 1184 1195 1203
CONECT 1179 1211 1222
CONECT 1221  544 1017 1020 1022
CONECT
";
        let pdb = pdb_string_to_pdb_dict(text).unwrap();
        assert_eq!(
            pdb.connections,
            vec![
                ConnectionDict {
                    atom: 1179,
                    bond_to: vec![746, 1184, 1195, 1203, 1211, 1222],
                },
                ConnectionDict {
                    atom: 1221,
                    bond_to: vec![544, 1017, 1020, 1022],
                },
            ]
        );
    }

    #[test]
    fn conect_lines_after_a_short_line_start_a_new_connection() {
        let text = "\
CONECT    1    2
CONECT    1    3
CONECT    1    4    5    6    7
CONECT    1    8
CONECT    2    1
CONECT    1    9
";
        let pdb = pdb_string_to_pdb_dict(text).unwrap();
        let bonds: Vec<(i64, Vec<i64>)> = pdb
            .connections
            .into_iter()
            .map(|c| (c.atom, c.bond_to))
            .collect();
        assert_eq!(
            bonds,
            vec![
                (1, vec![2]),
                (1, vec![3]),
                (1, vec![4, 5, 6, 7, 8]),
                (2, vec![1]),
                (1, vec![9]),
            ]
        );
    }

    #[test]
    fn decoding_packed_text_restores_the_dictionary() {
        let pdb = full_dict();
        let text = pdb_dict_to_pdb_string(&pdb).unwrap();
        assert_eq!(pdb_string_to_pdb_dict(&text).unwrap(), pdb);
    }

    #[test]
    fn repacking_decoded_text_is_byte_identical() {
        let first = pdb_dict_to_pdb_string(&full_dict()).unwrap();
        let second = pdb_dict_to_pdb_string(&pdb_string_to_pdb_dict(&first).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(first.lines().all(|line| line.len() == LINE_WIDTH));

        let mut sole = full_dict();
        sole.models.truncate(1);
        let first = pdb_dict_to_pdb_string(&sole).unwrap();
        let second = pdb_dict_to_pdb_string(&pdb_string_to_pdb_dict(&first).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(!first.contains("MODEL"));
    }

    fn assert_repack_is_stable(pdb: &PdbDict) -> String {
        let first = pdb_dict_to_pdb_string(pdb).unwrap();
        let second = pdb_dict_to_pdb_string(&pdb_string_to_pdb_dict(&first).unwrap()).unwrap();
        assert_eq!(first, second);
        first
    }

    fn one_atom(atom: AtomDict) -> PdbDict {
        PdbDict {
            models: vec![ModelDict {
                chains: vec![ChainDict {
                    chain_id: atom.chain_id,
                    residues: vec![residue(vec![atom])],
                }],
                molecules: Vec::new(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn occupancy_rounding_to_one_repacks_identically() {
        for occupancy in [0.999, 0.9951, 1.004, 0.994] {
            let mut ca = atom(1, "CA", "GLY", 'A', 1);
            ca.occupancy = occupancy;
            assert_repack_is_stable(&one_atom(ca));
        }
        let mut ca = atom(1, "CA", "GLY", 'A', 1);
        ca.occupancy = 0.999;
        let text = assert_repack_is_stable(&one_atom(ca));
        assert_eq!(&text[54..60], "      ");
    }

    #[test]
    fn repeated_connection_sources_repack_identically() {
        let pdb = PdbDict {
            connections: vec![
                ConnectionDict {
                    atom: 1,
                    bond_to: vec![2],
                },
                ConnectionDict {
                    atom: 1,
                    bond_to: vec![3],
                },
            ],
            ..Default::default()
        };
        let text = assert_repack_is_stable(&pdb);
        assert_eq!(text.lines().count(), 2);
        assert_eq!(pdb_string_to_pdb_dict(&text).unwrap(), pdb);
    }

    #[test]
    fn whitespace_at_a_title_line_boundary_repacks_identically() {
        let title = format!("{}  {}", "A".repeat(68), "B".repeat(10));
        let pdb = PdbDict {
            title: Some(title.clone()),
            ..Default::default()
        };
        let text = assert_repack_is_stable(&pdb);
        assert!(text.lines().next().unwrap().ends_with("AA  "));
        assert_eq!(pdb_string_to_pdb_dict(&text).unwrap().title, Some(title));
    }

    #[test]
    fn blank_header_fields_repack_identically() {
        let pdb = PdbDict {
            code: Some("   ".into()),
            title: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(assert_repack_is_stable(&pdb), "");

        let pdb = PdbDict {
            deposition_date: NaiveDate::from_ymd_opt(2001, 2, 3),
            code: Some(String::new()),
            ..Default::default()
        };
        let text = assert_repack_is_stable(&pdb);
        assert_eq!(pdb_string_to_pdb_dict(&text).unwrap().code, None);
    }
}
