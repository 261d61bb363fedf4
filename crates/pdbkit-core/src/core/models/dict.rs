use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The structured form of a whole PDB file.
///
/// This is the intermediate representation between 80-column text and the
/// object graph in [`super::structure`]. Every part is optional so that a
/// partially populated dictionary can still be packed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdbDict {
    pub deposition_date: Option<NaiveDate>,
    pub code: Option<String>,
    pub title: Option<String>,
    pub models: Vec<ModelDict>,
    pub connections: Vec<ConnectionDict>,
}

impl PdbDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of atoms across all models.
    pub fn atom_count(&self) -> usize {
        self.models.iter().map(ModelDict::atom_count).sum()
    }

    /// Total number of bonds listed in the connections.
    pub fn bond_count(&self) -> usize {
        self.connections.iter().map(|c| c.bond_to.len()).sum()
    }
}

/// One coordinate set: polymer chains plus standalone (hetero) molecules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDict {
    pub chains: Vec<ChainDict>,
    pub molecules: Vec<MoleculeDict>,
}

impl ModelDict {
    /// Iterates atoms in packing order, paired with whether they are hetero atoms.
    ///
    /// Chain atoms come first (residue by residue), then molecule atoms.
    pub fn atoms(&self) -> impl Iterator<Item = (&AtomDict, bool)> {
        let polymer = self
            .chains
            .iter()
            .flat_map(|chain| chain.residues.iter())
            .flat_map(|residue| residue.atoms.iter())
            .map(|atom| (atom, false));
        let hetero = self
            .molecules
            .iter()
            .flat_map(|molecule| molecule.atoms.iter())
            .map(|atom| (atom, true));
        polymer.chain(hetero)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms().count()
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residues.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainDict {
    pub chain_id: Option<char>,
    pub residues: Vec<ResidueDict>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidueDict {
    pub residue_id: Option<i64>,
    pub insert_code: Option<char>,
    pub residue_name: Option<String>,
    pub atoms: Vec<AtomDict>,
}

/// A non-polymer molecule (ligand, ion, water) written as `HETATM` records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoleculeDict {
    pub molecule_id: Option<i64>,
    pub insert_code: Option<char>,
    pub molecule_name: Option<String>,
    pub chain_id: Option<char>,
    pub atoms: Vec<AtomDict>,
}

/// The flat field set of one `ATOM`/`HETATM` line.
///
/// Absent occupancy means full occupancy and absent charge means neutral, so
/// those two fields carry their defaults instead of being optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomDict {
    pub atom_id: Option<i64>,
    pub atom_name: Option<String>,
    pub alt_loc: Option<char>,
    pub residue_name: Option<String>,
    pub chain_id: Option<char>,
    pub residue_id: Option<i64>,
    pub insert_code: Option<char>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub occupancy: f64,
    pub temp_factor: Option<f64>,
    pub element: Option<String>,
    pub charge: i32,
}

impl Default for AtomDict {
    fn default() -> Self {
        Self {
            atom_id: None,
            atom_name: None,
            alt_loc: None,
            residue_name: None,
            chain_id: None,
            residue_id: None,
            insert_code: None,
            x: None,
            y: None,
            z: None,
            occupancy: 1.0,
            temp_factor: None,
            element: None,
            charge: 0,
        }
    }
}

/// Explicit bonds from one atom, as listed by `CONECT` records.
///
/// Ids are weak references: nothing guarantees an atom with that id exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionDict {
    pub atom: i64,
    pub bond_to: Vec<i64>,
}
