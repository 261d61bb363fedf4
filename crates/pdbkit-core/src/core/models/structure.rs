use super::atom::{Atom, ResidueFields};
use super::dict::{
    AtomDict, ChainDict, ConnectionDict, ModelDict, MoleculeDict, PdbDict, ResidueDict,
};
use super::ids::AtomId;
use chrono::NaiveDate;
use slotmap::SlotMap;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::warn;

/// A residue of a polymer chain, holding its atoms in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Residue {
    pub id: Option<i64>,
    pub insert_code: Option<char>,
    pub name: Option<String>,
    atoms: Vec<AtomId>,
}

impl Residue {
    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }
}

/// A polymer chain (`ATOM` records sharing a chain identifier).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain {
    pub id: Option<char>,
    residues: Vec<Residue>,
}

impl Chain {
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn atom_ids(&self) -> impl Iterator<Item = AtomId> + '_ {
        self.residues.iter().flat_map(|r| r.atoms.iter().copied())
    }
}

/// A non-polymer molecule (`HETATM` records), such as a ligand or water.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub id: Option<i64>,
    pub insert_code: Option<char>,
    pub name: Option<String>,
    pub chain_id: Option<char>,
    atoms: Vec<AtomId>,
}

impl Molecule {
    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }
}

/// One model of a structure.
///
/// Atoms live in a slot map; chains, residues and molecules refer to them by
/// [`AtomId`]. A serial-number index resolves `CONECT` references.
#[derive(Debug, Clone, Default)]
pub struct Model {
    atoms: SlotMap<AtomId, Atom>,
    chains: Vec<Chain>,
    molecules: Vec<Molecule>,
    serial_index: HashMap<i64, AtomId>,
    bonds: HashMap<i64, Vec<i64>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn find_atom_by_serial(&self, serial: i64) -> Option<AtomId> {
        self.serial_index.get(&serial).copied()
    }

    pub fn atom_by_serial(&self, serial: i64) -> Option<&Atom> {
        self.find_atom_by_serial(serial)
            .and_then(|id| self.atoms.get(id))
    }

    /// Atoms bonded to the atom with `serial`, in `CONECT` order.
    ///
    /// Serials with no atom in this model are skipped.
    pub fn bonded_neighbors(&self, serial: i64) -> Vec<&Atom> {
        let Some(partners) = self.bonds.get(&serial) else {
            return Vec::new();
        };
        partners
            .iter()
            .filter_map(|&partner| {
                let atom = self.atom_by_serial(partner);
                if atom.is_none() {
                    warn!(
                        atom = serial,
                        partner, "Skipping bond to an atom missing from the model."
                    );
                }
                atom
            })
            .collect()
    }

    /// Appends a polymer atom, starting a new chain or residue when its
    /// identifiers differ from the last ones added.
    pub fn add_residue_atom(&mut self, dict: &AtomDict) -> AtomId {
        let id = self.insert_atom(dict);
        if self.chains.last().is_none_or(|c| c.id != dict.chain_id) {
            self.chains.push(Chain {
                id: dict.chain_id,
                residues: Vec::new(),
            });
        }
        if let Some(chain) = self.chains.last_mut() {
            let continues = chain.residues.last().is_some_and(|r| {
                r.id == dict.residue_id
                    && r.insert_code == dict.insert_code
                    && r.name == dict.residue_name
            });
            if !continues {
                chain.residues.push(Residue {
                    id: dict.residue_id,
                    insert_code: dict.insert_code,
                    name: dict.residue_name.clone(),
                    atoms: Vec::new(),
                });
            }
            if let Some(residue) = chain.residues.last_mut() {
                residue.atoms.push(id);
            }
        }
        id
    }

    fn insert_atom(&mut self, dict: &AtomDict) -> AtomId {
        let id = self.atoms.insert(Atom::from_dict(dict));
        if let Some(serial) = dict.atom_id {
            match self.serial_index.entry(serial) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
                Entry::Occupied(_) => {
                    warn!(serial, "Duplicate atom serial; keeping the first atom.");
                }
            }
        }
        id
    }

    fn from_model_dict(dict: &ModelDict, bonds: &HashMap<i64, Vec<i64>>) -> Self {
        let mut model = Model {
            bonds: bonds.clone(),
            ..Default::default()
        };
        for chain in &dict.chains {
            let mut residues = Vec::with_capacity(chain.residues.len());
            for residue in &chain.residues {
                let atoms = residue
                    .atoms
                    .iter()
                    .map(|atom| model.insert_atom(atom))
                    .collect();
                residues.push(Residue {
                    id: residue.residue_id,
                    insert_code: residue.insert_code,
                    name: residue.residue_name.clone(),
                    atoms,
                });
            }
            model.chains.push(Chain {
                id: chain.chain_id,
                residues,
            });
        }
        for molecule in &dict.molecules {
            let atoms = molecule
                .atoms
                .iter()
                .map(|atom| model.insert_atom(atom))
                .collect();
            model.molecules.push(Molecule {
                id: molecule.molecule_id,
                insert_code: molecule.insert_code,
                name: molecule.molecule_name.clone(),
                chain_id: molecule.chain_id,
                atoms,
            });
        }
        model
    }

    fn atom_dicts(&self, ids: &[AtomId], owner: ResidueFields<'_>) -> Vec<AtomDict> {
        ids.iter()
            .filter_map(|&id| self.atoms.get(id))
            .map(|atom| atom.to_dict(owner))
            .collect()
    }

    pub fn to_model_dict(&self) -> ModelDict {
        let chains = self
            .chains
            .iter()
            .map(|chain| ChainDict {
                chain_id: chain.id,
                residues: chain
                    .residues
                    .iter()
                    .map(|residue| ResidueDict {
                        residue_id: residue.id,
                        insert_code: residue.insert_code,
                        residue_name: residue.name.clone(),
                        atoms: self.atom_dicts(
                            &residue.atoms,
                            ResidueFields {
                                name: residue.name.as_deref(),
                                chain_id: chain.id,
                                residue_id: residue.id,
                                insert_code: residue.insert_code,
                            },
                        ),
                    })
                    .collect(),
            })
            .collect();
        let molecules = self
            .molecules
            .iter()
            .map(|molecule| MoleculeDict {
                molecule_id: molecule.id,
                insert_code: molecule.insert_code,
                molecule_name: molecule.name.clone(),
                chain_id: molecule.chain_id,
                atoms: self.atom_dicts(
                    &molecule.atoms,
                    ResidueFields {
                        name: molecule.name.as_deref(),
                        chain_id: molecule.chain_id,
                        residue_id: molecule.id,
                        insert_code: molecule.insert_code,
                    },
                ),
            })
            .collect();
        ModelDict { chains, molecules }
    }
}

/// A whole structure: header fields, models and connectivity.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub code: Option<String>,
    pub title: Option<String>,
    pub deposition_date: Option<NaiveDate>,
    models: Vec<Model>,
    connections: Vec<ConnectionDict>,
}

impl Structure {
    /// Builds the object graph from a dictionary.
    ///
    /// Atom residue columns are taken from the containing residue or molecule
    /// on the way back out, so per-atom values that disagree with their
    /// container are not preserved.
    pub fn from_pdb_dict(pdb: &PdbDict) -> Self {
        let mut bonds: HashMap<i64, Vec<i64>> = HashMap::new();
        for connection in &pdb.connections {
            bonds
                .entry(connection.atom)
                .or_default()
                .extend(&connection.bond_to);
        }
        Self {
            code: pdb.code.clone(),
            title: pdb.title.clone(),
            deposition_date: pdb.deposition_date,
            models: pdb
                .models
                .iter()
                .map(|model| Model::from_model_dict(model, &bonds))
                .collect(),
            connections: pdb.connections.clone(),
        }
    }

    pub fn to_pdb_dict(&self) -> PdbDict {
        PdbDict {
            deposition_date: self.deposition_date,
            code: self.code.clone(),
            title: self.title.clone(),
            models: self.models.iter().map(Model::to_model_dict).collect(),
            connections: self.connections.clone(),
        }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// The first model, which is the one most tools treat as "the" structure.
    pub fn model(&self) -> Option<&Model> {
        self.models.first()
    }

    pub fn connections(&self) -> &[ConnectionDict] {
        &self.connections
    }

    pub fn atom_count(&self) -> usize {
        self.models.iter().map(Model::atom_count).sum()
    }
}
