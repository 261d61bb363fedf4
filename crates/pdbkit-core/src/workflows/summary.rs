use crate::core::models::structure::{Model, Structure};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

/// Counts and header fields describing a decoded structure.
///
/// Per-model counts refer to the first model; `total_atoms` covers all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureSummary {
    pub code: Option<String>,
    pub title: Option<String>,
    pub deposition_date: Option<NaiveDate>,
    pub models: usize,
    pub chains: usize,
    pub residues: usize,
    pub molecules: usize,
    pub atoms: usize,
    pub total_atoms: usize,
    pub connections: usize,
    /// Bonds listed across all `CONECT` records.
    pub bonds: usize,
    /// Listed bonds whose partner exists in the first model.
    pub resolved_bonds: usize,
}

impl StructureSummary {
    pub fn from_structure(structure: &Structure) -> Self {
        let model = structure.model();
        let count = |f: fn(&Model) -> usize| model.map_or(0, f);

        let mut seen = HashSet::new();
        let resolved_bonds = match model {
            Some(model) => structure
                .connections()
                .iter()
                .filter(|c| seen.insert(c.atom))
                .map(|c| model.bonded_neighbors(c.atom).len())
                .sum(),
            None => 0,
        };

        Self {
            code: structure.code.clone(),
            title: structure.title.clone(),
            deposition_date: structure.deposition_date,
            models: structure.models().len(),
            chains: count(|m| m.chains().len()),
            residues: count(|m| m.chains().iter().map(|c| c.residues().len()).sum()),
            molecules: count(|m| m.molecules().len()),
            atoms: count(Model::atom_count),
            total_atoms: structure.atom_count(),
            connections: structure.connections().len(),
            bonds: structure.connections().iter().map(|c| c.bond_to.len()).sum(),
            resolved_bonds,
        }
    }

    /// Listed bonds that point at atoms missing from the first model.
    pub fn dangling_bonds(&self) -> usize {
        self.bonds.saturating_sub(self.resolved_bonds)
    }
}

impl fmt::Display for StructureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
        writeln!(f, "code:        {}", or_dash(self.code.clone()))?;
        writeln!(f, "title:       {}", or_dash(self.title.clone()))?;
        writeln!(
            f,
            "deposited:   {}",
            or_dash(self.deposition_date.map(|d| d.to_string()))
        )?;
        writeln!(f, "models:      {}", self.models)?;
        writeln!(f, "chains:      {}", self.chains)?;
        writeln!(f, "residues:    {}", self.residues)?;
        writeln!(f, "molecules:   {}", self.molecules)?;
        writeln!(f, "atoms:       {} ({} in all models)", self.atoms, self.total_atoms)?;
        write!(
            f,
            "bonds:       {} in {} CONECT entries, {} dangling",
            self.bonds,
            self.connections,
            self.dangling_bonds()
        )
    }
}
