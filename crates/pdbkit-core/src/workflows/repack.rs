use super::error::WorkflowError;
use super::summary::StructureSummary;
use crate::core::io::aggregator::pdb_dict_to_pdb_string_with;
use crate::core::io::config::WriteConfig;
use crate::core::io::reader::pdb_string_to_pdb_dict;
use crate::core::models::dict::PdbDict;
use crate::core::models::structure::Structure;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct RepackOutput {
    pub summary: StructureSummary,
    /// The normalised file text.
    pub text: String,
}

/// A decoded structure rebuilt through the object graph, ready to be packed.
#[derive(Debug, Clone)]
pub struct Normalised {
    pub summary: StructureSummary,
    pub pdb: PdbDict,
}

/// Rebuilds `pdb` through the object graph and summarises it.
///
/// Callers that do their own I/O (for example through
/// [`PdbFile`](crate::core::io::pdb::PdbFile)) pack the returned dictionary.
pub fn normalise(pdb: &PdbDict) -> Normalised {
    let structure = Structure::from_pdb_dict(pdb);
    let summary = StructureSummary::from_structure(&structure);
    info!(
        models = summary.models,
        atoms = summary.total_atoms,
        connections = summary.connections,
        "Decoded input structure."
    );
    if summary.dangling_bonds() > 0 {
        warn!(
            dangling = summary.dangling_bonds(),
            "Some CONECT partners are not present in the first model."
        );
    }

    Normalised {
        summary,
        pdb: structure.to_pdb_dict(),
    }
}

/// Decodes `text`, summarises it and packs it again with `config`.
#[instrument(skip_all, name = "repack_workflow")]
pub fn run(text: &str, config: &WriteConfig) -> Result<RepackOutput, WorkflowError> {
    let Normalised { summary, pdb } = normalise(&pdb_string_to_pdb_dict(text)?);
    let text = pdb_dict_to_pdb_string_with(&pdb, config)?;
    info!(bytes = text.len(), "Packed output structure.");
    Ok(RepackOutput { summary, text })
}
