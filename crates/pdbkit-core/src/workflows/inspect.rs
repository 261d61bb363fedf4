use super::error::WorkflowError;
use super::summary::StructureSummary;
use crate::core::io::reader::pdb_string_to_pdb_dict;
use crate::core::models::dict::PdbDict;
use crate::core::models::structure::Structure;
use tracing::{debug, instrument};

/// Summarises an already decoded dictionary.
#[instrument(skip_all, name = "inspect_workflow")]
pub fn summarise(pdb: &PdbDict) -> StructureSummary {
    let summary = StructureSummary::from_structure(&Structure::from_pdb_dict(pdb));
    debug!(atoms = summary.total_atoms, "Summarised structure.");
    summary
}

/// Decodes `text` and summarises its contents.
pub fn run(text: &str) -> Result<StructureSummary, WorkflowError> {
    Ok(summarise(&pdb_string_to_pdb_dict(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_counts_models() {
        let text = "\
MODEL        1
ATOM      1  N   GLY A   1       0.000   0.000   0.000
ENDMDL
MODEL        2
ATOM      1  N   GLY A   1       1.000   0.000   0.000
ENDMDL
";
        let summary = run(text).unwrap();
        assert_eq!(summary.models, 2);
        assert_eq!(summary.atoms, 1);
        assert_eq!(summary.total_atoms, 2);
        assert!(summary.code.is_none());
    }

    #[test]
    fn summarise_matches_run_on_the_packed_dictionary() {
        let text = "\
HEADER                                            01-SEP-90   1XYZ
ATOM      1  N   GLY A   1       0.000   0.000   0.000
CONECT    1    7
";
        let pdb = pdb_string_to_pdb_dict(text).unwrap();
        let summary = summarise(&pdb);
        assert_eq!(summary, run(text).unwrap());
        assert_eq!(summary.code.as_deref(), Some("1XYZ"));
        assert_eq!(summary.dangling_bonds(), 1);
    }

    #[test]
    fn empty_text_has_no_models() {
        let summary = run("").unwrap();
        assert_eq!(summary, StructureSummary::default());
    }
}
