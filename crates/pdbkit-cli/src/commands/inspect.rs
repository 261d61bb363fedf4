use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use pdbkit::core::io::pdb::PdbFile;
use pdbkit::core::io::traits::StructureFile;
use pdbkit::workflows::{self, summary::StructureSummary};
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let summary = summarise(&args)?;
    println!("{}", summary);
    Ok(())
}

fn summarise(args: &InspectArgs) -> Result<StructureSummary> {
    info!("Loading input structure from {:?}", &args.input);
    let pdb =
        PdbFile::read_from_path(&args.input).map_err(|e| CliError::reading(&args.input, e))?;
    Ok(workflows::inspect::summarise(&pdb))
}
