use crate::cli::RepackArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use pdbkit::core::io::pdb::PdbFile;
use pdbkit::core::io::traits::StructureFile;
use pdbkit::workflows::{self, repack::Normalised};
use tracing::info;

pub fn run(args: RepackArgs) -> Result<()> {
    let config = PartialConfig::load(args.config.as_deref())?.merge_with_cli(&args)?;
    info!(
        "Writing with {} line endings, END record: {}",
        config.line_ending, config.end_record
    );

    info!("Loading input structure from {:?}", &args.input);
    let pdb =
        PdbFile::read_from_path(&args.input).map_err(|e| CliError::reading(&args.input, e))?;

    let Normalised { summary, pdb } = workflows::repack::normalise(&pdb);

    PdbFile::write_to_path(&pdb, &config, &args.output)?;
    info!("Wrote normalised structure to {:?}", &args.output);
    println!(
        "Repacked {} atom(s) in {} model(s) to: {}",
        summary.total_atoms,
        summary.models,
        args.output.display()
    );
    Ok(())
}
