use crate::cli::RepackArgs;
use crate::error::{CliError, Result};
use pdbkit::core::io::config::{LineEnding, WriteConfig, WriteConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialOutputConfig {
    line_ending: Option<String>,
    end_record: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    output: Option<PartialOutputConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Combines file values with command-line flags; flags win when set.
    pub fn merge_with_cli(self, args: &RepackArgs) -> Result<WriteConfig> {
        let output = self.output.unwrap_or_default();

        let line_ending = if args.crlf {
            LineEnding::CrLf
        } else {
            match output.line_ending.as_deref() {
                Some(value) => value.parse::<LineEnding>()?,
                None => LineEnding::default(),
            }
        };
        let end_record = args.end_record || output.end_record.unwrap_or(false);

        Ok(WriteConfigBuilder::new()
            .line_ending(line_ending)
            .end_record(end_record)
            .build())
    }
}
