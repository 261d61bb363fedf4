use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Unknown line ending '{0}' (expected 'lf' or 'crlf')")]
    InvalidLineEnding(String),
}

/// Terminator placed after every line of packed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl FromStr for LineEnding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" | "unix" => Ok(LineEnding::Lf),
            "crlf" | "windows" => Ok(LineEnding::CrLf),
            _ => Err(ConfigError::InvalidLineEnding(s.to_string())),
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "lf"),
            LineEnding::CrLf => write!(f, "crlf"),
        }
    }
}

/// Options controlling how packed lines are turned into file text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteConfig {
    pub line_ending: LineEnding,
    /// Append an `END` record after the connections.
    pub end_record: bool,
}

#[derive(Default)]
pub struct WriteConfigBuilder {
    line_ending: Option<LineEnding>,
    end_record: Option<bool>,
}

impl WriteConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_ending(mut self, ending: LineEnding) -> Self {
        self.line_ending = Some(ending);
        self
    }
    pub fn end_record(mut self, enabled: bool) -> Self {
        self.end_record = Some(enabled);
        self
    }

    pub fn build(self) -> WriteConfig {
        WriteConfig {
            line_ending: self.line_ending.unwrap_or_default(),
            end_record: self.end_record.unwrap_or(false),
        }
    }
}
