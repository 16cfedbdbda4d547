use std::io;
use std::path::PathBuf;

use log::warn;
use thiserror::Error;

use crate::front_matter::FrontMatterError;

/// A failure that was recovered from; the affected entries were skipped or
/// left without a permalink.
#[derive(Error, Debug)]
pub enum Warning {
    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("failed to determine file type of '{}': {source}", path.display())]
    FileType { path: PathBuf, source: io::Error },

    #[error("failed to read file '{}': {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("invalid front matter in '{}': {source}", path.display())]
    InvalidFrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
}

impl Warning {
    pub fn path(&self) -> &PathBuf {
        match self {
            Warning::ReadDir { path, .. }
            | Warning::FileType { path, .. }
            | Warning::ReadFile { path, .. }
            | Warning::InvalidFrontMatter { path, .. } => path,
        }
    }
}

/// Logs `warning` and appends it to `warnings`.
pub(crate) fn record(warnings: &mut Vec<Warning>, warning: Warning) {
    warn!("{warning}");
    warnings.push(warning);
}
