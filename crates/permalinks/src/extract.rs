use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::front_matter::{parse_front_matter, FrontMatterError};
use crate::permalink::Permalink;
use crate::warning::{self, Warning};

/// What to do when a file can't be read or its front matter can't be parsed.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractPolicy {
    /// Record a warning and leave the file without a permalink.
    #[default]
    Lenient,

    /// Abort on the first failure.
    Strict,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid front matter in '{}': {source}", path.display())]
    InvalidFrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
}

impl From<ExtractError> for Warning {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Read { path, source } => Warning::ReadFile { path, source },
            ExtractError::InvalidFrontMatter { path, source } => {
                Warning::InvalidFrontMatter { path, source }
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PermalinkFrontMatter {
    permalink: Option<Permalink>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PermalinkEntry {
    pub path: PathBuf,
    pub permalink: Option<Permalink>,
}

/// One entry per input path, in input order.
#[derive(Debug, Default)]
pub struct Extracted {
    pub entries: Vec<PermalinkEntry>,
    pub warnings: Vec<Warning>,
}

impl Extracted {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            warnings: Vec::new(),
        }
    }

    fn push(
        &mut self,
        path: &Path,
        outcome: Result<Option<Permalink>, ExtractError>,
        policy: ExtractPolicy,
    ) -> Result<(), ExtractError> {
        let permalink = match (outcome, policy) {
            (Ok(permalink), _) => permalink,
            (Err(err), ExtractPolicy::Strict) => return Err(err),
            (Err(err), ExtractPolicy::Lenient) => {
                warning::record(&mut self.warnings, err.into());
                None
            }
        };

        self.entries.push(PermalinkEntry {
            path: path.to_owned(),
            permalink,
        });

        Ok(())
    }
}

/// Extracts the `permalink` field from the front matter in `text`.
///
/// Text without front matter, or front matter without the field, yields `None`.
pub fn extract_permalink_from_str(text: &str) -> Result<Option<Permalink>, FrontMatterError> {
    Ok(parse_front_matter::<PermalinkFrontMatter>(text)?
        .and_then(|(front_matter, _content)| front_matter.permalink))
}

fn extract_from_text(path: &Path, text: &str) -> Result<Option<Permalink>, ExtractError> {
    extract_permalink_from_str(text).map_err(|source| ExtractError::InvalidFrontMatter {
        path: path.to_owned(),
        source,
    })
}

/// Reads each file in turn and extracts its permalink.
pub async fn extract_permalinks(
    paths: &[PathBuf],
    policy: ExtractPolicy,
) -> Result<Extracted, ExtractError> {
    let mut extracted = Extracted::with_capacity(paths.len());

    for path in paths {
        debug!("extracting permalink from '{}'", path.display());

        let outcome = match tokio::fs::read(path).await {
            Ok(bytes) => extract_from_text(path, &String::from_utf8_lossy(&bytes)),
            Err(source) => Err(ExtractError::Read {
                path: path.clone(),
                source,
            }),
        };

        extracted.push(path, outcome, policy)?;
    }

    Ok(extracted)
}

/// Like [`extract_permalinks`], but reads files on the current thread.
pub fn extract_permalinks_blocking(
    paths: &[PathBuf],
    policy: ExtractPolicy,
) -> Result<Extracted, ExtractError> {
    let mut extracted = Extracted::with_capacity(paths.len());

    for path in paths {
        debug!("extracting permalink from '{}'", path.display());

        let outcome = match std::fs::read(path) {
            Ok(bytes) => extract_from_text(path, &String::from_utf8_lossy(&bytes)),
            Err(source) => Err(ExtractError::Read {
                path: path.clone(),
                source,
            }),
        };

        extracted.push(path, outcome, policy)?;
    }

    Ok(extracted)
}
