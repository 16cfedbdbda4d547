mod blocking;
mod walker;

use std::num::NonZeroUsize;
use std::path::PathBuf;

use derive_more::{Deref, DerefMut, From};

use crate::warning::{self, Warning};

pub use blocking::*;
pub use walker::*;

/// File paths in the order they were discovered.
#[derive(Debug, Default, PartialEq, Eq, Clone, Deref, DerefMut, From)]
pub struct FilePaths(Vec<PathBuf>);

impl FilePaths {
    pub fn into_inner(self) -> Vec<PathBuf> {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Collected {
    pub files: FilePaths,
    pub warnings: Vec<Warning>,
}

impl Collected {
    pub(crate) fn warn(&mut self, warning: Warning) {
        warning::record(&mut self.warnings, warning);
    }

    pub(crate) fn merge(&mut self, other: Collected) {
        self.files.extend(other.files.into_inner());
        self.warnings.extend(other.warnings);
    }
}

#[derive(Debug, Default, Clone)]
pub struct CollectOptions {
    /// The most directories that may be listed at once. Unbounded when `None`.
    pub max_open_dirs: Option<NonZeroUsize>,
}
