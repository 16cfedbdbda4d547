use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::collect::Collected;
use crate::warning::Warning;

/// Collects the path of every file under `root` on the current thread.
///
/// Follows the same rules as [`collect_file_paths`](crate::collect_file_paths),
/// but visits entries in a single depth-first pass.
pub fn collect_file_paths_blocking(root: impl AsRef<Path>) -> Collected {
    let root = root.as_ref();
    let mut collected = Collected::default();

    debug!("collecting files under '{}'", root.display());

    if let Err(source) = fs::read_dir(root) {
        collected.warn(Warning::ReadDir {
            path: root.to_owned(),
            source,
        });
        return collected;
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_owned();
                let message = err.to_string();
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));

                collected.warn(Warning::ReadDir { path, source });
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            collected.files.push(entry.into_path());
        }
    }

    collected
}
