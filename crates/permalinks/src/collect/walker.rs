use std::future::Future;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use log::{debug, error};
use tokio::fs;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::collect::{CollectOptions, Collected};
use crate::warning::Warning;

type Branch = Pin<Box<dyn Future<Output = Collected> + Send>>;

/// Collects the path of every file under `root`, walking sibling directories
/// concurrently.
///
/// Directories that cannot be listed are recorded as warnings and the walk
/// carries on with everything else, so this never fails as a whole. The
/// order of the returned paths varies between runs.
///
/// Symbolic links are not followed: a link is collected as a file even when
/// it points at a directory.
pub async fn collect_file_paths(root: impl AsRef<Path>, options: &CollectOptions) -> Collected {
    let root = root.as_ref().to_owned();
    let limit = options
        .max_open_dirs
        .map(|max| Arc::new(Semaphore::new(max.get())));

    debug!("collecting files under '{}'", root.display());

    walk_dir(root, limit).await
}

fn walk_dir(dir: PathBuf, limit: Option<Arc<Semaphore>>) -> Branch {
    Box::pin(async move {
        let mut collected = Collected::default();
        let mut subdirs = Vec::new();

        {
            // Only held while listing, so a parent never blocks on its own children.
            let _permit = match limit.as_ref() {
                Some(semaphore) => semaphore.clone().acquire_owned().await.ok(),
                None => None,
            };

            if let Err(source) = list_dir(&dir, &mut collected, &mut subdirs).await {
                collected.warn(Warning::ReadDir {
                    path: dir.clone(),
                    source,
                });
            }
        }

        let mut branches = JoinSet::new();
        for subdir in subdirs {
            branches.spawn(walk_dir(subdir, limit.clone()));
        }

        while let Some(result) = branches.join_next().await {
            match result {
                Ok(branch) => collected.merge(branch),
                Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
                Err(err) => error!("directory walk under '{}' was cancelled: {err}", dir.display()),
            }
        }

        collected
    })
}

async fn list_dir(
    dir: &Path,
    collected: &mut Collected,
    subdirs: &mut Vec<PathBuf>,
) -> io::Result<()> {
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = dir.join(entry.file_name());

        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => subdirs.push(path),
            Ok(_) => collected.files.push(path),
            Err(source) => collected.warn(Warning::FileType { path, source }),
        }
    }

    Ok(())
}
