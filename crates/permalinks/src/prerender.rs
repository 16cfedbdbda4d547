use std::path::Path;

use log::{debug, info};

use crate::collect::{collect_file_paths, collect_file_paths_blocking, Collected};
use crate::config::Config;
use crate::extract::{
    extract_permalinks, extract_permalinks_blocking, ExtractError, Extracted, PermalinkEntry,
};
use crate::permalink::Permalink;
use crate::warning::Warning;

/// The permalinks of every content file, ready to be used as prerender routes.
#[derive(Debug, Default)]
pub struct PermalinkReport {
    /// One entry per collected file.
    pub entries: Vec<PermalinkEntry>,
    /// Everything that was skipped along the way, walk failures first.
    pub warnings: Vec<Warning>,
}

impl PermalinkReport {
    fn from_parts(collected: Collected, extracted: Extracted) -> Self {
        let mut warnings = collected.warnings;
        warnings.extend(extracted.warnings);

        Self {
            entries: extracted.entries,
            warnings,
        }
    }

    /// Returns the permalink of each entry, `None` where a file declares none.
    pub fn permalinks(&self) -> impl Iterator<Item = Option<&Permalink>> {
        self.entries.iter().map(|entry| entry.permalink.as_ref())
    }

    /// Returns the route of every entry that declares a permalink.
    pub fn routes(&self) -> Vec<String> {
        self.permalinks().flatten().map(Permalink::route).collect()
    }
}

fn prepare(config: &Config, mut collected: Collected) -> Collected {
    if config.sort {
        collected.files.sort();
    }

    debug!(
        "collected {} files under '{}'",
        collected.files.len(),
        config.content_dir.display()
    );

    collected
}

fn finish(content_dir: &Path, report: &PermalinkReport) {
    info!(
        "found {} permalinks in {} files under '{}' ({} warnings)",
        report.permalinks().flatten().count(),
        report.entries.len(),
        content_dir.display(),
        report.warnings.len()
    );
}

/// Collects every file under the configured content directory and extracts
/// its permalink.
pub async fn get_all_permalinks(config: &Config) -> Result<PermalinkReport, ExtractError> {
    let collected = collect_file_paths(&config.content_dir, &config.collect_options()).await;
    let collected = prepare(config, collected);
    let extracted = extract_permalinks(&collected.files, config.policy).await?;

    let report = PermalinkReport::from_parts(collected, extracted);
    finish(&config.content_dir, &report);

    Ok(report)
}

/// Like [`get_all_permalinks`], but does all of its work on the current thread.
pub fn get_all_permalinks_blocking(config: &Config) -> Result<PermalinkReport, ExtractError> {
    let collected = prepare(config, collect_file_paths_blocking(&config.content_dir));
    let extracted = extract_permalinks_blocking(&collected.files, config.policy)?;

    let report = PermalinkReport::from_parts(collected, extracted);
    finish(&config.content_dir, &report);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::extract::ExtractPolicy;

    fn site() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("blog")).unwrap();
        fs::write(root.path().join("index.md"), "---\npermalink: /\n---\n").unwrap();
        fs::write(
            root.path().join("blog/first.md"),
            "---\npermalink: blog/first\n---\n",
        )
        .unwrap();
        fs::write(root.path().join("blog/draft.md"), "# Draft\n").unwrap();
        root
    }

    #[tokio::test]
    async fn test_sorted_report() {
        let root = site();
        let config = Config {
            content_dir: root.path().to_owned(),
            sort: true,
            ..Config::default()
        };

        let report = get_all_permalinks(&config).await.unwrap();

        assert_eq!(
            report
                .entries
                .iter()
                .map(|entry| entry.path.clone())
                .collect::<Vec<_>>(),
            vec![
                root.path().join("blog/draft.md"),
                root.path().join("blog/first.md"),
                root.path().join("index.md"),
            ]
        );
        assert_eq!(report.routes(), vec!["/blog/first", "/"]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_blocking_report() {
        let root = site();
        let config = Config {
            content_dir: root.path().to_owned(),
            sort: true,
            policy: ExtractPolicy::Strict,
            ..Config::default()
        };

        let report = get_all_permalinks_blocking(&config).unwrap();

        assert_eq!(
            report.permalinks().collect::<Vec<_>>(),
            vec![
                None,
                Some(&Permalink::new("blog/first")),
                Some(&Permalink::new("/"))
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_content_dir_is_an_empty_report() {
        let root = tempfile::tempdir().unwrap();
        let config = Config {
            content_dir: root.path().join("content"),
            ..Config::default()
        };

        let report = get_all_permalinks(&config).await.unwrap();

        assert!(report.entries.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_file_is_reported() {
        let root = site();
        fs::write(root.path().join("broken.md"), "---\npermalink: [\n---\n").unwrap();
        let config = Config {
            content_dir: root.path().to_owned(),
            ..Config::default()
        };

        let report = get_all_permalinks(&config).await.unwrap();

        assert_eq!(report.entries.len(), 4);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path(), &root.path().join("broken.md"));
    }
}
