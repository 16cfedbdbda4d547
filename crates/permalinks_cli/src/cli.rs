use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use permalinks::config::DEFAULT_CONFIG_FILE;
use permalinks::{Config, ExtractPolicy};

#[derive(Parser, Debug)]
#[command(name = "permalinks", version, about = "Lists the prerender routes of a content directory")]
pub struct Cli {
    /// Log more; repeat for even more.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }

        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the route of every content file that declares a permalink.
    Routes(RoutesArgs),

    /// Print the path of every content file.
    Files(SourceArgs),
}

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Config file to load. Defaults to `permalinks.toml` when it exists.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to collect content files from.
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Sort files by path before extracting.
    #[arg(long)]
    pub sort: bool,

    /// Most directories to list at once.
    #[arg(long)]
    pub max_open_dirs: Option<NonZeroUsize>,
}

impl SourceArgs {
    /// Loads the config file, if any, and applies the flags on top of it.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match self.config.as_deref() {
            Some(path) => Config::from_path(path)
                .with_context(|| format!("loading config from '{}'", path.display()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Config::from_path(DEFAULT_CONFIG_FILE)?
            }
            None => Config::default(),
        };

        self.apply(&mut config);

        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(content) = self.content.as_ref() {
            config.content_dir = content.clone();
        }

        if self.sort {
            config.sort = true;
        }

        if self.max_open_dirs.is_some() {
            config.max_open_dirs = self.max_open_dirs;
        }
    }
}

#[derive(ValueEnum, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Format {
    /// One route per line.
    #[default]
    Lines,

    /// A JSON array of routes.
    Json,
}

#[derive(Args, Debug, Default)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fail on the first unreadable file or invalid front matter.
    #[arg(long)]
    pub strict: bool,

    /// Print absolute URLs under this base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Lines)]
    pub format: Format,

    /// Keep files without a permalink as empty lines or `null`s.
    #[arg(long)]
    pub all: bool,
}

impl RoutesArgs {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = self.source.load_config()?;

        if self.strict {
            config.policy = ExtractPolicy::Strict;
        }

        if self.base_url.is_some() {
            config.base_url = self.base_url.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["permalinks"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_parse_routes() {
        let cli = Cli::try_parse_from([
            "permalinks",
            "routes",
            "--content",
            "site/content",
            "--strict",
            "--format",
            "json",
            "--max-open-dirs",
            "8",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.log_level(), LevelFilter::Trace);

        let Some(Command::Routes(args)) = cli.command else {
            panic!("expected routes command");
        };
        assert_eq!(args.format, Format::Json);
        assert!(args.strict);
        assert_eq!(args.source.max_open_dirs, NonZeroUsize::new(8));
        assert_eq!(args.source.content, Some(PathBuf::from("site/content")));
    }

    #[test]
    fn test_log_levels() {
        let level = |args: &[&str]| Cli::try_parse_from(args).unwrap().log_level();

        assert_eq!(level(&["permalinks", "-v"]), LevelFilter::Debug);
        assert_eq!(level(&["permalinks", "files", "-vvv"]), LevelFilter::Trace);
        assert_eq!(level(&["permalinks", "-q"]), LevelFilter::Error);
    }

    #[test]
    fn test_rejects_zero_max_open_dirs() {
        assert!(Cli::try_parse_from(["permalinks", "files", "--max-open-dirs", "0"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("site.toml");
        fs::write(
            &path,
            "content_dir = \"pages\"\nbase_url = \"https://a.example\"\n",
        )
        .unwrap();

        let args = RoutesArgs {
            source: SourceArgs {
                config: Some(path.clone()),
                sort: true,
                ..SourceArgs::default()
            },
            strict: true,
            base_url: Some("https://b.example".into()),
            ..RoutesArgs::default()
        };

        let config = args.load_config().unwrap();
        assert_eq!(config.content_dir, root.path().join("pages"));
        assert_eq!(config.policy, ExtractPolicy::Strict);
        assert_eq!(config.base_url.as_deref(), Some("https://b.example"));
        assert!(config.sort);

        let args = SourceArgs {
            config: Some(path),
            content: Some(PathBuf::from("elsewhere")),
            ..SourceArgs::default()
        };
        assert_eq!(
            args.load_config().unwrap().content_dir,
            PathBuf::from("elsewhere")
        );
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = SourceArgs {
            config: Some(PathBuf::from("definitely/not/here.toml")),
            ..SourceArgs::default()
        };
        assert!(args.load_config().is_err());
    }
}
