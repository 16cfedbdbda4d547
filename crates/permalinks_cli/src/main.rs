mod cli;
mod output;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use permalinks::{collect_file_paths, get_all_permalinks};
use simple_logger::SimpleLogger;

use crate::cli::{Cli, Command, RoutesArgs, SourceArgs};
use crate::output::{write_files, RouteOutput};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(cli.log_level())
        .without_timestamps()
        .init()?;

    match cli.command {
        Some(Command::Routes(args)) => routes(args).await,
        Some(Command::Files(args)) => files(args).await,
        None => routes(RoutesArgs::default()).await,
    }
}

async fn routes(args: RoutesArgs) -> Result<()> {
    let config = args.load_config()?;

    let report = get_all_permalinks(&config).await.with_context(|| {
        format!(
            "extracting permalinks under '{}'",
            config.content_dir.display()
        )
    })?;

    let output = RouteOutput {
        format: args.format,
        all: args.all,
        base_url: config.base_url.as_deref(),
    };

    let mut stdout = io::stdout().lock();
    output.write(&mut stdout, &report)?;
    stdout.flush()?;

    Ok(())
}

async fn files(args: SourceArgs) -> Result<()> {
    let config = args.load_config()?;

    let mut collected = collect_file_paths(&config.content_dir, &config.collect_options()).await;
    if config.sort {
        collected.files.sort();
    }

    let mut stdout = io::stdout().lock();
    write_files(&mut stdout, &collected.files)?;
    stdout.flush()?;

    Ok(())
}
