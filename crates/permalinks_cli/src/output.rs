use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use permalinks::{Permalink, PermalinkReport};

use crate::cli::Format;

pub struct RouteOutput<'a> {
    pub format: Format,
    pub all: bool,
    pub base_url: Option<&'a str>,
}

impl RouteOutput<'_> {
    fn render(&self, permalink: &Permalink) -> Result<String> {
        match self.base_url {
            Some(base_url) => Ok(permalink
                .to_url(base_url)
                .with_context(|| format!("resolving '{permalink}' against '{base_url}'"))?
                .to_string()),
            None => Ok(permalink.route()),
        }
    }

    pub fn write(&self, out: &mut impl Write, report: &PermalinkReport) -> Result<()> {
        let mut routes = Vec::with_capacity(report.entries.len());
        for permalink in report.permalinks() {
            match permalink {
                Some(permalink) => routes.push(Some(self.render(permalink)?)),
                None if self.all => routes.push(None),
                None => {}
            }
        }

        match self.format {
            Format::Lines => {
                for route in routes {
                    writeln!(out, "{}", route.unwrap_or_default())?;
                }
            }
            Format::Json => {
                serde_json::to_writer_pretty(&mut *out, &routes)?;
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

pub fn write_files(out: &mut impl Write, files: &[PathBuf]) -> Result<()> {
    for file in files {
        writeln!(out, "{}", file.display())?;
    }

    Ok(())
}
