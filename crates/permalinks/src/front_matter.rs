use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use thiserror::Error;

static DASH_REGEX: OnceLock<Regex> = OnceLock::new();
static PLUS_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches a `---` fenced block, with an optional language tag on the opening fence.
fn dash_regex() -> &'static Regex {
    DASH_REGEX.get_or_init(|| {
        let pattern = r"^\s*---[ \t]*(?P<lang>[[:alpha:]]*)[ \t]*\r?\n(?P<matter>(?s:.*?\r?\n)??)---[ \t]*(?:\r?\n(?P<content>(?s:.*))|$)";
        Regex::new(pattern).expect("failed to compile regex for `---` front matter")
    })
}

/// Matches a `+++` fenced block, which is always TOML.
fn plus_regex() -> &'static Regex {
    PLUS_REGEX.get_or_init(|| {
        let pattern = r"^\s*\+\+\+[ \t]*\r?\n(?P<matter>(?s:.*?\r?\n)??)\+\+\+[ \t]*(?:\r?\n(?P<content>(?s:.*))|$)";
        Regex::new(pattern).expect("failed to compile regex for `+++` front matter")
    })
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FrontMatterFormat {
    Yaml,
    Toml,
    Json,
}

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON front matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported front matter language '{0}'")]
    UnsupportedLanguage(String),
}

#[derive(Debug)]
pub struct RawFrontMatter<'a> {
    pub format: FrontMatterFormat,
    pub matter: &'a str,
    pub content: &'a str,
}

impl<'a> RawFrontMatter<'a> {
    /// Splits the leading front matter block off `text`.
    ///
    /// Returns `Ok(None)` when `text` does not open with a complete fenced block.
    pub fn split(text: &'a str) -> Result<Option<Self>, FrontMatterError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        if let Some(captures) = dash_regex().captures(text) {
            let format = match captures.name("lang").map_or("", |m| m.as_str()) {
                "" | "yaml" | "yml" => FrontMatterFormat::Yaml,
                "toml" => FrontMatterFormat::Toml,
                "json" => FrontMatterFormat::Json,
                other => return Err(FrontMatterError::UnsupportedLanguage(other.to_string())),
            };

            return Ok(Some(Self::from_captures(format, &captures)));
        }

        Ok(plus_regex()
            .captures(text)
            .map(|captures| Self::from_captures(FrontMatterFormat::Toml, &captures)))
    }

    fn from_captures(format: FrontMatterFormat, captures: &Captures<'a>) -> Self {
        Self {
            format,
            matter: captures.name("matter").map_or("", |m| m.as_str()),
            content: captures.name("content").map_or("", |m| m.as_str()),
        }
    }

    pub fn deserialize<T>(&self) -> Result<T, FrontMatterError>
    where
        T: DeserializeOwned,
    {
        match self.format {
            FrontMatterFormat::Yaml => {
                // A block holding only whitespace or comments is an empty mapping.
                let value = match serde_yaml::from_str(self.matter)? {
                    serde_yaml::Value::Null => {
                        serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
                    }
                    value => value,
                };

                Ok(serde_yaml::from_value(value)?)
            }
            FrontMatterFormat::Toml => Ok(toml::from_str(self.matter)?),
            FrontMatterFormat::Json => {
                if self.matter.trim().is_empty() {
                    Ok(serde_json::from_str("{}")?)
                } else {
                    Ok(serde_json::from_str(self.matter)?)
                }
            }
        }
    }
}

/// Parses the front matter at the start of `content` into `T`, returning it
/// along with the remaining body.
pub fn parse_front_matter<'a, T>(content: &'a str) -> Result<Option<(T, &'a str)>, FrontMatterError>
where
    T: DeserializeOwned,
{
    match RawFrontMatter::split(content)? {
        Some(raw) => Ok(Some((raw.deserialize()?, raw.content))),
        None => Ok(None),
    }
}
