use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// The `permalink` value declared in a file's front matter.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permalink(String);

impl Permalink {
    pub fn new(permalink: impl Into<String>) -> Self {
        Self(permalink.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the route this permalink prerenders to.
    ///
    /// Absolute URLs are reduced to their path, and relative values are
    /// rooted with a leading `/`.
    pub fn route(&self) -> String {
        if self.0.starts_with('/') {
            return self.0.clone();
        }

        match Url::parse(&self.0) {
            Ok(url) if url.has_host() => url.path().to_string(),
            _ => format!("/{}", self.0),
        }
    }

    /// Resolves the permalink against the site's `base_url`.
    pub fn to_url(&self, base_url: &str) -> Result<Url, url::ParseError> {
        if let Ok(url) = Url::parse(&self.0) {
            if url.has_host() {
                return Ok(url);
            }
        }

        let base_url = base_url.trim_end_matches('/');
        let route = self.route();
        let path = route.trim_start_matches('/');

        Url::from_str(&format!("{base_url}/{path}"))
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
