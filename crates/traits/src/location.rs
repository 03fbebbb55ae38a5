//! Absolute locations of stylesheets and the documents they pull in.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Error produced when a string or path cannot become a [`Location`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Invalid location '{input}': {message}")]
    Invalid { input: String, message: String },

    #[error("Location '{0}' is relative; an absolute location is required")]
    Relative(String),
}

/// An immutable, absolute, URL-like reference.
///
/// Two locations are the same resource exactly when their canonical string
/// forms ([`Location::as_str`]) are equal. Canonicalisation is whatever the
/// URL parser does; nothing further happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(Url);

impl Location {
    /// Parses an absolute URL string.
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        match Url::parse(input) {
            Ok(url) => Ok(Self(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Err(LocationError::Relative(input.to_string()))
            }
            Err(e) => Err(LocationError::Invalid {
                input: input.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Builds a `file:` location from an absolute filesystem path.
    pub fn from_file_path<P: AsRef<Path>>(path: P) -> Result<Self, LocationError> {
        let path = path.as_ref();
        Url::from_file_path(path)
            .map(Self)
            .map_err(|_| LocationError::Relative(path.display().to_string()))
    }

    pub fn from_url(url: Url) -> Self {
        Self(url)
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// The filesystem path for `file:` locations.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.0.scheme() != "file" {
            return None;
        }
        self.0.to_file_path().ok()
    }

    /// Resolves `href` against this location using standard URL joining.
    ///
    /// Locations that cannot act as a base (such as `jar:` archive entries)
    /// produce an error.
    pub fn join(&self, href: &str) -> Result<Self, LocationError> {
        self.0.join(href).map(Self).map_err(|e| LocationError::Invalid {
            input: href.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns true when `href` carries no scheme of its own.
    pub fn is_relative_reference(href: &str) -> bool {
        matches!(Url::parse(href), Err(url::ParseError::RelativeUrlWithoutBase))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Self(url)
    }
}
