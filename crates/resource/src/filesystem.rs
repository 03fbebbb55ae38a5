//! Filesystem-based resource locator for native platforms.
//!
//! Logical names are looked up in each resource root in turn, the way a
//! search path works: the first root holding the file wins.
//!
//! # Security
//!
//! Name lookups never leave their root. Names that are absolute or that
//! climb out with `..` are treated as absent.

use docweave_traits::{Location, ResourceError, ResourceLocator};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct Root {
    path: PathBuf,
    /// Canonicalized root for containment checks
    canonical: Option<PathBuf>,
}

/// A resource locator backed by an ordered list of directories.
#[derive(Debug, Default)]
pub struct FilesystemResourceLocator {
    roots: Vec<Root>,
}

impl FilesystemResourceLocator {
    /// Creates a locator with a single resource root.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::default().with_root(root)
    }

    /// Appends a resource root; earlier roots take precedence.
    pub fn with_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        let path = root.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet
        let canonical = path.canonicalize().ok();
        self.roots.push(Root { path, canonical });
        self
    }

    pub fn roots(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(|r| r.path.as_path())
    }

    /// Resolves a name inside one root.
    ///
    /// Returns `None` if the name would escape the root.
    fn resolve_in_root(root: &Root, name: &str) -> Option<PathBuf> {
        let relative = name.trim_start_matches('/');
        if relative.is_empty() || Path::new(relative).is_absolute() {
            return None;
        }

        for component in Path::new(relative).components() {
            if let std::path::Component::ParentDir = component {
                return None;
            }
        }

        let full_path = root.path.join(relative);

        if let Ok(canonical) = full_path.canonicalize() {
            return match &root.canonical {
                // Symlinks pointing outside the root are rejected
                Some(base) if !canonical.starts_with(base) => None,
                _ => Some(canonical),
            };
        }

        Some(full_path)
    }
}

impl ResourceLocator for FilesystemResourceLocator {
    fn locate(&self, name: &str) -> Result<Option<Location>, ResourceError> {
        for root in &self.roots {
            let Some(path) = Self::resolve_in_root(root, name) else {
                log::trace!("'{}' rejected for root {}", name, root.path.display());
                continue;
            };
            if !path.is_file() {
                continue;
            }
            let absolute = if path.is_absolute() {
                path
            } else {
                std::env::current_dir()?.join(path)
            };
            let location = Location::from_file_path(&absolute)
                .map_err(|e| ResourceError::UnsupportedLocation(e.to_string()))?;
            log::trace!("'{}' located at {}", name, location);
            return Ok(Some(location));
        }
        Ok(None)
    }

    fn open(&self, location: &Location) -> Result<Box<dyn Read + Send>, ResourceError> {
        let path = location
            .to_file_path()
            .ok_or_else(|| ResourceError::UnsupportedLocation(location.to_string()))?;

        File::open(&path)
            .map(|f| Box::new(f) as Box<dyn Read + Send>)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ResourceError::NotFound(location.to_string())
                } else {
                    ResourceError::LoadFailed {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceLocator"
    }
}
