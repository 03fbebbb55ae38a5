//! ResourceLocator trait for abstracting stylesheet and resource lookup.
//!
//! The builder never touches the filesystem directly: logical resource names
//! (such as `docbook-xsl/html/chunk.xsl`) are turned into [`Location`]s and
//! locations are opened through this trait.

use crate::location::Location;
use std::fmt::Debug;
use std::io::{Cursor, Read};
use std::sync::Arc;
use thiserror::Error;

/// Error type for resource lookup and loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Unsupported location: {0}")]
    UnsupportedLocation(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// Locates logical resources and opens their content.
///
/// # Implementations
///
/// - `FilesystemResourceLocator` (docweave-resource): ordered resource roots on disk
/// - `InMemoryResourceLocator`: pre-populated memory, `mem:` locations
pub trait ResourceLocator: Send + Sync + Debug {
    /// Finds the absolute location of a logical resource name.
    ///
    /// Returns `Ok(None)` when the resource simply is not there; errors are
    /// reserved for lookups that could not be carried out.
    fn locate(&self, name: &str) -> Result<Option<Location>, ResourceError>;

    /// Like [`locate`](Self::locate), but a missing resource is an error.
    fn require(&self, name: &str) -> Result<Location, ResourceError> {
        self.locate(name)?
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }

    /// Opens the content behind a location for reading.
    fn open(&self, location: &Location) -> Result<Box<dyn Read + Send>, ResourceError>;

    /// Returns a human-readable name for this locator (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Reads a stored resource in place; the buffer is shared, not copied.
struct SharedBytes(SharedResourceData);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Scheme used for locations handed out by [`InMemoryResourceLocator`].
pub const MEMORY_SCHEME: &str = "mem";

/// An in-memory resource locator.
///
/// Resources are stored in memory and must be pre-populated before use.
/// Each resource is reachable at `mem:/<name>`.
#[derive(Debug, Default)]
pub struct InMemoryResourceLocator {
    resources: std::sync::RwLock<std::collections::HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The location a resource name maps to.
    pub fn location_for(name: &str) -> Result<Location, ResourceError> {
        let trimmed = name.trim_start_matches('/');
        Location::parse(&format!("{MEMORY_SCHEME}:/{trimmed}"))
            .map_err(|e| ResourceError::UnsupportedLocation(e.to_string()))
    }

    fn key_for(location: &Location) -> String {
        location.as_url().path().trim_start_matches('/').to_string()
    }

    /// Add a resource to the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned,
    /// or `UnsupportedLocation` if the name cannot form a location.
    pub fn add(&self, name: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        self.add_shared(name, Arc::new(data))
    }

    /// Add a resource from shared data.
    pub fn add_shared(
        &self,
        name: impl Into<String>,
        data: SharedResourceData,
    ) -> Result<(), ResourceError> {
        let name = name.into();
        let key = Self::key_for(&Self::location_for(&name)?);
        let mut resources = self
            .resources
            .write()
            .map_err(|_| ResourceError::LoadFailed {
                path: name.clone(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources.insert(key, data);
        Ok(())
    }

    /// Remove a resource from the store.
    ///
    /// Returns `None` if the lock is poisoned or the resource doesn't exist.
    pub fn remove(&self, name: &str) -> Option<SharedResourceData> {
        let key = Self::key_for(&Self::location_for(name).ok()?);
        self.resources.write().ok()?.remove(&key)
    }

    /// Get the number of resources in the store.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.resources.read().map(|r| r.is_empty()).unwrap_or(true)
    }

    fn get(&self, key: &str, display: &str) -> Result<Option<SharedResourceData>, ResourceError> {
        let resources = self
            .resources
            .read()
            .map_err(|_| ResourceError::LoadFailed {
                path: display.to_string(),
                message: "resource store lock poisoned".to_string(),
            })?;
        Ok(resources.get(key).cloned())
    }
}

impl ResourceLocator for InMemoryResourceLocator {
    fn locate(&self, name: &str) -> Result<Option<Location>, ResourceError> {
        let location = Self::location_for(name)?;
        let found = self.get(&Self::key_for(&location), name)?.is_some();
        Ok(found.then_some(location))
    }

    fn open(&self, location: &Location) -> Result<Box<dyn Read + Send>, ResourceError> {
        if location.scheme() != MEMORY_SCHEME {
            return Err(ResourceError::UnsupportedLocation(location.to_string()));
        }
        let data = self
            .get(&Self::key_for(location), location.as_str())?
            .ok_or_else(|| ResourceError::NotFound(location.to_string()))?;
        Ok(Box::new(Cursor::new(SharedBytes(data))))
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceLocator"
    }
}
