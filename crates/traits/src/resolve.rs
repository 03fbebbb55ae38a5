//! URI resolution contracts.
//!
//! A resolver either answers with a [`Location`], declines with `Ok(None)`,
//! or fails. Declining hands the reference on to the next resolver; failing
//! stops resolution altogether.

use crate::location::{Location, LocationError};
use crate::resource::ResourceError;
use std::fmt::Debug;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    #[error("Invalid reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    #[error("Resource lookup failed: {0}")]
    Resource(#[from] ResourceError),

    #[error("Catalog lookup failed for '{reference}': {message}")]
    Catalog { reference: String, message: String },
}

impl From<LocationError> for ResolveError {
    fn from(err: LocationError) -> Self {
        let reference = match &err {
            LocationError::Invalid { input, .. } => input.clone(),
            LocationError::Relative(input) => input.clone(),
        };
        ResolveError::InvalidReference {
            reference,
            message: err.to_string(),
        }
    }
}

/// Turns a reference found in a stylesheet (`xsl:import`, `xsl:include`,
/// `document()`) into a concrete location.
pub trait UriResolver: Send + Sync + Debug {
    /// Resolve `href`, optionally relative to the `base` it appeared in.
    fn resolve(&self, href: &str, base: Option<&str>) -> Result<Option<Location>, ResolveError>;

    /// Returns a human-readable name for this resolver (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An XML catalog library, consulted with the catalog files chosen by the
/// active catalog manager.
pub trait CatalogBackend: Send + Sync + Debug {
    fn resolve(
        &self,
        catalog_files: &[PathBuf],
        reference: &str,
        base: Option<&str>,
    ) -> Result<Option<Location>, ResolveError>;

    fn name(&self) -> &'static str;
}
