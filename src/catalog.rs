//! XML catalog wiring: which catalog files are in play and the resolver
//! that consults them.
//!
//! The catalog format itself is handled by a [`CatalogBackend`]; this module
//! only decides *which* catalogs the backend sees.

use docweave_traits::{CatalogBackend, Location, ResolveError, UriResolver};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable listing catalog files, whitespace separated.
pub const CATALOG_FILES_ENV: &str = "XML_CATALOG_FILES";

/// Catalog consulted when the environment names none.
pub const SYSTEM_CATALOG: &str = "/etc/xml/catalog";

/// Catalogs found through the environment's default discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplicitCatalogManager {
    catalog_files: Vec<PathBuf>,
}

impl ImplicitCatalogManager {
    pub fn discover() -> Self {
        let from_env = env::var(CATALOG_FILES_ENV).ok();
        Self::from_sources(from_env.as_deref(), Path::new(SYSTEM_CATALOG))
    }

    fn from_sources(env_value: Option<&str>, system_catalog: &Path) -> Self {
        let mut catalog_files: Vec<PathBuf> = env_value
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(parse_catalog_entry)
            .collect();

        if catalog_files.is_empty() && system_catalog.is_file() {
            catalog_files.push(system_catalog.to_path_buf());
        }
        Self { catalog_files }
    }

    pub fn catalog_files(&self) -> &[PathBuf] {
        &self.catalog_files
    }
}

fn parse_catalog_entry(entry: &str) -> Option<PathBuf> {
    if entry.starts_with("file:") {
        let path = match Location::parse(entry) {
            Ok(location) => location.to_file_path(),
            Err(e) => {
                log::warn!(
                    "Ignoring catalog entry '{}' from {}: {}",
                    entry,
                    CATALOG_FILES_ENV,
                    e
                );
                return None;
            }
        };
        if path.is_none() {
            log::warn!("Ignoring catalog entry '{}' from {}", entry, CATALOG_FILES_ENV);
        }
        return path;
    }
    Some(PathBuf::from(entry))
}

/// Exactly the catalogs the caller listed; default discovery is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitCatalogManager {
    catalog_files: Vec<PathBuf>,
}

impl ExplicitCatalogManager {
    pub fn new(catalog_files: Vec<PathBuf>) -> Self {
        Self { catalog_files }
    }

    pub fn catalog_files(&self) -> &[PathBuf] {
        &self.catalog_files
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogManager {
    Implicit(ImplicitCatalogManager),
    Explicit(ExplicitCatalogManager),
}

impl CatalogManager {
    /// Implicit discovery when no catalogs are configured, otherwise exactly
    /// the configured list.
    pub fn select(catalogs: &[PathBuf]) -> Self {
        let manager = if catalogs.is_empty() {
            CatalogManager::Implicit(ImplicitCatalogManager::discover())
        } else {
            CatalogManager::Explicit(ExplicitCatalogManager::new(catalogs.to_vec()))
        };
        log::info!(
            "Using {} catalog manager with {} catalog file(s)",
            if manager.uses_default_discovery() { "implicit" } else { "explicit" },
            manager.catalog_files().len()
        );
        manager
    }

    pub fn catalog_files(&self) -> &[PathBuf] {
        match self {
            CatalogManager::Implicit(m) => m.catalog_files(),
            CatalogManager::Explicit(m) => m.catalog_files(),
        }
    }

    pub fn uses_default_discovery(&self) -> bool {
        matches!(self, CatalogManager::Implicit(_))
    }
}

/// A backend with no catalog support: every lookup declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCatalogBackend;

impl CatalogBackend for NoCatalogBackend {
    fn resolve(
        &self,
        _catalog_files: &[PathBuf],
        _reference: &str,
        _base: Option<&str>,
    ) -> Result<Option<Location>, ResolveError> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "NoCatalogBackend"
    }
}

/// Terminal resolver of every standard chain.
#[derive(Debug)]
pub struct CatalogResolver {
    manager: CatalogManager,
    backend: Arc<dyn CatalogBackend>,
}

impl CatalogResolver {
    pub fn new(manager: CatalogManager, backend: Arc<dyn CatalogBackend>) -> Self {
        Self { manager, backend }
    }

    pub fn manager(&self) -> &CatalogManager {
        &self.manager
    }

    pub fn backend(&self) -> &Arc<dyn CatalogBackend> {
        &self.backend
    }
}

impl UriResolver for CatalogResolver {
    fn resolve(&self, href: &str, base: Option<&str>) -> Result<Option<Location>, ResolveError> {
        let resolved = self
            .backend
            .resolve(self.manager.catalog_files(), href, base)?;
        log::trace!(
            "{} catalog lookup of '{}': {:?}",
            self.backend.name(),
            href,
            resolved.as_ref().map(Location::as_str)
        );
        Ok(resolved)
    }

    fn name(&self) -> &'static str {
        "CatalogResolver"
    }
}
