//! Resolvers consulted for `xsl:import`, `xsl:include` and `document()`
//! references, and the chain that orders them.

mod archive;
mod chain;
mod resource_path;
mod version;

pub use archive::{ARCHIVE_SCHEME, RelativeArchiveResolver};
pub use chain::ResolverChain;
pub use resource_path::{RESOURCE_PREFIXES, ResourcePathResolver};
pub use version::{DOCBOOK_XSL_NAMESPACE, LOCAL_DOCBOOK_XSL_ROOT, VersionResolver};

use crate::catalog::{CatalogManager, CatalogResolver};
use crate::config::Configuration;
use docweave_traits::{CatalogBackend, ResolveError, ResourceLocator, UriResolver};
use percent_encoding::percent_decode_str;
use std::sync::Arc;

/// Turns the escaped path of a URL into the logical name a locator expects.
fn decode_resource_name(reference: &str, path: &str) -> Result<String, ResolveError> {
    percent_decode_str(path)
        .decode_utf8()
        .map(|name| name.into_owned())
        .map_err(|e| ResolveError::InvalidReference {
            reference: reference.to_string(),
            message: format!("resource name is not UTF-8: {e}"),
        })
}

/// The standard chain: version-aware, relative-archive, resource-path, and
/// finally `catalog`.
pub fn standard_chain(
    locator: &Arc<dyn ResourceLocator>,
    docbook_xsl_version: Option<&str>,
    catalog: Arc<dyn UriResolver>,
) -> ResolverChain {
    ResolverChain::new()
        .with_resolver(Arc::new(VersionResolver::new(
            Arc::clone(locator),
            docbook_xsl_version.map(str::to_string),
        )))
        .with_resolver(Arc::new(RelativeArchiveResolver::new()))
        .with_resolver(Arc::new(ResourcePathResolver::new(Arc::clone(locator))))
        .with_resolver(catalog)
}

/// What every standard chain of one build session is made from.
///
/// The catalog manager is selected here, once; each [`chain`](Self::chain)
/// shares the same catalog resolver.
#[derive(Debug, Clone)]
pub struct StandardResolvers {
    locator: Arc<dyn ResourceLocator>,
    docbook_xsl_version: Option<String>,
    catalog_resolver: Arc<CatalogResolver>,
}

impl StandardResolvers {
    pub fn from_configuration(
        configuration: &Configuration,
        locator: Arc<dyn ResourceLocator>,
        catalog_backend: Arc<dyn CatalogBackend>,
    ) -> Self {
        let manager = CatalogManager::select(&configuration.catalogs);
        Self {
            locator,
            docbook_xsl_version: configuration.docbook_xsl_version.clone(),
            catalog_resolver: Arc::new(CatalogResolver::new(manager, catalog_backend)),
        }
    }

    pub fn locator(&self) -> &Arc<dyn ResourceLocator> {
        &self.locator
    }

    pub fn catalog_resolver(&self) -> &Arc<CatalogResolver> {
        &self.catalog_resolver
    }

    /// A fresh standard chain.
    pub fn chain(&self) -> ResolverChain {
        standard_chain(
            &self.locator,
            self.docbook_xsl_version.as_deref(),
            self.catalog_resolver.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NoCatalogBackend;
    use docweave_traits::InMemoryResourceLocator;
    use std::path::PathBuf;

    fn resolvers(configuration: &Configuration) -> StandardResolvers {
        let locator = InMemoryResourceLocator::new();
        locator.add("docbook-xsl/html/chunk.xsl", vec![]).unwrap();
        StandardResolvers::from_configuration(
            configuration,
            Arc::new(locator),
            Arc::new(NoCatalogBackend),
        )
    }

    #[test]
    fn test_chain_follows_configuration() {
        let configuration = Configuration::default()
            .with_catalog("catalog.xml")
            .with_docbook_xsl_version("1.76.1");
        let resolvers = resolvers(&configuration);

        let manager = resolvers.catalog_resolver().manager();
        assert_eq!(manager.catalog_files(), &[PathBuf::from("catalog.xml")]);

        let chain = resolvers.chain();
        let pinned = "http://docbook.sourceforge.net/release/xsl/1.76.1/html/chunk.xsl";
        assert!(chain.resolve(pinned, None).unwrap().is_some());
        let other = "http://docbook.sourceforge.net/release/xsl/1.69.0/html/chunk.xsl";
        assert!(chain.resolve(other, None).unwrap().is_none());
    }

    #[test]
    fn test_chains_share_the_catalog_resolver() {
        let resolvers = resolvers(&Configuration::default());
        let _first = resolvers.chain();
        let _second = resolvers.chain();
        assert_eq!(Arc::strong_count(resolvers.catalog_resolver()), 3);
    }

    #[test]
    fn test_decode_resource_name() {
        assert_eq!(decode_resource_name("r", "a%20b/c.xsl").unwrap(), "a b/c.xsl");
        assert!(matches!(
            decode_resource_name("r", "bad%FF.xsl"),
            Err(ResolveError::InvalidReference { .. })
        ));
    }
}
