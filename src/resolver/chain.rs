use docweave_traits::{Location, ResolveError, UriResolver};
use std::sync::Arc;

/// An ordered list of resolvers; the first one to answer wins.
///
/// A declining resolver (`Ok(None)`) passes the reference on. An error stops
/// the walk and is returned as is. When every resolver declines the chain
/// declines too, leaving the reference to default resolution.
#[derive(Debug, Default, Clone)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn UriResolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resolver(&mut self, resolver: Arc<dyn UriResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn UriResolver>) -> Self {
        self.add_resolver(resolver);
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Names of the member resolvers, in consultation order.
    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }
}

impl UriResolver for ResolverChain {
    fn resolve(&self, href: &str, base: Option<&str>) -> Result<Option<Location>, ResolveError> {
        for resolver in &self.resolvers {
            if let Some(location) = resolver.resolve(href, base)? {
                log::debug!("'{}' resolved by {} to {}", href, resolver.name(), location);
                return Ok(Some(location));
            }
            log::trace!("{} declined '{}'", resolver.name(), href);
        }
        log::debug!("'{}' unresolved by chain; deferring to default resolution", href);
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "ResolverChain"
    }
}
