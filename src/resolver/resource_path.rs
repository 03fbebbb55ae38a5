use super::decode_resource_name;
use docweave_traits::{Location, ResolveError, ResourceLocator, UriResolver};
use std::sync::Arc;

/// Reference prefixes naming a logical resource rather than a URL.
pub const RESOURCE_PREFIXES: [&str; 2] = ["resource:/", "classpath:/"];

/// Resolves `resource:/` (and the older `classpath:/`) references through
/// the resource locator.
#[derive(Debug)]
pub struct ResourcePathResolver {
    locator: Arc<dyn ResourceLocator>,
}

impl ResourcePathResolver {
    pub fn new(locator: Arc<dyn ResourceLocator>) -> Self {
        Self { locator }
    }
}

impl UriResolver for ResourcePathResolver {
    fn resolve(&self, href: &str, _base: Option<&str>) -> Result<Option<Location>, ResolveError> {
        if !RESOURCE_PREFIXES.iter().any(|prefix| href.starts_with(prefix)) {
            return Ok(None);
        }

        let location = Location::parse(href)?;
        let name = decode_resource_name(href, location.as_url().path().trim_start_matches('/'))?;
        if name.is_empty() {
            return Err(ResolveError::InvalidReference {
                reference: href.to_string(),
                message: "no resource name".to_string(),
            });
        }
        Ok(self.locator.locate(&name)?)
    }

    fn name(&self) -> &'static str {
        "ResourcePathResolver"
    }
}
