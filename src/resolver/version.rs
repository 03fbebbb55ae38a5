use super::decode_resource_name;
use docweave_traits::{Location, ResolveError, ResourceLocator, UriResolver};
use std::sync::Arc;

/// Namespace under which DocBook XSL stylesheets publish their modules.
pub const DOCBOOK_XSL_NAMESPACE: &str = "http://docbook.sourceforge.net/release/xsl/";

/// Resource directory holding the locally available DocBook XSL release.
pub const LOCAL_DOCBOOK_XSL_ROOT: &str = "docbook-xsl";

/// Path of [`DOCBOOK_XSL_NAMESPACE`] within its host.
const NAMESPACE_PATH: &str = "/release/xsl/";

const CURRENT_RELEASE: &str = "current";

/// Maps versioned DocBook XSL URLs onto the locally available release.
///
/// `.../xsl/current/<path>` always maps. A pinned `.../xsl/<version>/<path>`
/// maps when it matches the configured release, or when no release is
/// configured; a mismatched pin is left for the catalog.
#[derive(Debug)]
pub struct VersionResolver {
    locator: Arc<dyn ResourceLocator>,
    version: Option<String>,
}

impl VersionResolver {
    pub fn new(locator: Arc<dyn ResourceLocator>, version: Option<String>) -> Self {
        Self { locator, version }
    }

    /// The reference as an absolute URL in the DocBook XSL namespace.
    fn absolute_reference(
        href: &str,
        base: Option<&str>,
    ) -> Result<Option<Location>, ResolveError> {
        if href.starts_with(DOCBOOK_XSL_NAMESPACE) {
            return Ok(Some(Location::parse(href)?));
        }
        match base {
            Some(base)
                if base.starts_with(DOCBOOK_XSL_NAMESPACE)
                    && Location::is_relative_reference(href) =>
            {
                Ok(Some(Location::parse(base)?.join(href)?))
            }
            _ => Ok(None),
        }
    }

    fn accepts(&self, release: &str) -> bool {
        release == CURRENT_RELEASE || self.version.as_deref().is_none_or(|v| v == release)
    }
}

impl UriResolver for VersionResolver {
    fn resolve(&self, href: &str, base: Option<&str>) -> Result<Option<Location>, ResolveError> {
        let Some(absolute) = Self::absolute_reference(href, base)? else {
            return Ok(None);
        };
        // query and fragment never name a module
        let Some((release, path)) = absolute
            .as_url()
            .path()
            .strip_prefix(NAMESPACE_PATH)
            .and_then(|rest| rest.split_once('/'))
        else {
            return Ok(None);
        };
        if path.is_empty() {
            return Ok(None);
        }
        if !self.accepts(release) {
            log::trace!(
                "'{}' pins DocBook XSL {} but {:?} is configured",
                href,
                release,
                self.version
            );
            return Ok(None);
        }

        let name = format!("{LOCAL_DOCBOOK_XSL_ROOT}/{}", decode_resource_name(href, path)?);
        Ok(self.locator.locate(&name)?)
    }

    fn name(&self) -> &'static str {
        "VersionResolver"
    }
}
