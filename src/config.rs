//! Build-session settings, read once and then treated as immutable.

use crate::cache::EvictionPolicy;
use crate::error::XsltError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Which XSL-FO post-processor extension set the DocBook stylesheets target.
///
/// The two dialects are mutually exclusive: exactly one of the
/// `fop.extensions` / `fop1.extensions` parameters is switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionDialect {
    /// FOP 0.20.x extensions.
    LegacyFop,
    /// FOP 1.x extensions. (Default)
    #[default]
    Fop1,
}

impl ExtensionDialect {
    /// Baseline `(fop.extensions, fop1.extensions)` values.
    pub fn baseline(self) -> (&'static str, &'static str) {
        match self {
            ExtensionDialect::LegacyFop => ("1", "0"),
            ExtensionDialect::Fop1 => ("0", "1"),
        }
    }
}

/// Per-format overrides layered over the standard format plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    pub name: String,
    pub stylesheet_resource: Option<String>,
    pub target_extension: Option<String>,
    pub image_copying_required: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    pub eviction: EvictionPolicy,
}

/// Settings for one build session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Explicit XML catalog files. Empty means "discover catalogs".
    pub catalogs: Vec<PathBuf>,
    /// Stylesheet parameters applied to every transformer, after the baseline.
    pub transformer_parameters: BTreeMap<String, String>,
    /// The DocBook XSL release the bundled stylesheets correspond to.
    pub docbook_xsl_version: Option<String>,
    pub extension_dialect: ExtensionDialect,
    pub formats: Vec<FormatOptions>,
    pub cache: CacheConfig,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, XsltError> {
        let config: Configuration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, XsltError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            XsltError::ConfigIo(std::io::Error::new(
                e.kind(),
                format!("Failed to read configuration from '{}': {}", path.display(), e),
            ))
        })?;
        Self::from_json_str(&text)
    }

    pub fn with_catalog<P: Into<PathBuf>>(mut self, catalog: P) -> Self {
        self.catalogs.push(catalog.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.transformer_parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_docbook_xsl_version(mut self, version: impl Into<String>) -> Self {
        self.docbook_xsl_version = Some(version.into());
        self
    }

    pub fn with_extension_dialect(mut self, dialect: ExtensionDialect) -> Self {
        self.extension_dialect = dialect;
        self
    }

    pub fn with_format(mut self, options: FormatOptions) -> Self {
        self.formats.push(options);
        self
    }

    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.cache.eviction = eviction;
        self
    }

    /// Overrides configured for the named format, if any.
    pub fn format_options(&self, name: &str) -> Option<&FormatOptions> {
        self.formats.iter().find(|f| f.name == name)
    }

    fn validate(&self) -> Result<(), XsltError> {
        if let Some(version) = &self.docbook_xsl_version
            && (version.is_empty() || version.contains('/'))
        {
            return Err(XsltError::Config(format!(
                "docbookXslVersion '{version}' is not a release number"
            )));
        }
        if let Some(unnamed) = self.formats.iter().position(|f| f.name.is_empty()) {
            return Err(XsltError::Config(format!(
                "format override #{unnamed} has no name"
            )));
        }
        Ok(())
    }
}
