// src/builder.rs
use crate::cache::StylesheetCache;
use crate::catalog::{CatalogResolver, NoCatalogBackend};
use crate::config::Configuration;
use crate::configure::configure_transformer;
use crate::error::XsltError;
use crate::format::{FormatPlan, StandardFormat};
use crate::resolver::{ResolverChain, StandardResolvers};
use docweave_traits::{
    CatalogBackend, Location, ResourceLocator, Source, Transformer, UriResolver, XsltEngine,
};
use std::sync::Arc;

/// Builds configured transformers, compiling each distinct stylesheet once.
///
/// The catalog manager is chosen when the builder is created and does not
/// change afterwards. A builder is meant to be driven from one thread; every
/// build call takes `&mut self`.
#[derive(Debug)]
pub struct TransformerBuilder {
    configuration: Configuration,
    resolvers: StandardResolvers,
    engine: Arc<dyn XsltEngine>,
    cache: StylesheetCache,
}

impl TransformerBuilder {
    /// Creates a builder whose catalog resolver has no catalog library
    /// behind it; see [`with_catalog_backend`](Self::with_catalog_backend).
    pub fn new(
        configuration: Configuration,
        locator: Arc<dyn ResourceLocator>,
        engine: Arc<dyn XsltEngine>,
    ) -> Self {
        Self::with_catalog_backend(configuration, locator, engine, Arc::new(NoCatalogBackend))
    }

    pub fn with_catalog_backend(
        configuration: Configuration,
        locator: Arc<dyn ResourceLocator>,
        engine: Arc<dyn XsltEngine>,
        catalog_backend: Arc<dyn CatalogBackend>,
    ) -> Self {
        let resolvers =
            StandardResolvers::from_configuration(&configuration, locator, catalog_backend);
        let cache = StylesheetCache::new(configuration.cache.eviction);
        log::debug!(
            "Transformer builder ready: engine={}, locator={}",
            engine.name(),
            resolvers.locator().name()
        );
        Self {
            configuration,
            resolvers,
            engine,
            cache,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The catalog resolver shared by every standard chain of this builder.
    pub fn catalog_resolver(&self) -> &Arc<CatalogResolver> {
        self.resolvers.catalog_resolver()
    }

    pub fn cache(&self) -> &StylesheetCache {
        &self.cache
    }

    /// A fresh standard chain ending in this builder's catalog resolver.
    pub fn standard_uri_resolver(&self) -> ResolverChain {
        self.resolvers.chain()
    }

    /// Builds a transformer for the stylesheet at `xslt`.
    pub fn build_standard_transformer(
        &mut self,
        xslt: &Location,
    ) -> Result<Box<dyn Transformer>, XsltError> {
        let resolver: Arc<dyn UriResolver> = Arc::new(self.standard_uri_resolver());
        self.build_transformer_with(xslt, resolver)
    }

    /// Builds a transformer for a stylesheet named by logical resource.
    pub fn build_standard_transformer_for_resource(
        &mut self,
        xslt_resource: &str,
    ) -> Result<Box<dyn Transformer>, XsltError> {
        let xslt = self.require_resource(xslt_resource)?;
        self.build_standard_transformer(&xslt)
    }

    /// Builds a transformer for a format plan. `custom_stylesheet`, when
    /// given, replaces the plan's own stylesheet.
    pub fn build_transformer(
        &mut self,
        format_plan: &FormatPlan,
        custom_stylesheet: Option<&Location>,
    ) -> Result<Box<dyn Transformer>, XsltError> {
        let resolver: Arc<dyn UriResolver> = Arc::new(self.standard_uri_resolver());
        let xslt = match custom_stylesheet {
            Some(custom) => custom.clone(),
            None => self.require_resource(format_plan.stylesheet_resource())?,
        };
        log::info!("Building '{}' transformer from {}", format_plan.name(), xslt);
        self.build_transformer_with(&xslt, resolver)
    }

    /// The plan for a named format: a standard DocBook format, a configured
    /// custom format, or a standard one with configured overrides.
    pub fn format_plan(&self, name: &str) -> Result<FormatPlan, XsltError> {
        let standard = name.parse::<StandardFormat>().ok().map(FormatPlan::standard);
        match (standard, self.configuration.format_options(name)) {
            (Some(plan), Some(options)) => Ok(plan.with_options(options)),
            (Some(plan), None) => Ok(plan),
            (None, Some(options)) => {
                let resource = options.stylesheet_resource.clone().ok_or_else(|| {
                    XsltError::Config(format!(
                        "format '{name}' is not a standard format and names no stylesheetResource"
                    ))
                })?;
                Ok(FormatPlan::new(name, resource).with_options(options))
            }
            (None, None) => Err(XsltError::UnknownFormat(name.to_string())),
        }
    }

    fn require_resource(&self, name: &str) -> Result<Location, XsltError> {
        self.resolvers
            .locator()
            .require(name)
            .map_err(|e| XsltError::from_resource(name, e))
    }

    fn build_transformer_with(
        &mut self,
        xslt: &Location,
        resolver: Arc<dyn UriResolver>,
    ) -> Result<Box<dyn Transformer>, XsltError> {
        let engine = Arc::clone(&self.engine);
        let locator = Arc::clone(self.resolvers.locator());
        let compile_resolver = Arc::clone(&resolver);

        let compiled = self.cache.get_or_compile(xslt, || {
            let content = locator.open(xslt).map_err(|source| XsltError::Io {
                location: xslt.to_string(),
                source,
            })?;
            // content is consumed (and dropped) by compile on every path
            engine
                .compile(Source::new(xslt.clone(), content), compile_resolver)
                .map_err(|e| XsltError::compile(xslt.as_str(), e))
        })?;

        let mut transformer = compiled
            .new_transformer()
            .map_err(|e| XsltError::compile(xslt.as_str(), e))?;

        configure_transformer(
            transformer.as_mut(),
            resolver,
            self.configuration.extension_dialect,
            &self.configuration.transformer_parameters,
        );
        Ok(transformer)
    }
}
