//! # docweave
//!
//! Builds and caches XSLT transformers for DocBook output generation.
//!
//! - **resolver**: the resolver chain consulted for imports, includes and `document()`
//! - **catalog**: catalog manager selection and the catalog-backed resolver
//! - **cache**: compiled stylesheets, keyed by canonical location
//! - **configure**: baseline and caller parameters applied to each transformer
//! - **builder**: [`TransformerBuilder`], tying the above together
//!
//! ## Design Principle
//!
//! Neither an XSLT processor nor an XML catalog implementation lives here.
//! Both are reached through traits in `docweave-traits`, which callers
//! implement for the engine and catalog library they use.

pub use docweave_resource as resource;
pub use docweave_traits as traits;

pub mod builder;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod configure;
pub mod error;
pub mod format;
pub mod resolver;

pub use builder::TransformerBuilder;
pub use cache::{CacheKey, CacheStats, EvictionPolicy, StylesheetCache};
pub use catalog::{
    CatalogManager, CatalogResolver, ExplicitCatalogManager, ImplicitCatalogManager,
    NoCatalogBackend,
};
pub use config::{CacheConfig, Configuration, ExtensionDialect, FormatOptions};
pub use configure::{FOP1_EXTENSIONS, FOP_EXTENSIONS, configure_transformer};
pub use error::XsltError;
pub use format::{FormatPlan, StandardFormat};
pub use resolver::{
    RelativeArchiveResolver, ResolverChain, ResourcePathResolver, StandardResolvers,
    VersionResolver, standard_chain,
};

pub use traits::{
    CatalogBackend, CompileError, CompiledStylesheet, DiagnosticSink, Location, ResolveError,
    ResourceError, ResourceLocator, Source, Transformer, UriResolver, XsltEngine,
};
