pub mod engine;
pub mod location;
pub mod resolve;
pub mod resource;

pub use engine::{
    CompileError, CompiledStylesheet, DiagnosticError, DiagnosticSink, Source, TransformError,
    Transformer, XsltEngine,
};
pub use location::{Location, LocationError};
pub use resolve::{CatalogBackend, ResolveError, UriResolver};
pub use resource::{InMemoryResourceLocator, ResourceError, ResourceLocator, SharedResourceData};
