// src/error.rs
//! The single failure type surfaced by transformer building.

use docweave_traits::{CompileError, ResourceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XsltError {
    #[error("Unable to locate resource [{0}]")]
    ResourceNotFound(String),

    #[error("Problem locating resource [{name}]: {source}")]
    Resource {
        name: String,
        #[source]
        source: ResourceError,
    },

    #[error("Problem opening stylesheet [{location}]: {source}")]
    Io {
        location: String,
        #[source]
        source: ResourceError,
    },

    #[error("Unable to build transformer [{diagnostic}] : {source}")]
    Compile {
        location: String,
        /// The engine's diagnostic location, or the stylesheet location when
        /// the engine reported none.
        diagnostic: String,
        #[source]
        source: CompileError,
    },

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl XsltError {
    pub(crate) fn compile(location: &str, source: CompileError) -> Self {
        let diagnostic = source
            .location
            .clone()
            .unwrap_or_else(|| location.to_string());
        XsltError::Compile {
            location: location.to_string(),
            diagnostic,
            source,
        }
    }

    /// Wraps a locator failure for a named resource, keeping "missing"
    /// distinct from "lookup broke".
    pub(crate) fn from_resource(name: &str, source: ResourceError) -> Self {
        match source {
            ResourceError::NotFound(_) => XsltError::ResourceNotFound(name.to_string()),
            source => XsltError::Resource {
                name: name.to_string(),
                source,
            },
        }
    }
}
