//! XSLT engine boundary.
//!
//! The builder compiles and configures stylesheets but never executes them
//! itself; an engine adapter implements these traits.

use crate::location::Location;
use crate::resolve::{ResolveError, UriResolver};
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;
use thiserror::Error;

/// Document content paired with the system identifier it was read from.
///
/// The reader is owned, so it is released as soon as the consumer drops the
/// source, whether or not consumption succeeded.
pub struct Source {
    system_id: Location,
    content: Box<dyn Read + Send>,
}

impl Source {
    pub fn new(system_id: Location, content: Box<dyn Read + Send>) -> Self {
        Self { system_id, content }
    }

    pub fn system_id(&self) -> &Location {
        &self.system_id
    }

    pub fn into_parts(self) -> (Location, Box<dyn Read + Send>) {
        (self.system_id, self.content)
    }

    /// Reads the remaining content into a string.
    pub fn read_to_string(mut self) -> std::io::Result<(Location, String)> {
        let mut text = String::new();
        self.content.read_to_string(&mut text)?;
        Ok((self.system_id, text))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("system_id", &self.system_id.as_str())
            .field("content", &"Box<dyn Read>")
            .finish()
    }
}

/// A stylesheet failed to compile, or a transformer could not be created
/// from a compiled stylesheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CompileError {
    /// Where in the stylesheet the engine noticed the problem, if it knows.
    pub location: Option<String>,
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            location: None,
            message: message.into(),
        }
    }

    pub fn at(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            message: message.into(),
        }
    }
}

impl From<ResolveError> for CompileError {
    fn from(err: ResolveError) -> Self {
        CompileError::new(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Transformation failed: {0}")]
    Failed(String),

    #[error("I/O error during transformation: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reference resolution failed during transformation: {0}")]
    Resolve(#[from] ResolveError),
}

#[derive(Error, Debug)]
#[error("Diagnostic channel unavailable: {0}")]
pub struct DiagnosticError(pub String);

/// Compiles stylesheet sources into reusable programs.
pub trait XsltEngine: Send + Sync + fmt::Debug {
    /// Compile `source`. Imports and includes inside the stylesheet are to be
    /// resolved through `resolver`.
    fn compile(
        &self,
        source: Source,
        resolver: Arc<dyn UriResolver>,
    ) -> Result<Arc<dyn CompiledStylesheet>, CompileError>;

    fn name(&self) -> &'static str;
}

/// A compiled, reusable stylesheet program.
pub trait CompiledStylesheet: Send + Sync + fmt::Debug {
    fn new_transformer(&self) -> Result<Box<dyn Transformer>, CompileError>;
}

/// Where `xsl:message` output of a running stylesheet goes.
pub trait DiagnosticSink {
    fn redirect_messages(&mut self, writer: Box<dyn Write + Send>) -> Result<(), DiagnosticError>;
}

/// A single execution context derived from a [`CompiledStylesheet`].
pub trait Transformer: Send + fmt::Debug {
    fn set_uri_resolver(&mut self, resolver: Arc<dyn UriResolver>);

    fn uri_resolver(&self) -> Option<Arc<dyn UriResolver>>;

    fn set_parameter(&mut self, name: &str, value: &str);

    fn parameter(&self, name: &str) -> Option<&str>;

    /// The stylesheet message channel, for engines that have one.
    fn diagnostics(&mut self) -> Option<&mut dyn DiagnosticSink> {
        None
    }

    fn transform(&mut self, input: Source, output: &mut dyn Write) -> Result<(), TransformError>;
}
