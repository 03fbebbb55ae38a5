#![allow(dead_code)]

//! Stand-ins for the engine, locator and catalog library.
//!
//! The fake stylesheet language is line based:
//! - `import <href>` is resolved through the compile-time resolver
//! - `message <text>` is emitted on the message channel when transforming
//! - `syntax-error` fails compilation at that line

use docweave::traits::InMemoryResourceLocator;
use docweave::traits::{DiagnosticError, TransformError};
use docweave::{
    CatalogBackend, CompileError, CompiledStylesheet, DiagnosticSink, Location, ResolveError,
    ResourceError, ResourceLocator, Source, Transformer, UriResolver, XsltEngine,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Where messages end up when nobody redirects them.
#[derive(Debug, Default, Clone)]
pub struct MessageLog(Arc<Mutex<Vec<String>>>);

impl MessageLog {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, line: &str) {
        self.0.lock().unwrap().push(line.to_string());
    }
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    compiles: AtomicUsize,
    last_resolver: Mutex<Option<Arc<dyn UriResolver>>>,
    console: MessageLog,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compiles(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }

    /// The resolver handed to the most recent compile.
    pub fn last_resolver(&self) -> Option<Arc<dyn UriResolver>> {
        self.last_resolver.lock().unwrap().clone()
    }

    pub fn console(&self) -> &MessageLog {
        &self.console
    }
}

impl XsltEngine for FakeEngine {
    fn compile(
        &self,
        source: Source,
        resolver: Arc<dyn UriResolver>,
    ) -> Result<Arc<dyn CompiledStylesheet>, CompileError> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        *self.last_resolver.lock().unwrap() = Some(Arc::clone(&resolver));

        let (system_id, text) = source
            .read_to_string()
            .map_err(|e| CompileError::new(e.to_string()))?;

        let mut imports = Vec::new();
        let mut messages = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            let at = format!("{}: line {}", system_id, index + 1);
            if let Some(href) = line.strip_prefix("import ") {
                match resolver.resolve(href, Some(system_id.as_str()))? {
                    Some(location) => imports.push(location),
                    None => {
                        return Err(CompileError::at(at, format!("cannot resolve import '{href}'")));
                    }
                }
            } else if let Some(message) = line.strip_prefix("message ") {
                messages.push(message.to_string());
            } else if line == "syntax-error" {
                return Err(CompileError::at(at, "unexpected token"));
            }
        }

        Ok(Arc::new(FakeStylesheet {
            system_id,
            imports,
            messages,
            console: self.console.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "FakeEngine"
    }
}

#[derive(Debug)]
pub struct FakeStylesheet {
    system_id: Location,
    imports: Vec<Location>,
    messages: Vec<String>,
    console: MessageLog,
}

impl CompiledStylesheet for FakeStylesheet {
    fn new_transformer(&self) -> Result<Box<dyn Transformer>, CompileError> {
        Ok(Box::new(FakeTransformer {
            system_id: self.system_id.clone(),
            imports: self.imports.clone(),
            messages: self.messages.clone(),
            resolver: None,
            parameters: BTreeMap::new(),
            console: self.console.clone(),
            redirect: None,
        }))
    }
}

pub struct FakeTransformer {
    system_id: Location,
    imports: Vec<Location>,
    messages: Vec<String>,
    resolver: Option<Arc<dyn UriResolver>>,
    parameters: BTreeMap<String, String>,
    console: MessageLog,
    redirect: Option<Box<dyn Write + Send>>,
}

impl fmt::Debug for FakeTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeTransformer")
            .field("system_id", &self.system_id.as_str())
            .field("parameters", &self.parameters)
            .field("redirected", &self.redirect.is_some())
            .finish()
    }
}

impl DiagnosticSink for FakeTransformer {
    fn redirect_messages(&mut self, writer: Box<dyn Write + Send>) -> Result<(), DiagnosticError> {
        self.redirect = Some(writer);
        Ok(())
    }
}

impl Transformer for FakeTransformer {
    fn set_uri_resolver(&mut self, resolver: Arc<dyn UriResolver>) {
        self.resolver = Some(resolver);
    }

    fn uri_resolver(&self) -> Option<Arc<dyn UriResolver>> {
        self.resolver.clone()
    }

    fn set_parameter(&mut self, name: &str, value: &str) {
        self.parameters.insert(name.to_string(), value.to_string());
    }

    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    fn diagnostics(&mut self) -> Option<&mut dyn DiagnosticSink> {
        Some(self)
    }

    fn transform(&mut self, input: Source, output: &mut dyn Write) -> Result<(), TransformError> {
        for message in &self.messages {
            match self.redirect.as_mut() {
                Some(writer) => writeln!(writer, "{message}")?,
                None => self.console.push(message),
            }
        }

        let (input_id, mut reader) = input.into_parts();
        let mut body = String::new();
        reader.read_to_string(&mut body)?;

        writeln!(output, "stylesheet={}", self.system_id)?;
        writeln!(output, "input={} ({} bytes)", input_id, body.len())?;
        for import in &self.imports {
            writeln!(output, "import={import}")?;
        }
        for (name, value) in &self.parameters {
            writeln!(output, "{name}={value}")?;
        }
        Ok(())
    }
}

/// In-memory locator that counts how often each location is opened.
#[derive(Debug, Default)]
pub struct CountingLocator {
    inner: InMemoryResourceLocator,
    opens: Mutex<HashMap<String, usize>>,
}

impl CountingLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, name: &str, content: &str) {
        self.inner.add(name, content.as_bytes().to_vec()).unwrap();
    }

    pub fn opens_of(&self, location: &Location) -> usize {
        self.opens
            .lock()
            .unwrap()
            .get(location.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn total_opens(&self) -> usize {
        self.opens.lock().unwrap().values().sum()
    }
}

impl ResourceLocator for CountingLocator {
    fn locate(&self, name: &str) -> Result<Option<Location>, ResourceError> {
        self.inner.locate(name)
    }

    fn open(&self, location: &Location) -> Result<Box<dyn Read + Send>, ResourceError> {
        *self
            .opens
            .lock()
            .unwrap()
            .entry(location.as_str().to_string())
            .or_insert(0) += 1;
        self.inner.open(location)
    }

    fn name(&self) -> &'static str {
        "CountingLocator"
    }
}

/// Catalog backend answering from a fixed table and recording its lookups.
#[derive(Debug, Default)]
pub struct RecordingCatalog {
    entries: HashMap<String, Location>,
    lookups: Mutex<Vec<(Vec<PathBuf>, String)>>,
}

impl RecordingCatalog {
    pub fn declining() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, reference: &str, location: &str) -> Self {
        self.entries
            .insert(reference.to_string(), Location::parse(location).unwrap());
        self
    }

    pub fn lookups(&self) -> Vec<(Vec<PathBuf>, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

impl CatalogBackend for RecordingCatalog {
    fn resolve(
        &self,
        catalog_files: &[PathBuf],
        reference: &str,
        _base: Option<&str>,
    ) -> Result<Option<Location>, ResolveError> {
        self.lookups
            .lock()
            .unwrap()
            .push((catalog_files.to_vec(), reference.to_string()));
        Ok(self.entries.get(reference).cloned())
    }

    fn name(&self) -> &'static str {
        "RecordingCatalog"
    }
}
