#![allow(dead_code)]

pub mod fakes;

pub use fakes::{CountingLocator, FakeEngine, MessageLog, RecordingCatalog};

use docweave::{Configuration, Location, Source, TransformerBuilder};
use std::io::Cursor;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A stylesheet with no imports.
pub const PLAIN_STYLESHEET: &str = "<xsl:stylesheet version=\"1.0\"/>\n";

/// Location of a resource added to the harness locator.
pub fn mem(name: &str) -> Location {
    Location::parse(&format!("mem:/{name}")).unwrap()
}

/// An input document for `Transformer::transform`.
pub fn input(name: &str, body: &str) -> Source {
    Source::new(mem(name), Box::new(Cursor::new(body.as_bytes().to_vec())))
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Everything a builder test needs to inspect afterwards.
pub struct Harness {
    pub builder: TransformerBuilder,
    pub engine: Arc<FakeEngine>,
    pub locator: Arc<CountingLocator>,
    pub catalog: Arc<RecordingCatalog>,
}

/// A builder over a counting in-memory locator pre-populated with
/// `resources`, a fake engine, and a catalog backend that declines.
pub fn harness(configuration: Configuration, resources: &[(&str, &str)]) -> Harness {
    harness_with_catalog(configuration, resources, RecordingCatalog::declining())
}

pub fn harness_with_catalog(
    configuration: Configuration,
    resources: &[(&str, &str)],
    catalog: RecordingCatalog,
) -> Harness {
    init_logging();
    let locator = Arc::new(CountingLocator::new());
    for (name, content) in resources {
        locator.add(name, content);
    }
    let engine = Arc::new(FakeEngine::new());
    let catalog = Arc::new(catalog);
    let builder = TransformerBuilder::with_catalog_backend(
        configuration,
        locator.clone(),
        engine.clone(),
        catalog.clone(),
    );
    Harness {
        builder,
        engine,
        locator,
        catalog,
    }
}
