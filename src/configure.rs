//! Brings a freshly instantiated transformer into a ready-to-run state.

use crate::config::ExtensionDialect;
use docweave_traits::{Transformer, UriResolver};
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

pub const FOP_EXTENSIONS: &str = "fop.extensions";
pub const FOP1_EXTENSIONS: &str = "fop1.extensions";

/// Applies, in order: message suppression, the resolver, the baseline
/// extension parameters, then the caller's parameters (which therefore win).
pub fn configure_transformer(
    transformer: &mut dyn Transformer,
    resolver: Arc<dyn UriResolver>,
    dialect: ExtensionDialect,
    parameters: &BTreeMap<String, String>,
) {
    // xsl:message output is discarded rather than left on the console
    if let Some(sink) = transformer.diagnostics()
        && let Err(e) = sink.redirect_messages(Box::new(io::sink()))
    {
        log::trace!("Leaving stylesheet messages unredirected: {}", e);
    }

    transformer.set_uri_resolver(resolver);

    let (fop, fop1) = dialect.baseline();
    transformer.set_parameter(FOP_EXTENSIONS, fop);
    transformer.set_parameter(FOP1_EXTENSIONS, fop1);

    for (name, value) in parameters {
        transformer.set_parameter(name, value);
    }
}
