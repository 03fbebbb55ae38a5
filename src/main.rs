use docweave::resource::FilesystemResourceLocator;
use docweave::{Configuration, NoCatalogBackend, StandardResolvers, UriResolver, XsltError};
use std::env;
use std::sync::Arc;

/// Runs one reference through the standard resolver chain, the same way a
/// stylesheet import would be resolved during a build.
fn main() -> Result<(), XsltError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 && args.len() != 5 {
        eprintln!("Resolves a stylesheet reference the way a docweave build would.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/config.json> <resource-root> <href> [base]",
            args[0]
        );
        std::process::exit(1);
    }

    let configuration = Configuration::from_file(&args[1])?;
    let href = &args[3];
    let base = args.get(4).map(String::as_str);

    let chain = StandardResolvers::from_configuration(
        &configuration,
        Arc::new(FilesystemResourceLocator::new(&args[2])),
        Arc::new(NoCatalogBackend),
    )
    .chain();

    match chain.resolve(href, base) {
        Ok(Some(location)) => println!("{location}"),
        Ok(None) => println!("unresolved"),
        Err(e) => {
            eprintln!("Resolution of '{href}' failed: {e}");
            std::process::exit(2);
        }
    }
    Ok(())
}
