use miette::{Context, IntoDiagnostic, Result};
use openapi_ts_types::{
    codegen::{TypesModule, generate},
    diagnostics::TracingDiagnostics,
    parse::Document,
};
use tracing_subscriber::EnvFilter;

mod cli;

use self::cli::Main;

fn main() -> Result<()> {
    let Ok(main) = Main::parse().map_err(|err| err.exit());
    init_tracing(main.verbose);

    let source = std::fs::read_to_string(&main.input)
        .into_diagnostic()
        .with_context(|| format!("Failed to read `{}`", main.input.display()))?;

    let doc = Document::from_yaml(&source).context("Failed to parse OpenAPI document")?;

    match &doc.info {
        Some(info) => tracing::info!("OpenAPI: {}", info.title),
        None => tracing::info!("OpenAPI: (untitled)"),
    }

    let module = TypesModule::new(generate(&doc, &main.config, &TracingDiagnostics)?);

    tracing::info!(
        "Writing {} types to `{}`...",
        module.len(),
        main.output.display()
    );
    module.write_to_disk(&main.output)?;

    tracing::info!("Generation complete");

    Ok(())
}

/// Logs to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
