use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber; `RUST_LOG` overrides `level`.
pub fn init_tracing(level: &str) -> Result<(), String> {
    let directive: Directive = level
        .parse()
        .map_err(|err| format!("Invalid --log-level '{level}': {err}"))?;
    let filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
