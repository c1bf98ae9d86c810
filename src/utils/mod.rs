use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "warn,gift_tracker=info";

/// Installs the global `fmt` subscriber. `RUST_LOG` takes precedence over
/// the default directive; `extra` is appended when it parses.
pub fn init_tracing(extra: Option<&str>) {
    let base =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    // Another subscriber may already be installed (tests, embedding apps).
    let _ = fmt().with_env_filter(with_directive(base, extra)).try_init();
}

fn with_directive(filter: EnvFilter, extra: Option<&str>) -> EnvFilter {
    match extra.and_then(|raw| raw.parse::<Directive>().ok()) {
        Some(directive) => filter.add_directive(directive),
        None => filter,
    }
}
