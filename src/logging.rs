use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Targets whose events pass the `-v` filter.
const CRATE_TARGETS: [&str; 2] = ["invspec", "invspec_stochastic"];

/// Maps the `-v` count to a level: none is warn, `-vvv` and above is trace.
fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS.map(|target| format!("{target}={level}")).join(",")
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `-v`.
///
/// Output goes to stderr; stdout carries the JSON documents.
pub fn init(verbosity: u8) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(env) => env,
        Err(_) => EnvFilter::new(default_directives(verbosity)),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
