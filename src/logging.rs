//! Tracing subscriber setup shared by the binaries

use crate::config::LoggingConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Crates whose events follow the configured level
const TARGETS: [&str; 4] = [
    "no_show_predictor",
    "no_show_server",
    "no_show_gui",
    "sample_records",
];

/// Install the global subscriber. Extra directives can be supplied through `RUST_LOG`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let mut filter = EnvFilter::from_default_env();
    for target in TARGETS {
        filter = filter.add_directive(format!("{}={}", target, config.level).parse()?);
    }

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
