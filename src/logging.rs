//! Structured logging for the builder.
//!
//! Helper functions emit `tracing` events with consistent field names;
//! [`init_test_logging`] installs a subscriber for test binaries.

use crate::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log constructor selection.
pub fn log_constructor_selected(sut: &str, constructor: &str, parameters: usize) {
    tracing::debug!(sut, constructor, parameters, "Constructor selected");
}

/// Log an explicit override; `explicit` is false for a "no value" override.
pub fn log_dependency_overridden(sut: &str, dependency: &str, explicit: bool) {
    tracing::debug!(sut, dependency, explicit, "Dependency overridden");
}

pub fn log_override_skipped(sut: &str, dependency: &str) {
    tracing::trace!(sut, dependency, "Override skipped, no value given");
}

/// Log a substitute created for an unresolved dependency.
pub fn log_dependency_synthesized(sut: &str, dependency: &str) {
    tracing::debug!(sut, dependency, "Strict substitute synthesized");
}

/// Log a finished build.
pub fn log_sut_built(sut: &str, arguments: usize, synthesized: usize) {
    tracing::debug!(sut, arguments, synthesized, "System under test built");
}

/// Install a `tracing` subscriber that writes through the test harness.
///
/// `RUST_LOG` wins over the configured filter. Safe to call from every test;
/// only the first call installs anything.
pub fn init_test_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.filter_or_default()));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.logging.json_enabled() {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_test_writer()
            .with_target(true)
            .with_level(true);
        registry.with(json_layer).try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_level(true);
        registry.with(fmt_layer).try_init()
    };

    if installed.is_err() {
        tracing::trace!("Subscriber already installed");
    }
}
