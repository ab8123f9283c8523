//! `tracing` subscriber setup. Output goes to stderr.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Install a global subscriber filtering at `default_level`, or at `RUST_LOG` when set.
///
/// Fails if a global subscriber is already installed.
pub fn init(default_level: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_installs_once() {
        let first = init("debug");
        assert!(init("info").is_err() || first.is_err());
    }
}
