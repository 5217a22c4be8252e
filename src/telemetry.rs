//! Opt-in `tracing` setup for binaries built on `particle-dash`.
//!
//! The library only emits events; embedding applications install their own
//! subscriber or use the helpers below.

/// Filter used when `RUST_LOG` is unset: session lifecycle at `info`, the
/// per-event window traffic stays quiet.
pub const DEFAULT_FILTER: &str = "warn,particle_dash=info";

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is unset or unparsable.
///
/// Logs go to stderr so tools can keep stdout for JSON output. Returns
/// `false` when the `telemetry` feature is disabled or a global subscriber
/// is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback filter,
/// e.g. `"particle_dash::api=trace"` to watch every range decision.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
