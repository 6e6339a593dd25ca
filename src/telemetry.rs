//! Telemetry helpers for hosts embedding `history-chart`.
//!
//! Tracing setup stays explicit and opt-in. The render pipeline emits one
//! info event per prepared series plus debug events for domain resolution,
//! so hosts usually want the crate-scoped default below rather than a global
//! `info` level. Hosts with their own subscriber simply skip this module.

/// Initializes a `tracing` subscriber filtered to this crate at `info`.
///
/// `RUST_LOG` overrides the default directives when set. Returns `true` when
/// initialization succeeds and `false` when the `telemetry` feature is
/// disabled or the host already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("history_chart=info")
}

/// Initializes a `tracing` subscriber with the given filter directives,
/// still honoring a `RUST_LOG` override.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}
