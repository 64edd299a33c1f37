//! # Observability Setup
//!
//! One-call initialisation of the `tracing` subscriber shared by binaries built on the framework.
//!
//! The actor loop logs with an `entity_type` field (`Order`, `User`, ...), so the module target
//! is hidden and the compact formatter keeps span names inline:
//!
//! ```text
//! INFO claim_order:perform_action: Action ok entity_type="Order" id=order_1 outcome=true
//! ```
//!
//! `RUST_LOG` always wins; `default_level` is used only when it is unset or unparsable.
//!
//! ```bash
//! RUST_LOG=debug cargo run                          # full payloads
//! RUST_LOG=actor_framework=debug,info cargo run     # actor loop only
//! ```
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// Returns `false` when a subscriber was already installed (e.g. by a test harness).
pub fn setup_tracing(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
