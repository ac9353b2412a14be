//! Integration test crate for MediaTime.
//!
//! This crate exists solely to hold end-to-end tests that drive
//! mediatime-core through its public API.

#[cfg(test)]
mod conversions;



/// Install a fmt subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
