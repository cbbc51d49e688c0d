//! Shared setup for integration tests.

pub mod payload_workflow_test;
pub mod resolution_properties_test;
pub mod step_rewrite_test;

use fixture_params::config::reset_config;
use std::sync::Once;

static INIT: Once = Once::new();

/// Resets global configuration once per test binary.
pub fn init_test_env() {
    INIT.call_once(|| {
        reset_config();
    });
}
