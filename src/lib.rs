//! Umbrella crate tying the LUS workspace together for integration tests.
pub use lus_client as client;
pub use lus_core as core;
pub use lus_registry as registry;
