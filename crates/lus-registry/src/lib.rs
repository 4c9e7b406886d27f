pub mod engine;
pub mod http;
pub mod matcher;
pub mod store;

pub use engine::{spawn, spawn_with_sweep_interval, EngineRequest, RegistryHandle};
pub use http::{router, AppState};
