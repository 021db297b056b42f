pub mod app;
pub mod config;

pub use app::{ApiDoc, Health, build_app};
pub use config::{CacheBackendKind, ServerConfig, StoreBackendKind};
