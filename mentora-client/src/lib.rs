pub mod app_config;
pub mod rest;

pub use app_config::{BackendConfig, Config};
pub use rest::RestBackend;
