pub mod config;

pub use config::{init_app_config, AppConfig};
