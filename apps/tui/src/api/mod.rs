pub mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::Error;
