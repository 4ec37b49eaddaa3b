pub mod config;
pub use config::{AppConfig, LlmProvider, Owner};
