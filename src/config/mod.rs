//! Configuration module for maqal
//!
//! Handles loading application settings from TOML files and resolving the
//! model credential.

mod credentials;
mod settings;

pub use credentials::{ensure_api_key, read_api_key};
pub use settings::{GeneralSettings, LlmSettings, Settings, API_KEY_ENV_VARS};
