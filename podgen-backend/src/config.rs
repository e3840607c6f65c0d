//! Backend client configuration

use serde::{Deserialize, Serialize};

/// Where the backend service lives and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend service. Supports `env:VAR` indirection so
    /// deployments can point elsewhere without editing config files.
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    /// Resolve the configured base URL, following `env:VAR` indirection
    pub fn resolved_base_url(&self) -> String {
        get_env_or_value(&self.base_url)
    }
}

/// Resolve a config value, reading it from the environment when it is
/// written as `env:VAR`
pub fn get_env_or_value(value: &str) -> String {
    if let Some(var) = value.strip_prefix("env:") {
        match std::env::var(var) {
            Ok(resolved) => resolved.trim().to_string(),
            Err(_) => {
                log::warn!("Environment variable {} not found", var);
                String::new()
            }
        }
    } else {
        value.to_string()
    }
}
