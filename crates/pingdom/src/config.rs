//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.pingdom.com";

pub const USERNAME_ENV: &str = "PINGDOM_USERNAME";
pub const PASSWORD_ENV: &str = "PINGDOM_PASSWORD";
pub const APP_KEY_ENV: &str = "PINGDOM_APP_KEY";

/// Credentials and endpoint for the Pingdom API
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub app_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            app_key: String::new(),
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl ClientConfig {
    /// Fill empty credentials from the `PINGDOM_*` environment variables
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.resolve_secrets_with(|key| std::env::var(key).ok())
    }

    /// Fill empty credentials using `lookup`, then require all of them
    pub fn resolve_secrets_with<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (field, env) in [
            (&mut self.username, USERNAME_ENV),
            (&mut self.password, PASSWORD_ENV),
            (&mut self.app_key, APP_KEY_ENV),
        ] {
            if field.is_empty() {
                if let Some(value) = lookup(env) {
                    tracing::debug!("Using {} from environment", env);
                    *field = value;
                }
            }
        }

        let missing: Vec<&str> = [
            (self.username.is_empty(), "username"),
            (self.password.is_empty(), "password"),
            (self.app_key.is_empty(), "app_key"),
        ]
        .into_iter()
        .filter_map(|(empty, name)| empty.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(crate::PingdomError::Config(format!(
                "Missing credentials: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<ClientConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::PingdomError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: ClientConfig = serde_json::from_str(&content)?;
    Ok(config)
}
