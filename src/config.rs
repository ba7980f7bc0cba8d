//! Configuration for the routing core
//!
//! Loaded from TOML by the embedding application. Collaborator credentials
//! are never stored in the file; the config names environment variables
//! and the values are resolved at runtime.

use crate::routing::expertise::{ExpertiseClient, ExpertiseConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouterConfig {
    #[serde(default)]
    pub routing: RoutingSection,
    /// Expertise-graph lookup; the local engine runs alone when absent.
    pub expertise: Option<ExpertiseSection>,
}

/// Core routing behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingSection {
    /// Attempts to commit an assignment before giving up. Each retry
    /// re-fetches the pool, so this bounds the optimistic-retry loop.
    #[serde(default = "default_commit_attempts")]
    pub max_commit_attempts: u32,
    /// Hours after assignment for the follow-up reminder
    #[serde(default = "default_follow_up_hours")]
    pub follow_up_hours: i64,
}

fn default_commit_attempts() -> u32 {
    3
}

fn default_follow_up_hours() -> i64 {
    24
}

impl Default for RoutingSection {
    fn default() -> Self {
        Self {
            max_commit_attempts: default_commit_attempts(),
            follow_up_hours: default_follow_up_hours(),
        }
    }
}

/// Expertise-graph service section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpertiseSection {
    #[serde(flatten)]
    pub endpoint: ExpertiseConfig,
    /// Environment variable containing the service username
    pub username_env: Option<String>,
    /// Environment variable containing the service password
    pub password_env: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RouterConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: RouterConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routing.max_commit_attempts == 0 {
            return Err(ConfigError::InvalidConfig(
                "routing.max_commit_attempts must be at least 1".to_string(),
            ));
        }
        if self.routing.follow_up_hours <= 0 {
            return Err(ConfigError::InvalidConfig(
                "routing.follow_up_hours must be positive".to_string(),
            ));
        }
        if let Some(ref expertise) = self.expertise {
            if expertise.endpoint.host.is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "expertise.host must not be empty".to_string(),
                ));
            }
            match expertise.endpoint.scheme.as_str() {
                "" | "http" | "https" => {}
                other => {
                    return Err(ConfigError::InvalidConfig(format!(
                        "expertise.scheme must be http or https, got '{other}'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the expertise client from the `[expertise]` section, with
    /// basic-auth credentials resolved from the environment when both
    /// variables are set. `None` when the section is absent, which runs
    /// the router on the local engine alone.
    pub fn expertise_client(&self) -> Option<ExpertiseClient> {
        let section = self.expertise.as_ref()?;
        let client = ExpertiseClient::new(section.endpoint.clone());
        match (self.expertise_username(), self.expertise_password()) {
            (Some(username), Some(password)) => Some(client.with_credentials(username, password)),
            _ => Some(client),
        }
    }

    /// Get the expertise service username from the environment
    pub fn expertise_username(&self) -> Option<String> {
        self.expertise
            .as_ref()
            .and_then(|e| e.username_env.as_ref())
            .and_then(|name| std::env::var(name).ok())
    }

    /// Get the expertise service password from the environment
    pub fn expertise_password(&self) -> Option<String> {
        self.expertise
            .as_ref()
            .and_then(|e| e.password_env.as_ref())
            .and_then(|name| std::env::var(name).ok())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            routing: RoutingSection::default(),
            expertise: None,
        }
    }
}
