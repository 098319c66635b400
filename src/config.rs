//! Configuration for an update run.

use crate::error::UpdateError;

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// User-Agent sent with every subscription request.
pub const DEFAULT_USER_AGENT: &str = "Surge/1166 CFNetwork/955.1.2 Darwin/18.0.0";

/// Inputs for an update run.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateConfig {
    /// Subscription URLs, in report order.
    pub providers: Vec<String>,
    /// Regex patterns a server's remarks must match. Empty keeps everything.
    pub filters: Vec<String>,
    /// User-Agent header for subscription requests.
    pub user_agent: String,
}

/// On-disk layout of `update.json`.
#[derive(Debug, Default, Deserialize)]
struct UpdateFile {
    #[serde(default)]
    providers: Vec<String>,
    #[serde(default)]
    filter: Vec<String>,
}

impl UpdateConfig {
    /// Create a new configuration builder.
    pub fn builder() -> UpdateConfigBuilder {
        UpdateConfigBuilder::new()
    }

    /// Load providers and filters from an `update.json` style file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, UpdateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| UpdateError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let file: UpdateFile =
            serde_json::from_str(&content).map_err(|e| UpdateError::InvalidInput {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self::builder()
            .providers(file.providers)
            .filters(file.filter)
            .build())
    }
}

/// Builder for `UpdateConfig`.
pub struct UpdateConfigBuilder {
    providers: Vec<String>,
    filters: Vec<String>,
    user_agent: Option<String>,
}

impl UpdateConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            filters: Vec::new(),
            user_agent: None,
        }
    }

    /// Set the subscription URLs.
    pub fn providers(mut self, providers: Vec<impl Into<String>>) -> Self {
        self.providers = providers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the remark filter patterns.
    pub fn filters(mut self, filters: Vec<impl Into<String>>) -> Self {
        self.filters = filters.into_iter().map(Into::into).collect();
        self
    }

    /// Override the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> UpdateConfig {
        UpdateConfig {
            providers: self.providers,
            filters: self.filters,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl Default for UpdateConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
