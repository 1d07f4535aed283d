use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{GitxError, Result};

/// Represents the complete configuration for gitx.
///
/// Holds the branching convention (base branch, aggregate branches and the cascade between them),
/// the remote name, and the settings of the messaging and code-review collaborators.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub messaging: MessagingConfig,

    #[serde(default)]
    pub github: GithubConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_base() -> String {
    "master".to_string()
}

fn default_aggregates() -> Vec<String> {
    vec!["prototype".to_string(), "staging".to_string()]
}

fn default_integration() -> String {
    "prototype".to_string()
}

fn default_staging() -> String {
    "staging".to_string()
}

/// Returns the default cascade: staging keeps prototype current.
fn default_cascade() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("staging".to_string(), "prototype".to_string());
    map
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// The branching convention.
///
/// `cascade` maps a downstream aggregate to the upstream aggregate it must keep current.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_base")]
    pub base: String,

    #[serde(default = "default_aggregates")]
    pub aggregates: Vec<String>,

    #[serde(default = "default_integration")]
    pub default_integration: String,

    /// Aggregate that releases and promotions land in
    #[serde(default = "default_staging")]
    pub staging: String,

    #[serde(default = "default_cascade")]
    pub cascade: BTreeMap<String, String>,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            base: default_base(),
            aggregates: default_aggregates(),
            default_integration: default_integration(),
            staging: default_staging(),
            cascade: default_cascade(),
        }
    }
}

/// Settings for the team activity feed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct MessagingConfig {
    /// Where worklog messages are posted. Printed to the console when unset.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Mention prefixed to review-request posts, e.g. "@developers".
    #[serde(default)]
    pub review_audience: Option<String>,
}

/// Settings for the pull request API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: default_api_url(),
            token: None,
        }
    }
}

impl GithubConfig {
    /// The configured token, falling back to `GITHUB_TOKEN`.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = self.token.as_ref().filter(|t| !t.is_empty()) {
            return Ok(token.clone());
        }
        match std::env::var("GITHUB_TOKEN") {
            Ok(token) if !token.is_empty() => Ok(token),
            _ => Err(GitxError::config(
                "no GitHub token configured: set [github] token or GITHUB_TOKEN",
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            branches: BranchesConfig::default(),
            messaging: MessagingConfig::default(),
            github: GithubConfig::default(),
        }
    }
}

impl Config {
    /// Checks that the branching convention is self-consistent.
    pub fn validate(&self) -> Result<()> {
        let branches = &self.branches;
        if branches.aggregates.is_empty() {
            return Err(GitxError::config("at least one aggregate branch is required"));
        }
        if branches.aggregates.contains(&branches.base) {
            return Err(GitxError::config(format!(
                "base branch '{}' cannot also be an aggregate branch",
                branches.base
            )));
        }
        if !branches.aggregates.contains(&branches.default_integration) {
            return Err(GitxError::config(format!(
                "default integration target '{}' is not an aggregate branch",
                branches.default_integration
            )));
        }
        if !branches.aggregates.contains(&branches.staging) {
            return Err(GitxError::config(format!(
                "staging branch '{}' is not an aggregate branch",
                branches.staging
            )));
        }
        for (downstream, upstream) in &branches.cascade {
            if downstream == upstream {
                return Err(GitxError::config(format!(
                    "aggregate '{}' cannot cascade into itself",
                    downstream
                )));
            }
            for name in [downstream, upstream] {
                if !branches.aggregates.contains(name) {
                    return Err(GitxError::config(format!(
                        "cascade entry '{}' is not an aggregate branch",
                        name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitx.toml` in current directory
/// 3. `.gitx.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitx.toml").exists() {
        fs::read_to_string("./gitx.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitx.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| GitxError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_base_cannot_be_aggregate() {
        let mut config = Config::default();
        config.branches.aggregates.push("master".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_integration_must_be_aggregate() {
        let mut config = Config::default();
        config.branches.default_integration = "develop".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_staging_must_be_aggregate() {
        let mut config = Config::default();
        config.branches.staging = "qa".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cascade_must_name_aggregates() {
        let mut config = Config::default();
        config
            .branches
            .cascade
            .insert("staging".to_string(), "develop".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config
            .branches
            .cascade
            .insert("prototype".to_string(), "prototype".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_aggregates_rejected() {
        let mut config = Config::default();
        config.branches.aggregates.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_token_wins() {
        let github = GithubConfig {
            token: Some("abc".to_string()),
            ..GithubConfig::default()
        };
        assert_eq!(github.resolve_token().unwrap(), "abc");
    }
}
