use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use serde::{Deserialize, Serialize};

use crate::parser::{ActionTable, CLOSE_ACTION, CLOSE_KEYWORDS};

pub const CONFIG_FILE_NAME: &str = ".issuerefsrc.json";

/// One configured action and the keywords that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_actions")]
    pub actions: Vec<ActionConfig>,
}

fn default_actions() -> Vec<ActionConfig> {
    vec![ActionConfig {
        name: CLOSE_ACTION.to_string(),
        keywords: CLOSE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actions: default_actions(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the actions do not form a valid action table
    /// (no actions, empty or repeated names, actions without keywords, or a
    /// keyword shared by two actions).
    pub fn validate(&self) -> Result<()> {
        self.action_table()?;
        Ok(())
    }

    /// Build the action table described by this config.
    pub fn action_table(&self) -> Result<ActionTable> {
        ActionTable::new(
            self.actions
                .iter()
                .map(|action| (action.name.clone(), action.keywords.clone())),
        )
        .context("Invalid 'actions' in config")
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

/// Read and validate one config file.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(config)
}

/// Find the config file above `start_dir`, or fall back to defaults.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => Ok(ConfigLoadResult {
            config: load_config_file(&path)?,
            path: Some(path),
        }),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
