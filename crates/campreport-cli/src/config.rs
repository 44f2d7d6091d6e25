//! JSON configuration: campaign definitions and output settings.
//!
//! A missing config file is bootstrapped from a template so the operator has
//! something to edit; a malformed one aborts the run before any processing.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write template config {}: {source}", .path.display())]
    Bootstrap {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Campaign definitions plus output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub campaigns: Vec<CampaignDef>,
    #[serde(default = "default_base_url")]
    pub jira_base_url: String,
    #[serde(default)]
    pub output_settings: OutputSettings,
}

/// One campaign descriptor. Informational: the pipeline classifies rows by
/// issue type, not against this list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub custom_fields: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,
    /// Declarative field list carried in the config format. Parsed but not
    /// applied: the report's column set is fixed by the sheet contract.
    /// See DESIGN.md.
    #[serde(default)]
    pub include_fields: Vec<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            include_fields: Vec::new(),
        }
    }
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("./reports")
}

fn default_base_url() -> String {
    "https://yourcompany.atlassian.net".into()
}

impl Config {
    /// Template written when no config exists yet
    pub fn template() -> Self {
        Self {
            campaigns: vec![CampaignDef {
                id: "PROJ-1".into(),
                name: "Example Campaign".into(),
                description: "Campaign description".into(),
                owner: "Team Name".into(),
                custom_fields: HashMap::new(),
            }],
            jira_base_url: default_base_url(),
            output_settings: OutputSettings {
                output_folder: default_output_folder(),
                include_fields: ["key", "summary", "status", "assignee", "priority", "labels"]
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect(),
            },
        }
    }

    /// Load the config, writing the template first if none exists.
    ///
    /// Returns the config and whether it was just created.
    pub fn load_or_init(path: &Path) -> Result<(Self, bool), ConfigError> {
        if !path.exists() {
            let template = Self::template();
            let body = serde_json::to_string_pretty(&template)
                .expect("template config serializes");
            fs::write(path, body).map_err(|source| ConfigError::Bootstrap {
                path: path.to_path_buf(),
                source,
            })?;
            return Ok((template, true));
        }

        let body = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&body).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok((config, false))
    }
}
