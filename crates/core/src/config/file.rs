use super::SlimOptions;
use crate::error::{Result, SlimError};
use jarslim_api::DependencyFilter;
use serde::Deserialize;
use std::path::Path;

/// JSON config file. Every key is optional; absent keys keep the option defaults.
///
/// ```json
/// {
///   "profile": "minimal",
///   "excludes": [{ "groupId": "org.apache.spark.*" }],
///   "dryRun": true
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub includes: Vec<DependencyFilter>,
    #[serde(default)]
    pub excludes: Vec<DependencyFilter>,
    pub preserve_manifest: Option<bool>,
    pub remove_empty_directories: Option<bool>,
    pub profile: Option<String>,
    pub enabled: Option<bool>,
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SlimError::Configuration(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        Self::parse(&content).map_err(|e| match e {
            SlimError::Configuration(msg) => {
                SlimError::Configuration(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| SlimError::Configuration(format!("Invalid config file: {}", e)))
    }

    pub fn into_options(self) -> SlimOptions {
        let defaults = SlimOptions::default();
        SlimOptions {
            includes: self.includes,
            excludes: self.excludes,
            preserve_manifest: self.preserve_manifest.unwrap_or(defaults.preserve_manifest),
            remove_empty_directories: self
                .remove_empty_directories
                .unwrap_or(defaults.remove_empty_directories),
            profile: self.profile,
            enabled: self.enabled.unwrap_or(defaults.enabled),
            verbose: self.verbose.unwrap_or(defaults.verbose),
            dry_run: self.dry_run.unwrap_or(defaults.dry_run),
        }
    }
}
