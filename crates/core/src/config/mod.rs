//! Configuration assembly.
//!
//! [`SlimOptions`] is the raw option surface (what a user or a config file supplies).
//! [`SlimOptions::assemble`] merges in a profile from a [`ProfileRegistry`] and yields the
//! read-only [`Configuration`] the analyzer consumes.

mod file;
mod profile;

pub use file::ConfigFile;
pub use profile::{ProfileRegistry, SlimmingProfile};

use crate::error::{Result, SlimError};
use jarslim_api::DependencyFilter;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub includes: Vec<DependencyFilter>,
    pub excludes: Vec<DependencyFilter>,
    /// Accepted but not consulted: protected entries are always kept.
    pub preserve_manifest: bool,
    /// Accepted but not consulted: directory entries are copied like any other entry.
    pub remove_empty_directories: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            excludes: Vec::new(),
            preserve_manifest: true,
            remove_empty_directories: true,
        }
    }
}

impl Configuration {
    /// No filters at all: nothing will be removed.
    pub fn is_noop(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

/// Every option a slimming run accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimOptions {
    pub includes: Vec<DependencyFilter>,
    pub excludes: Vec<DependencyFilter>,
    pub preserve_manifest: bool,
    pub remove_empty_directories: bool,
    pub profile: Option<String>,
    pub enabled: bool,
    pub verbose: bool,
    pub dry_run: bool,
}

impl Default for SlimOptions {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            excludes: Vec::new(),
            preserve_manifest: true,
            remove_empty_directories: true,
            profile: None,
            enabled: true,
            verbose: false,
            dry_run: false,
        }
    }
}

impl SlimOptions {
    /// Builds the configuration, appending the named profile's filters after the user's.
    ///
    /// An unknown profile name is a configuration error; nothing has touched the archive yet.
    pub fn assemble(&self, registry: &ProfileRegistry) -> Result<Configuration> {
        let mut config = Configuration {
            includes: self.includes.clone(),
            excludes: self.excludes.clone(),
            preserve_manifest: self.preserve_manifest,
            remove_empty_directories: self.remove_empty_directories,
        };

        if let Some(name) = self.profile.as_deref().filter(|n| !n.trim().is_empty()) {
            let profile = registry.get(name).ok_or_else(|| {
                let available: Vec<_> = registry.names().collect();
                SlimError::Configuration(format!(
                    "Unknown slimming profile: {} (available: {})",
                    name,
                    available.join(", ")
                ))
            })?;
            config = profile.apply_to(config);
            info!("Applied slimming profile: {}", profile.name());
        }

        if config.is_noop() {
            warn!("No includes or excludes configured. No slimming will be performed.");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_without_profile() {
        let options = SlimOptions {
            excludes: vec![DependencyFilter::new().artifact("bar")],
            preserve_manifest: false,
            ..SlimOptions::default()
        };
        let config = options.assemble(&ProfileRegistry::builtin()).unwrap();
        assert_eq!(config.excludes, options.excludes);
        assert!(config.includes.is_empty());
        assert!(!config.preserve_manifest);
        assert!(config.remove_empty_directories);
    }

    #[test]
    fn test_assemble_appends_profile() {
        let options = SlimOptions {
            includes: vec![DependencyFilter::new().artifact("mine")],
            profile: Some("openai-only".into()),
            ..SlimOptions::default()
        };
        let config = options.assemble(&ProfileRegistry::builtin()).unwrap();
        assert_eq!(config.includes.len(), 3);
        assert_eq!(config.includes[0].artifact_id.as_deref(), Some("mine"));
        assert_eq!(config.excludes.len(), 4);
        // the caller's options are left alone
        assert_eq!(options.includes.len(), 1);
    }

    #[test]
    fn test_blank_profile_is_ignored() {
        let options = SlimOptions {
            profile: Some("   ".into()),
            ..SlimOptions::default()
        };
        let config = options.assemble(&ProfileRegistry::builtin()).unwrap();
        assert!(config.is_noop());
    }

    #[test]
    fn test_unknown_profile_is_configuration_error() {
        let options = SlimOptions {
            profile: Some("bogus".into()),
            ..SlimOptions::default()
        };
        let err = options.assemble(&ProfileRegistry::builtin()).unwrap_err();
        match err {
            SlimError::Configuration(msg) => {
                assert!(msg.contains("bogus"));
                assert!(msg.contains("minimal"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
