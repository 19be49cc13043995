use super::artifact::DEFAULT_TYPE;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pattern over artifact identity fields.
///
/// Every field is optional; an absent, empty or `"*"` field matches any value.
/// Fields containing `*` are wildcard patterns, everything else is compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DependencyFilter {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(rename = "type", default = "default_filter_type")]
    pub kind: Option<String>,
}

fn default_filter_type() -> Option<String> {
    Some(DEFAULT_TYPE.to_string())
}

impl Default for DependencyFilter {
    fn default() -> Self {
        Self {
            group_id: None,
            artifact_id: None,
            version: None,
            classifier: None,
            kind: default_filter_type(),
        }
    }
}

impl DependencyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn artifact(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

impl fmt::Display for DependencyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.group_id.as_deref().unwrap_or("*"),
            self.artifact_id.as_deref().unwrap_or("*"),
            self.kind.as_deref().unwrap_or("*"),
            self.classifier.as_deref().unwrap_or(""),
            self.version.as_deref().unwrap_or("*"),
        )
    }
}

/// Parses the command-line form `groupId[:artifactId[:version[:type[:classifier]]]]`.
/// Empty segments stay unset, so `:foo` selects artifact `foo` in any group.
impl FromStr for DependencyFilter {
    type Err = ApiError;

    fn from_str(s: &str) -> ApiResult<Self> {
        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        if parts.len() > 5 {
            return Err(ApiError::InvalidFilter {
                input: s.to_string(),
                reason: "expected at most 5 colon-separated segments",
            });
        }
        if parts.iter().all(|p| p.is_empty()) {
            return Err(ApiError::InvalidFilter {
                input: s.to_string(),
                reason: "filter selects nothing specific",
            });
        }

        let field = |idx: usize| {
            parts
                .get(idx)
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string())
        };

        let mut filter = DependencyFilter {
            group_id: field(0),
            artifact_id: field(1),
            version: field(2),
            classifier: field(4),
            ..DependencyFilter::default()
        };
        if let Some(kind) = field(3) {
            filter.kind = Some(kind);
        }
        Ok(filter)
    }
}
