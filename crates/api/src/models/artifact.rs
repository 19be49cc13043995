use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TYPE: &str = "jar";

/// All artifacts resolved for one build, unique by full identity.
pub type DependencySet = BTreeSet<ArtifactIdentity>;

/// Identity of a resolved dependency.
///
/// Equality, ordering and hashing cover every field, so two artifacts that only
/// differ by classifier are distinct members of a [`DependencySet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactIdentity {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classifier: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    kind: String,
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

impl ArtifactIdentity {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            kind: default_type(),
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        let classifier = classifier.into();
        self.classifier = (!classifier.is_empty()).then_some(classifier);
        self
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// `groupId:artifactId:version`, the form used in logs and reports.
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// Same group, artifact and version. Classifier and type are ignored, which is how
    /// resolved graph nodes are mapped back onto the project's own artifacts.
    pub fn same_coordinates(&self, other: &ArtifactIdentity) -> bool {
        self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.version == other.version
    }

    /// Parses Maven coordinates, returning the identity and the trailing scope if any.
    ///
    /// Accepted shapes:
    /// - `g:a:v`
    /// - `g:a:t:v`
    /// - `g:a:t:v:scope` or `g:a:t:c:v` (told apart by whether the last part is a known scope)
    /// - `g:a:t:c:v:scope`
    pub fn parse_coordinates(input: &str) -> ApiResult<(Self, Option<Scope>)> {
        let invalid = |reason| ApiError::InvalidCoordinates {
            input: input.to_string(),
            reason,
        };

        let parts: Vec<&str> = input.trim().split(':').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid("empty coordinate segment"));
        }

        let (identity, scope) = match parts.as_slice() {
            [g, a, v] => (Self::new(*g, *a, *v), None),
            [g, a, t, v] => (Self::new(*g, *a, *v).with_type(*t), None),
            [g, a, t, x, y] => match y.parse::<Scope>() {
                Ok(scope) => (Self::new(*g, *a, *x).with_type(*t), Some(scope)),
                Err(_) => (Self::new(*g, *a, *y).with_type(*t).with_classifier(*x), None),
            },
            [g, a, t, c, v, s] => {
                let scope = s.parse::<Scope>().map_err(|_| invalid("unknown scope"))?;
                (
                    Self::new(*g, *a, *v).with_type(*t).with_classifier(*c),
                    Some(scope),
                )
            }
            _ => return Err(invalid("expected 3 to 6 colon-separated segments")),
        };

        Ok((identity, scope))
    }
}

impl fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for ArtifactIdentity {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_coordinates(s).map(|(identity, _)| identity)
    }
}

/// Maven dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Compile,
    Runtime,
    Provided,
    Test,
    System,
    Import,
}

impl Scope {
    /// Scopes whose artifacts end up packaged inside the application archive.
    pub fn is_packaged(self) -> bool {
        matches!(self, Scope::Compile | Scope::Runtime)
    }
}

impl FromStr for Scope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compile" => Ok(Scope::Compile),
            "runtime" => Ok(Scope::Runtime),
            "provided" => Ok(Scope::Provided),
            "test" => Ok(Scope::Test),
            "system" => Ok(Scope::System),
            "import" => Ok(Scope::Import),
            _ => Err(()),
        }
    }
}
