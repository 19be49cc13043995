use crate::models::{ArtifactIdentity, DependencySet, RemoteRepository};

/// Failure to collect the dependency graph of one artifact.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// The artifact is unknown to the resolver.
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),
    /// The graph could not be collected for this artifact (bad metadata, unreachable repository).
    #[error("Could not collect dependencies of {artifact}: {reason}")]
    Collection { artifact: String, reason: String },
    /// The resolver itself is unusable; no further lookups can succeed.
    #[error("Dependency resolver failed: {0}")]
    Fatal(String),
}

impl ResolutionError {
    /// Recoverable failures only remove one root's transitive contribution; the analysis goes on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ResolutionError::Fatal(_))
    }
}

/// Resolves the transitive compile-scope dependency graph of a single artifact.
///
/// The returned set never contains `artifact` itself. Calls are made one root at a time.
pub trait DependencyGraphResolver: Send + Sync {
    fn resolve(
        &self,
        artifact: &ArtifactIdentity,
        repositories: &[RemoteRepository],
    ) -> Result<DependencySet, ResolutionError>;

    /// Resolver name (for logging)
    fn name(&self) -> &str;

    /// Whether `resolve` returns each artifact's whole graph. A source that lists a shared
    /// dependency under only one of its parents answers `false`, and include-side closures
    /// built from it may miss artifacts.
    fn reports_full_graph(&self) -> bool {
        true
    }
}
