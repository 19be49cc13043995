use super::graph::DependencyGraph;
use jarslim_api::{
    ArtifactIdentity, DependencyGraphResolver, DependencySet, RemoteRepository, ResolutionError,
};
use tracing::debug;

/// Offline resolver answering from an exported dependency graph.
///
/// Repositories are accepted for interface compatibility and ignored: every answer comes
/// from the graph file.
pub struct GraphFileResolver {
    graph: DependencyGraph,
}

impl GraphFileResolver {
    pub fn new(graph: DependencyGraph) -> Self {
        Self { graph }
    }
}

impl DependencyGraphResolver for GraphFileResolver {
    fn resolve(
        &self,
        artifact: &ArtifactIdentity,
        repositories: &[RemoteRepository],
    ) -> Result<DependencySet, ResolutionError> {
        debug!(
            "Resolving {} from graph ({} repositories ignored)",
            artifact.key(),
            repositories.len()
        );
        self.graph
            .reachable_from(artifact)
            .ok_or_else(|| ResolutionError::ArtifactNotFound(artifact.key()))
    }

    fn name(&self) -> &str {
        "graph-file"
    }

    fn reports_full_graph(&self) -> bool {
        !self.graph.format().is_mediated()
    }
}
