//! The two collaborators a slimming run needs from the build: the project's resolved
//! dependencies and a way to walk any artifact's dependency graph.

mod graph;
mod resolver;

pub use graph::{DependencyGraph, GraphFormat};
pub use resolver::GraphFileResolver;

use jarslim_api::{ArtifactIdentity, DependencySet, RemoteRepository};

/// What the build knows about the project being slimmed.
#[derive(Debug, Clone, Default)]
pub struct ProjectModel {
    pub root: Option<ArtifactIdentity>,
    /// Every artifact packaged into the archive.
    pub artifacts: DependencySet,
    pub repositories: Vec<RemoteRepository>,
}

impl ProjectModel {
    /// Packaged dependencies are the nodes reachable from the root over compile/runtime
    /// edges. A graph without a root contributes all of its nodes.
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let artifacts = match graph.root() {
            Some(root) => graph.reachable_from(root).unwrap_or_default(),
            None => graph.nodes().cloned().collect(),
        };

        Self {
            root: graph.root().cloned(),
            artifacts,
            repositories: graph.repositories().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_rooted_graph() {
        let graph = DependencyGraph::from_tgf(
            "1 com.acme:app:jar:1.0\n2 g:lib:jar:1.0:compile\n3 g:junit:jar:4.0:test\n#\n1 2 compile\n1 3 test\n",
        )
        .unwrap();
        let project = ProjectModel::from_graph(&graph);

        assert_eq!(project.root.as_ref().map(|r| r.artifact_id()), Some("app"));
        let ids: Vec<_> = project.artifacts.iter().map(|a| a.artifact_id()).collect();
        assert_eq!(ids, vec!["lib"]);
    }

    #[test]
    fn test_project_from_rootless_graph() {
        let graph = DependencyGraph::from_json(r#"{ "nodes": ["g:a:1", "g:b:1"] }"#).unwrap();
        let project = ProjectModel::from_graph(&graph);
        assert!(project.root.is_none());
        assert_eq!(project.artifacts.len(), 2);
    }
}
