//! Exported dependency graphs.
//!
//! Two formats are understood:
//!
//! - TGF as written by `mvn dependency:tree -DoutputType=tgf`. Node lines come first
//!   (`<id> <coordinates>`), then a `#` line, then edges (`<from> <to> [scope]`). The first
//!   node is the project itself.
//!
//!   Maven writes the mediated tree: an artifact needed by several parents appears under the
//!   first one only. Reachability from any other parent then misses it, which matters as soon
//!   as include filters are in play (an included artifact can lose a jar it needs). Prefer
//!   the JSON form, or an export that keeps every edge (`-Dverbose`), for include-only and
//!   mixed runs.
//! - A JSON document:
//!
//! ```json
//! {
//!   "root": "com.acme:app:jar:1.0.0",
//!   "nodes": ["org.foo:bar:jar:2.0.0"],
//!   "edges": [{ "from": "com.acme:app:jar:1.0.0", "to": "org.foo:bar:jar:2.0.0", "scope": "compile" }],
//!   "repositories": [{ "id": "central", "url": "https://repo.maven.apache.org/maven2" }]
//! }
//! ```

use crate::error::{Result, SlimError};
use indexmap::IndexMap;
use jarslim_api::{ArtifactIdentity, DependencySet, RemoteRepository, Scope};
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edge {
    to: ArtifactIdentity,
    scope: Option<Scope>,
}

impl Edge {
    /// Unscoped edges count as compile scope.
    fn is_packaged(&self) -> bool {
        self.scope.is_none_or(Scope::is_packaged)
    }
}

/// Where a graph's edges came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphFormat {
    /// Explicit edge list: a JSON document or edges added in code.
    #[default]
    Json,
    /// Maven's mediated tree, one edge per artifact.
    Tgf,
}

impl GraphFormat {
    /// Shared dependencies keep only one incoming edge.
    pub fn is_mediated(self) -> bool {
        self == GraphFormat::Tgf
    }
}

/// Directed dependency graph, nodes kept in file order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    root: Option<ArtifactIdentity>,
    nodes: IndexMap<ArtifactIdentity, Vec<Edge>>,
    repositories: Vec<RemoteRepository>,
    format: GraphFormat,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GraphDocument {
    root: Option<String>,
    #[serde(default)]
    nodes: Vec<String>,
    #[serde(default)]
    edges: Vec<EdgeDocument>,
    #[serde(default)]
    repositories: Vec<RemoteRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeDocument {
    from: String,
    to: String,
    scope: Option<Scope>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a graph file; `.json` files are read as JSON, anything else as TGF.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SlimError::Graph(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let graph = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_tgf(&content)
        };
        let graph = graph.map_err(|e| match e {
            SlimError::Graph(msg) => SlimError::Graph(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;

        if graph.format.is_mediated() {
            debug!(
                "{} is a mediated TGF tree; shared dependencies are listed under one parent only",
                path.display()
            );
        }
        Ok(graph)
    }

    pub fn from_tgf(content: &str) -> Result<Self> {
        let mut graph = Self::new();
        graph.format = GraphFormat::Tgf;
        let mut ids: HashMap<&str, ArtifactIdentity> = HashMap::new();
        let mut in_edges = false;

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "#" {
                in_edges = true;
                continue;
            }

            let malformed = |what: &str| SlimError::Graph(format!("line {}: {}", line_no + 1, what));
            let mut fields = line.split_whitespace();

            if !in_edges {
                let (Some(id), Some(label)) = (fields.next(), fields.next()) else {
                    return Err(malformed("expected '<id> <coordinates>'"));
                };
                let (artifact, _) = ArtifactIdentity::parse_coordinates(label)
                    .map_err(|e| malformed(&e.to_string()))?;
                if graph.root.is_none() {
                    graph.root = Some(artifact.clone());
                }
                graph.add_node(artifact.clone());
                ids.insert(id, artifact);
            } else {
                let (Some(from), Some(to)) = (fields.next(), fields.next()) else {
                    return Err(malformed("expected '<from> <to> [scope]'"));
                };
                let lookup = |id: &str| {
                    ids.get(id)
                        .cloned()
                        .ok_or_else(|| malformed(&format!("unknown node id '{}'", id)))
                };
                let (from, to) = (lookup(from)?, lookup(to)?);
                let scope = fields.next().and_then(|s| s.parse::<Scope>().ok());
                graph.add_edge(from, to, scope);
            }
        }

        Ok(graph)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let document: GraphDocument = serde_json::from_str(content)
            .map_err(|e| SlimError::Graph(format!("invalid graph document: {}", e)))?;

        let parse = |coords: &str| {
            coords
                .parse::<ArtifactIdentity>()
                .map_err(|e| SlimError::Graph(e.to_string()))
        };

        let mut graph = Self::new();
        if let Some(root) = document.root.as_deref() {
            let root = parse(root)?;
            graph.add_node(root.clone());
            graph.root = Some(root);
        }
        for node in &document.nodes {
            graph.add_node(parse(node)?);
        }
        for edge in &document.edges {
            graph.add_edge(parse(&edge.from)?, parse(&edge.to)?, edge.scope);
        }
        graph.repositories = document.repositories;

        Ok(graph)
    }

    pub fn add_node(&mut self, artifact: ArtifactIdentity) {
        self.nodes.entry(artifact).or_default();
    }

    pub fn add_edge(&mut self, from: ArtifactIdentity, to: ArtifactIdentity, scope: Option<Scope>) {
        self.add_node(to.clone());
        let edges = self.nodes.entry(from).or_default();
        let edge = Edge { to, scope };
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    pub fn format(&self) -> GraphFormat {
        self.format
    }

    pub fn root(&self) -> Option<&ArtifactIdentity> {
        self.root.as_ref()
    }

    pub fn repositories(&self) -> &[RemoteRepository] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ArtifactIdentity> {
        self.nodes.keys()
    }

    /// The graph's own node for `artifact`: exact identity first, then same coordinates.
    pub fn find(&self, artifact: &ArtifactIdentity) -> Option<&ArtifactIdentity> {
        self.nodes
            .get_key_value(artifact)
            .map(|(key, _)| key)
            .or_else(|| self.nodes.keys().find(|node| node.same_coordinates(artifact)))
    }

    /// Everything reachable from `start` over compile/runtime edges, `start` excluded.
    /// `None` when the graph does not know `start`.
    pub fn reachable_from(&self, start: &ArtifactIdentity) -> Option<DependencySet> {
        let start = self.find(start)?;
        let mut reached = DependencySet::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for edge in self.nodes.get(current).into_iter().flatten() {
                if edge.is_packaged() && edge.to != *start && reached.insert(edge.to.clone()) {
                    queue.push_back(&edge.to);
                }
            }
        }

        Some(reached)
    }
}
