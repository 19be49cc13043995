//! Decides which project dependencies must be removed.
//!
//! The mode is picked from which filter lists are non-empty:
//!
//! | includes | excludes | mode         | excluded                                  |
//! |----------|----------|--------------|-------------------------------------------|
//! | empty    | set      | exclude-only | `E ∪ closure(E)`                          |
//! | set      | empty    | include-only | `all − (I ∪ closure(I))`                  |
//! | set      | set      | mixed        | `(E ∪ closure(E)) − (I ∪ closure(I))`     |
//! | empty    | empty    | neither      | `∅`                                       |
//!
//! where `E`/`I` are the project dependencies matched directly by an exclude/include filter
//! and `closure` is the resolver's transitive graph intersected with the project dependencies.

use crate::config::Configuration;
use crate::error::Result;
use crate::filter::FilterSet;
use jarslim_api::{ArtifactIdentity, DependencyGraphResolver, DependencySet, RemoteRepository};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    ExcludeOnly,
    IncludeOnly,
    Mixed,
    Neither,
}

impl AnalysisMode {
    pub fn select(config: &Configuration) -> Self {
        Self::from_presence(!config.includes.is_empty(), !config.excludes.is_empty())
    }

    fn from_presence(has_includes: bool, has_excludes: bool) -> Self {
        match (has_includes, has_excludes) {
            (false, true) => AnalysisMode::ExcludeOnly,
            (true, false) => AnalysisMode::IncludeOnly,
            (true, true) => AnalysisMode::Mixed,
            (false, false) => AnalysisMode::Neither,
        }
    }

    fn uses_includes(self) -> bool {
        matches!(self, AnalysisMode::IncludeOnly | AnalysisMode::Mixed)
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisMode::ExcludeOnly => "exclude-only",
            AnalysisMode::IncludeOnly => "include-only",
            AnalysisMode::Mixed => "mixed",
            AnalysisMode::Neither => "neither",
        };
        f.write_str(name)
    }
}

/// Outcome of one analysis. Owns all of its sets; the inputs are never touched.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub mode: AnalysisMode,
    pub direct_excludes: DependencySet,
    pub direct_includes: DependencySet,
    pub excluded: DependencySet,
    /// Roots whose transitive graph could not be resolved and contributed nothing.
    pub unresolved: Vec<ArtifactIdentity>,
    /// Include closures came from a resolver that may list shared dependencies under one
    /// parent only, so artifacts an included dependency needs can end up excluded.
    pub partial_graph: bool,
}

impl Analysis {
    fn empty(mode: AnalysisMode) -> Self {
        Self {
            mode,
            direct_excludes: DependencySet::new(),
            direct_includes: DependencySet::new(),
            excluded: DependencySet::new(),
            unresolved: Vec::new(),
            partial_graph: false,
        }
    }
}

pub struct DependencySetAnalyzer<'a> {
    resolver: &'a dyn DependencyGraphResolver,
    repositories: &'a [RemoteRepository],
    verbose: bool,
}

impl<'a> DependencySetAnalyzer<'a> {
    pub fn new(
        resolver: &'a dyn DependencyGraphResolver,
        repositories: &'a [RemoteRepository],
    ) -> Self {
        Self {
            resolver,
            repositories,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Computes the set of project dependencies to remove.
    ///
    /// Fails only on invalid filter patterns or a fatal resolver error; a root whose graph
    /// cannot be collected is logged and skipped.
    pub fn analyze(&self, all: &DependencySet, config: &Configuration) -> Result<Analysis> {
        let include_filters = FilterSet::compile(&config.includes)?;
        let exclude_filters = FilterSet::compile(&config.excludes)?;
        self.analyze_with(all, &include_filters, &exclude_filters)
    }

    /// [`analyze`](Self::analyze) over filters the caller has already compiled.
    pub fn analyze_with(
        &self,
        all: &DependencySet,
        include_filters: &FilterSet,
        exclude_filters: &FilterSet,
    ) -> Result<Analysis> {
        let mode =
            AnalysisMode::from_presence(!include_filters.is_empty(), !exclude_filters.is_empty());
        if mode == AnalysisMode::Neither {
            debug!("No filters, skipping dependency analysis");
            return Ok(Analysis::empty(mode));
        }

        let partial_graph = mode.uses_includes() && !self.resolver.reports_full_graph();
        if partial_graph {
            warn!(
                "Resolver '{}' lists shared dependencies under one parent only; jars needed by \
                 included dependencies may be removed. Use a JSON graph or a verbose export.",
                self.resolver.name()
            );
        }

        if self.verbose {
            info!(
                "Analyzing {} project dependencies in {} mode...",
                all.len(),
                mode
            );
        }

        let mut analysis = Analysis::empty(mode);
        analysis.partial_graph = partial_graph;
        analysis.direct_excludes = self.direct_matches(all, exclude_filters, "exclusion");
        analysis.direct_includes = self.direct_matches(all, include_filters, "inclusion");

        let mut unresolved = Vec::new();

        let exclude_set = if exclude_filters.is_empty() {
            DependencySet::new()
        } else {
            let closure = self.closure(&analysis.direct_excludes, all, &mut unresolved)?;
            analysis
                .direct_excludes
                .union(&closure)
                .cloned()
                .collect()
        };

        let include_set = if include_filters.is_empty() {
            DependencySet::new()
        } else {
            let closure = self.closure(&analysis.direct_includes, all, &mut unresolved)?;
            analysis
                .direct_includes
                .union(&closure)
                .cloned()
                .collect()
        };

        analysis.excluded = match mode {
            AnalysisMode::ExcludeOnly => exclude_set,
            AnalysisMode::IncludeOnly => all.difference(&include_set).cloned().collect(),
            AnalysisMode::Mixed => exclude_set.difference(&include_set).cloned().collect(),
            AnalysisMode::Neither => DependencySet::new(),
        };

        if self.verbose && mode == AnalysisMode::IncludeOnly {
            for artifact in &analysis.excluded {
                info!("Include-only exclusion: {}", artifact);
            }
        }

        analysis.unresolved = unresolved;
        Ok(analysis)
    }

    fn direct_matches(
        &self,
        all: &DependencySet,
        filters: &FilterSet,
        label: &str,
    ) -> DependencySet {
        let matched: DependencySet = all
            .iter()
            .filter(|artifact| filters.matches_any(artifact))
            .cloned()
            .collect();

        if self.verbose {
            for artifact in &matched {
                info!("Direct {}: {}", label, artifact);
            }
        }
        matched
    }

    /// Union of every root's transitive graph, restricted to the project's dependencies.
    fn closure(
        &self,
        roots: &DependencySet,
        all: &DependencySet,
        unresolved: &mut Vec<ArtifactIdentity>,
    ) -> Result<DependencySet> {
        let mut closure = DependencySet::new();

        for root in roots {
            let transitives = match self.resolver.resolve(root, self.repositories) {
                Ok(resolved) => restrict_to_project(&resolved, all),
                Err(e) if e.is_recoverable() => {
                    warn!(
                        "Could not resolve transitive dependencies for {}: {}",
                        root.key(),
                        e
                    );
                    if !unresolved.contains(root) {
                        unresolved.push(root.clone());
                    }
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if self.verbose && !transitives.is_empty() {
                info!("Transitive dependencies of {}:", root.key());
                for transitive in &transitives {
                    info!("  -> {}", transitive.key());
                }
            } else {
                debug!(
                    "{} contributes {} transitive dependencies",
                    root.key(),
                    transitives.len()
                );
            }

            closure.extend(transitives);
        }

        Ok(closure)
    }
}

/// Maps resolved graph nodes onto the project's own artifacts. A node with no counterpart
/// in the build is dropped; a node that matches only on group/artifact/version maps to the
/// first such project artifact.
fn restrict_to_project(resolved: &DependencySet, all: &DependencySet) -> DependencySet {
    resolved
        .iter()
        .filter_map(|node| {
            if all.contains(node) {
                return Some(node.clone());
            }
            all.iter().find(|p| p.same_coordinates(node)).cloned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarslim_api::{DependencyFilter, ResolutionError};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn art(artifact_id: &str) -> ArtifactIdentity {
        ArtifactIdentity::new("g", artifact_id, "1.0")
    }

    /// In-memory resolver over an adjacency list, recording the order of calls.
    struct MapResolver {
        edges: HashMap<String, Vec<&'static str>>,
        failing: Vec<&'static str>,
        fatal: bool,
        partial: bool,
        calls: Mutex<Vec<String>>,
    }

    impl MapResolver {
        fn new(edges: &[(&'static str, &[&'static str])]) -> Self {
            Self {
                edges: edges
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_vec()))
                    .collect(),
                failing: Vec::new(),
                fatal: false,
                partial: false,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl DependencyGraphResolver for MapResolver {
        fn resolve(
            &self,
            artifact: &ArtifactIdentity,
            _repositories: &[RemoteRepository],
        ) -> std::result::Result<DependencySet, ResolutionError> {
            let id = artifact.artifact_id();
            self.calls.lock().unwrap().push(id.to_string());
            if self.fatal {
                return Err(ResolutionError::Fatal("offline".into()));
            }
            if self.failing.contains(&id) {
                return Err(ResolutionError::Collection {
                    artifact: artifact.key(),
                    reason: "broken pom".into(),
                });
            }

            let mut seen = DependencySet::new();
            let mut pending = vec![id.to_string()];
            while let Some(next) = pending.pop() {
                for child in self.edges.get(&next).into_iter().flatten() {
                    if seen.insert(art(child)) {
                        pending.push(child.to_string());
                    }
                }
            }
            seen.remove(artifact);
            Ok(seen)
        }

        fn name(&self) -> &str {
            "map"
        }

        fn reports_full_graph(&self) -> bool {
            !self.partial
        }
    }

    fn project(ids: &[&str]) -> DependencySet {
        ids.iter().map(|id| art(id)).collect()
    }

    fn ids(set: &DependencySet) -> Vec<&str> {
        set.iter().map(|a| a.artifact_id()).collect()
    }

    fn exclude(artifact_id: &str) -> DependencyFilter {
        DependencyFilter::new().artifact(artifact_id)
    }

    #[test]
    fn test_mode_selection() {
        let mut config = Configuration::default();
        assert_eq!(AnalysisMode::select(&config), AnalysisMode::Neither);
        config.excludes.push(exclude("a"));
        assert_eq!(AnalysisMode::select(&config), AnalysisMode::ExcludeOnly);
        config.includes.push(exclude("b"));
        assert_eq!(AnalysisMode::select(&config), AnalysisMode::Mixed);
        config.excludes.clear();
        assert_eq!(AnalysisMode::select(&config), AnalysisMode::IncludeOnly);
    }

    #[test]
    fn test_neither_mode_excludes_nothing_and_resolves_nothing() {
        let resolver = MapResolver::new(&[]);
        let analyzer = DependencySetAnalyzer::new(&resolver, &[]);
        let analysis = analyzer
            .analyze(&project(&["a", "b"]), &Configuration::default())
            .unwrap();
        assert_eq!(analysis.mode, AnalysisMode::Neither);
        assert!(analysis.excluded.is_empty());
        assert!(resolver.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_exclude_only_adds_transitive_closure() {
        // hadoop -> guava -> failureaccess ; app-only is untouched
        let resolver = MapResolver::new(&[
            ("hadoop", &["guava", "not-in-build"]),
            ("guava", &["failureaccess"]),
        ]);
        let all = project(&["hadoop", "guava", "failureaccess", "app-only"]);
        let config = Configuration {
            excludes: vec![exclude("hadoop")],
            ..Configuration::default()
        };

        let analysis = DependencySetAnalyzer::new(&resolver, &[])
            .analyze(&all, &config)
            .unwrap();

        assert_eq!(analysis.mode, AnalysisMode::ExcludeOnly);
        assert_eq!(ids(&analysis.direct_excludes), vec!["hadoop"]);
        assert_eq!(
            ids(&analysis.excluded),
            vec!["failureaccess", "guava", "hadoop"]
        );
    }

    #[test]
    fn test_exclude_only_never_over_excludes() {
        let resolver = MapResolver::new(&[("a", &["b"]), ("c", &["d"])]);
        let all = project(&["a", "b", "c", "d"]);
        let config = Configuration {
            excludes: vec![exclude("a")],
            ..Configuration::default()
        };

        let analysis = DependencySetAnalyzer::new(&resolver, &[])
            .analyze(&all, &config)
            .unwrap();
        assert!(!analysis.excluded.contains(&art("c")));
        assert!(!analysis.excluded.contains(&art("d")));
    }

    #[test]
    fn test_include_only_excludes_everything_unreachable() {
        let resolver = MapResolver::new(&[("core", &["json"]), ("json", &["annotations"])]);
        let all = project(&["core", "json", "annotations", "hadoop", "spark"]);
        let config = Configuration {
            includes: vec![exclude("core")],
            ..Configuration::default()
        };

        let analysis = DependencySetAnalyzer::new(&resolver, &[])
            .analyze(&all, &config)
            .unwrap();

        assert_eq!(analysis.mode, AnalysisMode::IncludeOnly);
        assert_eq!(ids(&analysis.excluded), vec!["hadoop", "spark"]);
    }

    #[test]
    fn test_mixed_mode_inclusion_wins() {
        // shared is reachable from both the excluded and the included root
        let resolver = MapResolver::new(&[
            ("azure", &["shared", "azure-core"]),
            ("core", &["shared"]),
        ]);
        let all = project(&["azure", "azure-core", "shared", "core", "other"]);
        let config = Configuration {
            includes: vec![exclude("core")],
            excludes: vec![exclude("azure")],
            ..Configuration::default()
        };

        let analysis = DependencySetAnalyzer::new(&resolver, &[])
            .analyze(&all, &config)
            .unwrap();

        assert_eq!(analysis.mode, AnalysisMode::Mixed);
        assert_eq!(ids(&analysis.excluded), vec!["azure", "azure-core"]);
        // unlike include-only, unrelated dependencies survive in mixed mode
        assert!(!analysis.excluded.contains(&art("other")));
    }

    #[test]
    fn test_mixed_mode_direct_match_on_both_sides_is_kept() {
        let resolver = MapResolver::new(&[]);
        let all = project(&["both"]);
        let config = Configuration {
            includes: vec![exclude("both")],
            excludes: vec![DependencyFilter::new().artifact("b*")],
            ..Configuration::default()
        };

        let analysis = DependencySetAnalyzer::new(&resolver, &[])
            .analyze(&all, &config)
            .unwrap();
        assert!(analysis.excluded.is_empty());
    }

    #[test]
    fn test_recoverable_failure_degrades_one_root() {
        let mut resolver = MapResolver::new(&[("a", &["a-dep"]), ("b", &["b-dep"])]);
        resolver.failing = vec!["a"];
        let all = project(&["a", "a-dep", "b", "b-dep"]);
        let config = Configuration {
            excludes: vec![exclude("a"), exclude("b")],
            ..Configuration::default()
        };

        let analysis = DependencySetAnalyzer::new(&resolver, &[])
            .analyze(&all, &config)
            .unwrap();

        assert_eq!(ids(&analysis.excluded), vec!["a", "b", "b-dep"]);
        assert_eq!(analysis.unresolved, vec![art("a")]);
        assert_eq!(*resolver.calls.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_fatal_failure_aborts() {
        let mut resolver = MapResolver::new(&[]);
        resolver.fatal = true;
        let config = Configuration {
            excludes: vec![exclude("a")],
            ..Configuration::default()
        };

        let result = DependencySetAnalyzer::new(&resolver, &[]).analyze(&project(&["a"]), &config);
        assert!(matches!(result, Err(crate::SlimError::Resolution(_))));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let resolver = MapResolver::new(&[("a", &["b"])]);
        let all = project(&["a", "b", "c"]);
        let config = Configuration {
            includes: vec![exclude("c")],
            excludes: vec![exclude("a")],
            ..Configuration::default()
        };
        let (all_before, config_before) = (all.clone(), config.clone());

        DependencySetAnalyzer::new(&resolver, &[])
            .analyze(&all, &config)
            .unwrap();

        assert_eq!(all, all_before);
        assert_eq!(config, config_before);
    }

    #[test]
    fn test_resolved_nodes_map_onto_project_identity() {
        let native = ArtifactIdentity::new("g", "netty", "1.0").with_classifier("linux");
        let resolved: DependencySet = [art("netty"), art("absent")].into_iter().collect();
        let all: DependencySet = [native.clone()].into_iter().collect();

        let restricted = restrict_to_project(&resolved, &all);
        assert_eq!(restricted.into_iter().collect::<Vec<_>>(), vec![native]);
    }

    #[test]
    fn test_partial_graph_flagged_only_when_includes_matter() {
        let mut resolver = MapResolver::new(&[("core", &["json"])]);
        resolver.partial = true;
        let all = project(&["core", "json", "hadoop"]);
        let analyzer = DependencySetAnalyzer::new(&resolver, &[]);

        let include_only = Configuration {
            includes: vec![exclude("core")],
            ..Configuration::default()
        };
        assert!(analyzer.analyze(&all, &include_only).unwrap().partial_graph);

        let exclude_only = Configuration {
            excludes: vec![exclude("hadoop")],
            ..Configuration::default()
        };
        assert!(!analyzer.analyze(&all, &exclude_only).unwrap().partial_graph);
    }

    #[test]
    fn test_precompiled_filters_give_same_result() {
        let resolver = MapResolver::new(&[("azure", &["azure-core"]), ("core", &["json"])]);
        let all = project(&["azure", "azure-core", "core", "json"]);
        let config = Configuration {
            includes: vec![exclude("core")],
            excludes: vec![DependencyFilter::new().artifact("azure*")],
            ..Configuration::default()
        };
        let analyzer = DependencySetAnalyzer::new(&resolver, &[]);

        let includes = FilterSet::compile(&config.includes).unwrap();
        let excludes = FilterSet::compile(&config.excludes).unwrap();
        let precompiled = analyzer.analyze_with(&all, &includes, &excludes).unwrap();
        let from_config = analyzer.analyze(&all, &config).unwrap();

        assert_eq!(precompiled.mode, AnalysisMode::Mixed);
        assert_eq!(precompiled.excluded, from_config.excluded);
        assert_eq!(ids(&precompiled.excluded), vec!["azure", "azure-core"]);
    }
}
