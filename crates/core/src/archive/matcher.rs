use jarslim_api::{ArtifactIdentity, DependencySet};

/// Directory segment under which self-contained archives nest their library jars.
pub const LIB_MARKER: &str = "/lib/";
pub const JAR_SUFFIX: &str = ".jar";

/// Candidate library name for an entry path.
///
/// `BOOT-INF/lib/foo-1.0.0.jar` → `foo-1.0.0`. Paths that are not a jar below the last
/// `/lib/` segment are returned unchanged.
pub fn library_basename(path: &str) -> &str {
    if let Some(idx) = path.rfind(LIB_MARKER) {
        let rest = &path[idx + LIB_MARKER.len()..];
        if let Some(stem) = rest.strip_suffix(JAR_SUFFIX) {
            return stem;
        }
    }
    path
}

/// Whether a library basename was produced by `artifact`.
///
/// Tried in order: exact `{artifactId}-{version}[-{classifier}]`, that prefix followed by
/// `-` or `.`, and finally a bare substring match on the artifactId. The last rule catches
/// jars whose versioning does not follow the usual scheme and can produce false positives.
pub fn belongs_to(basename: &str, artifact: &ArtifactIdentity) -> bool {
    if basename.is_empty() {
        return false;
    }

    let base = format!("{}-{}", artifact.artifact_id(), artifact.version());
    let with_classifier = artifact
        .classifier()
        .map(|classifier| format!("{}-{}", base, classifier));

    if basename == base || with_classifier.as_deref() == Some(basename) {
        return true;
    }

    let has_suffix = |prefix: &str| {
        basename
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('-') || rest.starts_with('.'))
    };
    if has_suffix(&base) || with_classifier.as_deref().is_some_and(has_suffix) {
        return true;
    }

    basename.contains(artifact.artifact_id())
}

/// Maps archive entries back to the artifacts of an exclusion set.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactPathMatcher<'a> {
    artifacts: &'a DependencySet,
}

impl<'a> ArtifactPathMatcher<'a> {
    pub fn new(artifacts: &'a DependencySet) -> Self {
        Self { artifacts }
    }

    /// First artifact (in set order) the entry belongs to.
    pub fn find(&self, entry_path: &str) -> Option<&'a ArtifactIdentity> {
        if self.artifacts.is_empty() {
            return None;
        }
        let basename = library_basename(entry_path);
        self.artifacts
            .iter()
            .find(|artifact| belongs_to(basename, artifact))
    }

    pub fn matches(&self, entry_path: &str) -> bool {
        self.find(entry_path).is_some()
    }
}
