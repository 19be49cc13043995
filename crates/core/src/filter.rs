//! Wildcard matching of artifact identities against dependency filters.
//!
//! Only groupId, artifactId, version and type take part in a match. The classifier of a
//! filter is carried along but never compared.

use crate::error::{Result, SlimError};
use jarslim_api::{ArtifactIdentity, DependencyFilter};
use regex::Regex;

/// Regular expression for a wildcard pattern. Only `.` is escaped; every `*` becomes `.*`.
/// Any other metacharacter in the pattern keeps its regex meaning.
fn wildcard_regex(pattern: &str) -> String {
    format!("^(?:{})$", pattern.replace('.', "\\.").replace('*', ".*"))
}

/// Tests one identity field against one filter pattern.
///
/// A wildcard pattern that is not a valid regular expression never matches.
pub fn matches_pattern(value: &str, pattern: Option<&str>) -> bool {
    let pattern = match pattern {
        None | Some("") | Some("*") => return true,
        Some(p) => p,
    };

    if pattern.contains('*') {
        return Regex::new(&wildcard_regex(pattern))
            .map(|re| re.is_match(value))
            .unwrap_or(false);
    }

    value == pattern
}

/// Uncompiled conjunction over groupId, artifactId, version and type.
pub fn matches(identity: &ArtifactIdentity, filter: &DependencyFilter) -> bool {
    matches_pattern(identity.group_id(), filter.group_id.as_deref())
        && matches_pattern(identity.artifact_id(), filter.artifact_id.as_deref())
        && matches_pattern(identity.version(), filter.version.as_deref())
        && matches_pattern(identity.kind(), filter.kind.as_deref())
}

#[derive(Debug, Clone)]
enum FieldPattern {
    Any,
    Exact(String),
    Wildcard(Regex),
}

impl FieldPattern {
    fn compile(pattern: Option<&str>) -> std::result::Result<Self, regex::Error> {
        match pattern {
            None | Some("") | Some("*") => Ok(FieldPattern::Any),
            Some(p) if p.contains('*') => {
                Ok(FieldPattern::Wildcard(Regex::new(&wildcard_regex(p))?))
            }
            Some(p) => Ok(FieldPattern::Exact(p.to_string())),
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            FieldPattern::Any => true,
            FieldPattern::Exact(expected) => value == expected,
            FieldPattern::Wildcard(re) => re.is_match(value),
        }
    }
}

/// A filter with its wildcard patterns compiled once.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    group_id: FieldPattern,
    artifact_id: FieldPattern,
    version: FieldPattern,
    kind: FieldPattern,
}

impl CompiledFilter {
    pub fn compile(filter: &DependencyFilter) -> Result<Self> {
        let field = |pattern: Option<&str>| {
            FieldPattern::compile(pattern).map_err(|e| {
                SlimError::Configuration(format!(
                    "Invalid wildcard pattern '{}' in filter {}: {}",
                    pattern.unwrap_or_default(),
                    filter,
                    e
                ))
            })
        };

        Ok(Self {
            group_id: field(filter.group_id.as_deref())?,
            artifact_id: field(filter.artifact_id.as_deref())?,
            version: field(filter.version.as_deref())?,
            kind: field(filter.kind.as_deref())?,
        })
    }

    pub fn matches(&self, identity: &ArtifactIdentity) -> bool {
        self.group_id.matches(identity.group_id())
            && self.artifact_id.matches(identity.artifact_id())
            && self.version.matches(identity.version())
            && self.kind.matches(identity.kind())
    }
}

/// Ordered list of compiled filters; an identity matches the set when any filter matches.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<CompiledFilter>,
}

impl FilterSet {
    pub fn compile(filters: &[DependencyFilter]) -> Result<Self> {
        let filters = filters
            .iter()
            .map(CompiledFilter::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { filters })
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn matches_any(&self, identity: &ArtifactIdentity) -> bool {
        self.filters.iter().any(|f| f.matches(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_patterns() {
        for value in ["", "org.apache", "x*y", "1.0-SNAPSHOT"] {
            assert!(matches_pattern(value, None));
            assert!(matches_pattern(value, Some("")));
            assert!(matches_pattern(value, Some("*")));
        }
    }

    #[test]
    fn test_plain_pattern_is_exact_equality() {
        assert!(matches_pattern("langchain4j-core", Some("langchain4j-core")));
        assert!(!matches_pattern("langchain4j-core-extra", Some("langchain4j-core")));
        // a dot in a plain pattern is not a regex wildcard
        assert!(!matches_pattern("orgXapache", Some("org.apache")));
    }

    #[test]
    fn test_wildcard_requires_full_match() {
        assert!(matches_pattern("com.microsoft.azure", Some("com.microsoft.*")));
        assert!(!matches_pattern("com.microsoft", Some("com.microsoft.*")));
        assert!(!matches_pattern("xcom.microsoft.azure", Some("com.microsoft.*")));
        assert!(matches_pattern("hadoop-common", Some("*-common")));
        assert!(matches_pattern("a-b-c", Some("a*c")));
    }

    #[test]
    fn test_wildcard_escapes_dots_only() {
        assert!(!matches_pattern("comXmicrosoftYazure", Some("com.microsoft.*")));
        // only dots are escaped, so '+' is still a quantifier
        assert!(matches_pattern("aaab", Some("a+b*")));
        assert!(!matches_pattern("a+b", Some("a+b*")));
    }

    #[test]
    fn test_invalid_wildcard_never_matches() {
        assert!(!matches_pattern("lib(", Some("lib(*")));
        let filter = DependencyFilter::new().artifact("lib(*");
        assert!(matches!(
            CompiledFilter::compile(&filter),
            Err(SlimError::Configuration(_))
        ));
    }

    #[test]
    fn test_classifier_is_not_compared() {
        let native = ArtifactIdentity::new("io.netty", "netty-transport", "4.1.0")
            .with_classifier("linux-x86_64");
        let filter = DependencyFilter::new()
            .artifact("netty-transport")
            .classifier("osx-aarch_64");
        assert!(matches(&native, &filter));
        assert!(CompiledFilter::compile(&filter).unwrap().matches(&native));
    }

    #[test]
    fn test_type_defaults_to_jar() {
        let pom = ArtifactIdentity::new("g", "bom", "1").with_type("pom");
        let jar = ArtifactIdentity::new("g", "lib", "1");
        let filter = DependencyFilter::new().group("g");
        assert!(!matches(&pom, &filter));
        assert!(matches(&jar, &filter));
        assert!(matches(&pom, &filter.clone().kind("*")));
    }

    #[test]
    fn test_compiled_agrees_with_uncompiled() {
        let artifacts = [
            ArtifactIdentity::new("org.apache.hadoop", "hadoop-common", "3.3.4"),
            ArtifactIdentity::new("dev.langchain4j", "langchain4j-core", "0.35.0"),
            ArtifactIdentity::new("com.amazon.awssdk", "s3", "2.20.0"),
        ];
        let filters = [
            DependencyFilter::new().group("org.apache.hadoop.*").artifact("*"),
            DependencyFilter::new().group("org.apache.*"),
            DependencyFilter::new().artifact("langchain4j-*").version("0.35.*"),
            DependencyFilter::new().group("com.amazon.awssdk").artifact("s3"),
        ];
        for filter in &filters {
            let compiled = CompiledFilter::compile(filter).unwrap();
            for artifact in &artifacts {
                assert_eq!(compiled.matches(artifact), matches(artifact, filter));
            }
        }
    }

    #[test]
    fn test_filter_set_matches_any() {
        let set = FilterSet::compile(&[
            DependencyFilter::new().artifact("foo"),
            DependencyFilter::new().artifact("bar"),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.matches_any(&ArtifactIdentity::new("g", "bar", "1")));
        assert!(!set.matches_any(&ArtifactIdentity::new("g", "baz", "1")));
        assert!(FilterSet::default().is_empty());
    }
}
