//! Streaming rewrite of a self-contained application archive.

mod matcher;
mod report;
mod rewriter;

pub use matcher::{ArtifactPathMatcher, JAR_SUFFIX, LIB_MARKER, belongs_to, library_basename};
pub use report::{DryRunReport, dependency_name};
pub use rewriter::{ArchiveRewriter, EntryDecision, RewriteStats, temp_path_for};

/// Entries under these prefixes are copied whatever the exclusion set says.
pub const PROTECTED_PREFIXES: &[&str] = &[
    "META-INF/MANIFEST.MF",
    "META-INF/maven/",
    "BOOT-INF/classes/",
    "WEB-INF/classes/",
    "org/springframework/boot/loader/",
];

/// The manifest directory entry itself; protected by exact name only.
pub const MANIFEST_ROOT: &str = "META-INF/";

pub fn is_protected(path: &str) -> bool {
    path == MANIFEST_ROOT || PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p))
}
