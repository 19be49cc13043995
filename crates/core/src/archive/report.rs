use super::matcher::{JAR_SUFFIX, LIB_MARKER};
use super::rewriter::RewriteStats;
use crate::util::{format_bytes, percentage};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

/// Display name of the dependency an entry came from.
///
/// Library jars lose their extension and everything after the last `-`
/// (`BOOT-INF/lib/langchain4j-core-0.35.0.jar` → `langchain4j-core`); any other entry is
/// grouped under its first path segment.
pub fn dependency_name(entry_path: &str) -> String {
    if entry_path.contains(LIB_MARKER) {
        let file_name = entry_path.rsplit('/').next().unwrap_or(entry_path);
        if let Some(stem) = file_name.strip_suffix(JAR_SUFFIX) {
            return match stem.rfind('-') {
                Some(idx) if idx > 0 => stem[..idx].to_string(),
                _ => stem.to_string(),
            };
        }
    }

    match entry_path.find('/') {
        Some(idx) => entry_path[..idx].to_string(),
        None => entry_path.to_string(),
    }
}

/// Result of a dry run over an archive.
#[derive(Debug, Clone)]
pub struct DryRunReport {
    pub archive: PathBuf,
    pub stats: RewriteStats,
    /// Dependency names with at least one kept entry.
    pub included: BTreeSet<String>,
    /// Dependency names with at least one dropped entry.
    pub excluded: BTreeSet<String>,
}

impl DryRunReport {
    pub fn new(archive: PathBuf) -> Self {
        Self {
            archive,
            stats: RewriteStats::default(),
            included: BTreeSet::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Share of uncompressed content that would be removed, in percent.
    pub fn estimated_reduction(&self) -> f64 {
        percentage(self.stats.excluded_bytes, self.stats.total_bytes)
    }

    pub fn log_summary(&self, list_dependencies: bool) {
        info!("=== JAR Content Analysis ===");
        info!("Total artifact size: {}", format_bytes(self.stats.total_bytes));
        info!("Size to be excluded: {}", format_bytes(self.stats.excluded_bytes));
        info!("Estimated size reduction: {:.1}%", self.estimated_reduction());

        if list_dependencies {
            info!("Dependencies to be INCLUDED:");
            for name in &self.included {
                info!("  + {}", name);
            }
            info!("Dependencies to be EXCLUDED:");
            for name in &self.excluded {
                info!("  - {}", name);
            }
        }
    }
}
