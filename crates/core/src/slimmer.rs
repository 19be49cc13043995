use crate::analyzer::{Analysis, DependencySetAnalyzer};
use crate::archive::{ArchiveRewriter, DryRunReport, RewriteStats};
use crate::config::{ProfileRegistry, SlimOptions};
use crate::error::{Result, SlimError};
use crate::filter::FilterSet;
use crate::project::ProjectModel;
use crate::util::{format_bytes, percentage};
use jarslim_api::DependencyGraphResolver;
use std::path::Path;
use tracing::info;

/// Result of a completed in-place rewrite.
#[derive(Debug, Clone)]
pub struct SlimSummary {
    pub analysis: Analysis,
    pub stats: RewriteStats,
    pub original_size: u64,
    pub new_size: u64,
}

impl SlimSummary {
    pub fn saved_bytes(&self) -> u64 {
        self.original_size.saturating_sub(self.new_size)
    }

    pub fn reduction(&self) -> f64 {
        percentage(self.saved_bytes(), self.original_size)
    }
}

#[derive(Debug, Clone)]
pub enum SlimOutcome {
    Disabled,
    Applied(SlimSummary),
    DryRun {
        analysis: Analysis,
        report: DryRunReport,
    },
}

/// Runs one slimming pass: configuration, analysis, then rewrite or dry run.
pub struct Slimmer<'a> {
    registry: &'a ProfileRegistry,
    resolver: &'a dyn DependencyGraphResolver,
}

impl<'a> Slimmer<'a> {
    pub fn new(registry: &'a ProfileRegistry, resolver: &'a dyn DependencyGraphResolver) -> Self {
        Self { registry, resolver }
    }

    /// Configuration problems are reported before the archive is looked at.
    pub fn run(
        &self,
        archive: &Path,
        project: &ProjectModel,
        options: &SlimOptions,
    ) -> Result<SlimOutcome> {
        if !options.enabled {
            info!("Dependency slimming is disabled");
            return Ok(SlimOutcome::Disabled);
        }

        let config = options.assemble(self.registry)?;
        let include_filters = FilterSet::compile(&config.includes)?;
        let exclude_filters = FilterSet::compile(&config.excludes)?;

        if !archive.is_file() {
            return Err(SlimError::MissingArtifact(archive.to_path_buf()));
        }

        let analysis = DependencySetAnalyzer::new(self.resolver, &project.repositories)
            .verbose(options.verbose)
            .analyze_with(&project.artifacts, &include_filters, &exclude_filters)?;

        if options.verbose {
            info!("=== Dependency Analysis Results ===");
            info!("Mode: {}", analysis.mode);
            info!("Total project dependencies: {}", project.artifacts.len());
            info!("Dependencies to exclude: {}", analysis.excluded.len());
            for dep in &analysis.excluded {
                info!("  - {}", dep.key());
            }
        }

        let rewriter = ArchiveRewriter::new(&analysis.excluded).verbose(options.verbose);

        if options.dry_run {
            info!(
                "DRY RUN: Would process {}",
                archive
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default()
            );
            let report = rewriter.report(archive)?;
            return Ok(SlimOutcome::DryRun { analysis, report });
        }

        let original_size = std::fs::metadata(archive)?.len();
        let stats = rewriter.apply(archive)?;
        let new_size = std::fs::metadata(archive)?.len();

        let summary = SlimSummary {
            analysis,
            stats,
            original_size,
            new_size,
        };
        info!(
            "Slimming complete! Reduced size by {} ({:.1}% reduction)",
            format_bytes(summary.saved_bytes()),
            summary.reduction()
        );

        Ok(SlimOutcome::Applied(summary))
    }
}
