use jarslim_core::config::SlimmingProfile;
use jarslim_core::util::format_bytes;
use jarslim_core::{Analysis, DryRunReport, RewriteStats, SlimOutcome, SlimSummary};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct MetricRow {
    #[tabled(rename = "Metric")]
    pub metric: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct DependencyRow {
    #[tabled(rename = "Dependency")]
    pub name: String,
    #[tabled(rename = "Status")]
    pub status: &'static str,
}

#[derive(Tabled)]
pub struct ProfileRow {
    #[tabled(rename = "Profile")]
    pub name: String,
    #[tabled(rename = "Includes")]
    pub includes: String,
    #[tabled(rename = "Excludes")]
    pub excludes: String,
}

impl ProfileRow {
    pub fn from_profile(profile: &SlimmingProfile) -> Self {
        let join = |filters: &[jarslim_api::DependencyFilter]| {
            if filters.is_empty() {
                "-".to_string()
            } else {
                filters
                    .iter()
                    .map(|f| {
                        format!(
                            "{}:{}",
                            f.group_id.as_deref().unwrap_or("*"),
                            f.artifact_id.as_deref().unwrap_or("*")
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        };

        Self {
            name: profile.name().to_string(),
            includes: join(profile.includes()),
            excludes: join(profile.excludes()),
        }
    }
}

fn analysis_rows(analysis: &Analysis) -> Vec<MetricRow> {
    let mut rows = vec![
        MetricRow {
            metric: "Mode",
            value: analysis.mode.to_string(),
        },
        MetricRow {
            metric: "Dependencies excluded",
            value: analysis.excluded.len().to_string(),
        },
    ];
    if analysis.partial_graph {
        rows.push(MetricRow {
            metric: "Warning",
            value: "Graph lists shared dependencies once; includes may be incomplete".to_string(),
        });
    }
    if !analysis.unresolved.is_empty() {
        rows.push(MetricRow {
            metric: "Unresolved roots",
            value: analysis
                .unresolved
                .iter()
                .map(|a| a.key())
                .collect::<Vec<_>>()
                .join("\n"),
        });
    }
    rows
}

fn stats_rows(stats: &RewriteStats) -> Vec<MetricRow> {
    let mut rows = vec![
        MetricRow {
            metric: "Entries processed",
            value: stats.total_entries.to_string(),
        },
        MetricRow {
            metric: "Entries excluded",
            value: stats.excluded_entries.to_string(),
        },
    ];
    if stats.failed_entries > 0 {
        rows.push(MetricRow {
            metric: "Entries failed",
            value: stats.failed_entries.to_string(),
        });
    }
    rows
}

pub fn summary_rows(summary: &SlimSummary) -> Vec<MetricRow> {
    let mut rows = analysis_rows(&summary.analysis);
    rows.extend(stats_rows(&summary.stats));
    rows.extend([
        MetricRow {
            metric: "Content excluded",
            value: format_bytes(summary.stats.excluded_bytes),
        },
        MetricRow {
            metric: "Original size",
            value: format_bytes(summary.original_size),
        },
        MetricRow {
            metric: "New size",
            value: format_bytes(summary.new_size),
        },
        MetricRow {
            metric: "Reduction",
            value: format!(
                "{} ({:.1}%)",
                format_bytes(summary.saved_bytes()),
                summary.reduction()
            ),
        },
    ]);
    rows
}

pub fn report_rows(analysis: &Analysis, report: &DryRunReport) -> Vec<MetricRow> {
    let mut rows = analysis_rows(analysis);
    rows.extend(stats_rows(&report.stats));
    rows.extend([
        MetricRow {
            metric: "Total artifact size",
            value: format_bytes(report.stats.total_bytes),
        },
        MetricRow {
            metric: "Size to be excluded",
            value: format_bytes(report.stats.excluded_bytes),
        },
        MetricRow {
            metric: "Estimated reduction",
            value: format!("{:.1}%", report.estimated_reduction()),
        },
    ]);
    rows
}

/// Excluded names first, then included ones; a name can appear under both.
pub fn dependency_rows(report: &DryRunReport) -> Vec<DependencyRow> {
    let excluded = report.excluded.iter().map(|name| DependencyRow {
        name: name.clone(),
        status: "excluded",
    });
    let included = report.included.iter().map(|name| DependencyRow {
        name: name.clone(),
        status: "included",
    });
    excluded.chain(included).collect()
}

pub fn print_outcome(outcome: &SlimOutcome) {
    match outcome {
        SlimOutcome::Disabled => println!("Dependency slimming is disabled."),
        SlimOutcome::Applied(summary) => {
            println!("{}", Table::new(summary_rows(summary)));
        }
        SlimOutcome::DryRun { analysis, report } => {
            println!("DRY RUN: {} was not modified.", report.archive.display());
            println!("{}", Table::new(report_rows(analysis, report)));
            let deps = dependency_rows(report);
            if !deps.is_empty() {
                println!("{}", Table::new(deps));
            }
        }
    }
}
