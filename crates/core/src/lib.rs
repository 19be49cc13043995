pub mod error;
pub mod logging;
pub mod util;

pub mod analyzer;
pub mod archive;
pub mod config;
pub mod filter;
pub mod project;
pub mod slimmer;

pub use analyzer::{Analysis, AnalysisMode, DependencySetAnalyzer};
pub use archive::{ArchiveRewriter, DryRunReport, RewriteStats};
pub use config::{ConfigFile, Configuration, ProfileRegistry, SlimOptions};
pub use error::{Result, SlimError};
pub use project::{DependencyGraph, GraphFileResolver, GraphFormat, ProjectModel};
pub use slimmer::{SlimOutcome, SlimSummary, Slimmer};
