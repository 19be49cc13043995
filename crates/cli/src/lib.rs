mod profiles;
mod slim;
mod view;

use clap::{Args, Parser, Subcommand};
use jarslim_api::DependencyFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jarslim",
    version,
    about = "Removes unneeded dependency jars from a self-contained application archive",
    long_about = "jarslim rewrites a Spring Boot style fat jar (or a war) in place, dropping the nested \
                  library jars of dependencies selected by include/exclude filters. Transitive \
                  dependencies are followed through an exported dependency graph."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Slim an application archive
    #[command(
        long_about = "Analyzes the project's dependency graph against the configured filters and \
                            removes the matching library jars from the archive. With --dry-run the \
                            archive is left untouched and a size report is printed instead."
    )]
    Slim(SlimArgs),
    /// List the built-in slimming profiles
    Profiles,
}

#[derive(Args, Debug, Clone)]
pub struct SlimArgs {
    /// Path to the archive to slim
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Dependency graph: `mvn dependency:tree -DoutputType=tgf` output or a JSON graph document
    #[arg(
        short,
        long,
        value_name = "FILE",
        long_help = "Dependency graph of the project: `mvn dependency:tree -DoutputType=tgf` output \
                     or a JSON graph document (*.json). A plain TGF tree lists a dependency shared \
                     by several parents under the first one only, so with --include filters an \
                     included artifact can lose a jar it needs. Use the JSON form or a verbose, \
                     non-deduplicated export for include-only and mixed runs."
    )]
    pub graph: PathBuf,

    /// JSON config file; command-line options are applied on top of it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep a dependency and everything it needs: groupId[:artifactId[:version[:type[:classifier]]]]
    #[arg(long = "include", value_name = "FILTER")]
    pub includes: Vec<DependencyFilter>,

    /// Remove a dependency and everything it needs: groupId[:artifactId[:version[:type[:classifier]]]]
    #[arg(long = "exclude", value_name = "FILTER")]
    pub excludes: Vec<DependencyFilter>,

    /// Append the filters of a built-in profile (see `jarslim profiles`)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Report what would be removed without touching the archive
    #[arg(long)]
    pub dry_run: bool,

    /// Log every matched dependency and archive entry
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip slimming entirely
    #[arg(long)]
    pub disable: bool,

    /// Accepted for compatibility; protected entries are always kept
    #[arg(long)]
    pub no_preserve_manifest: bool,

    /// Accepted for compatibility; has no effect
    #[arg(long)]
    pub no_remove_empty_directories: bool,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Slim(args) => slim::run(args),
        Commands::Profiles => profiles::run(),
    }
}
