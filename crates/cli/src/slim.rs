use crate::{view, SlimArgs};
use jarslim_core::{
    logging, ConfigFile, DependencyGraph, GraphFileResolver, ProfileRegistry, ProjectModel,
    SlimOptions, Slimmer,
};
use tracing::info;

/// Config file first, then command-line filters appended and flags applied on top.
pub(crate) fn build_options(args: &SlimArgs) -> jarslim_core::Result<SlimOptions> {
    let mut options = match &args.config {
        Some(path) => ConfigFile::load(path)?.into_options(),
        None => SlimOptions::default(),
    };

    options.includes.extend(args.includes.iter().cloned());
    options.excludes.extend(args.excludes.iter().cloned());
    if args.profile.is_some() {
        options.profile = args.profile.clone();
    }
    if args.dry_run {
        options.dry_run = true;
    }
    if args.verbose {
        options.verbose = true;
    }
    if args.disable {
        options.enabled = false;
    }
    if args.no_preserve_manifest {
        options.preserve_manifest = false;
    }
    if args.no_remove_empty_directories {
        options.remove_empty_directories = false;
    }

    Ok(options)
}

pub fn run(args: SlimArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(&args)?;
    let _guard = logging::init_logging("slim", true, options.verbose);

    let graph = if options.enabled {
        let graph = DependencyGraph::load(&args.graph)?;
        info!(
            "Loaded dependency graph with {} artifacts from {}",
            graph.len(),
            args.graph.display()
        );
        graph
    } else {
        DependencyGraph::new()
    };

    let project = ProjectModel::from_graph(&graph);
    let resolver = GraphFileResolver::new(graph);
    let registry = ProfileRegistry::builtin();

    let outcome = Slimmer::new(&registry, &resolver).run(&args.archive, &project, &options)?;
    view::print_outcome(&outcome);
    Ok(())
}
