use std::path::PathBuf;

use clap::{Parser, Subcommand};

use caliper::analysis::Analysis;
use caliper::compare::{compare_modules, compare_node_modules};
use caliper::error::Error;
use caliper::expand::{DEFAULT_NODE_LIMIT, ExpandOptions, expand_module_comparison};
use caliper::loader::load_stats;
use caliper::report;
use caliper::stats::ChunkId;
use caliper::suggest::suggestions;

#[derive(Parser)]
#[command(
    name = "caliper",
    version,
    about = "Compare webpack build-statistics files: module diffs, package tables, and dependency graphs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two statistics files (old vs new)
    Compare {
        /// Baseline stats file
        old: PathBuf,

        /// Current stats file
        new: PathBuf,

        /// Restrict the analysis to one chunk id
        #[arg(long)]
        chunk: Option<u32>,

        /// Show top N modules by size change (0 to hide, -1 for all)
        #[arg(long, default_value_t = 20, allow_hyphen_values = true)]
        top: i32,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,

        /// Ignore the sidecar stats cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Summarize a single statistics file
    Overview {
        /// Stats file
        file: PathBuf,

        /// Restrict the analysis to one chunk id
        #[arg(long)]
        chunk: Option<u32>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,

        /// Ignore the sidecar stats cache
        #[arg(long)]
        no_cache: bool,
    },

    /// List external packages with sizes and import kinds
    Packages {
        /// Stats file
        file: PathBuf,

        /// Restrict the analysis to one chunk id
        #[arg(long)]
        chunk: Option<u32>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,

        /// Ignore the sidecar stats cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Expand the imported-by graph around a module comparison
    Graph {
        /// Baseline stats file
        old: PathBuf,

        /// Current stats file
        new: PathBuf,

        /// Module to expand around (normalized module name)
        #[arg(long)]
        focus: String,

        /// Restrict the analysis to one chunk id
        #[arg(long)]
        chunk: Option<u32>,

        /// Maximum traversal depth
        #[arg(long)]
        max_depth: Option<u32>,

        /// Node budget for the expansion
        #[arg(long, default_value_t = DEFAULT_NODE_LIMIT)]
        limit: usize,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,

        /// Ignore the sidecar stats cache
        #[arg(long)]
        no_cache: bool,
    },
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Commands::Compare {
            old,
            new,
            chunk,
            top,
            json,
            no_cache,
        } => {
            let chunk = chunk.map(ChunkId);
            let mut old = Analysis::new(load_stats(&old, no_cache)?);
            let mut new = Analysis::new(load_stats(&new, no_cache)?);

            let modules = compare_modules(old.doc(), new.doc(), chunk);
            let packages = compare_node_modules(&old.packages(chunk), &new.packages(chunk));
            let tips = suggestions(&mut old, &mut new);

            if json {
                report::print_comparison_json(
                    &mut old, &mut new, chunk, &modules, &packages, &tips, top,
                );
            } else {
                report::print_comparison(
                    &mut old, &mut new, chunk, &modules, &packages, &tips, top,
                );
            }
        }

        Commands::Overview {
            file,
            chunk,
            json,
            no_cache,
        } => {
            let chunk = chunk.map(ChunkId);
            let mut analysis = Analysis::new(load_stats(&file, no_cache)?);
            if json {
                report::print_overview_json(&mut analysis, chunk);
            } else {
                report::print_overview(&mut analysis, chunk);
            }
        }

        Commands::Packages {
            file,
            chunk,
            json,
            no_cache,
        } => {
            let chunk = chunk.map(ChunkId);
            let mut analysis = Analysis::new(load_stats(&file, no_cache)?);
            if json {
                report::print_packages_json(&mut analysis, chunk);
            } else {
                report::print_packages(&mut analysis, chunk);
            }
        }

        Commands::Graph {
            old,
            new,
            focus,
            chunk,
            max_depth,
            limit,
            json,
            no_cache,
        } => {
            let chunk = chunk.map(ChunkId);
            let old = load_stats(&old, no_cache)?;
            let new = load_stats(&new, no_cache)?;

            let comparisons = compare_modules(&old, &new, chunk);
            let root = comparisons
                .get(&focus)
                .ok_or_else(|| Error::FocusNotFound(focus.clone()))?;

            let opts = ExpandOptions { max_depth, limit };
            let graph = expand_module_comparison(&old, &new, &comparisons, &[root], &opts);

            if json {
                report::print_graph_json(&graph);
            } else {
                report::print_graph(&graph);
            }
        }
    }
    Ok(())
}
