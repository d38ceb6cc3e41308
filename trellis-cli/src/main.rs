//! Trellis CLI - Command-line interface for Trellis
//!
//! Loads a tabular hierarchy into a persisted graph snapshot and runs
//! visibility queries against it: full graph, node neighborhoods,
//! simple paths, and incremental expansion.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(author = "Trellis Contributors")]
#[command(version)]
#[command(about = "Queryable, filterable hierarchy graphs from tabular input", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Snapshot store location (defaults to the user data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a CSV hierarchy into the snapshot store
    Load {
        /// CSV file with node, parent, type and relationship columns
        file: PathBuf,
    },

    /// Query the graph with composable visibility filters
    Query {
        /// Show only this node and its direct neighbors
        #[arg(long)]
        filter_node: Option<String>,

        /// Start node for a path filter
        #[arg(long, requires = "path_end")]
        path_start: Option<String>,

        /// End node for a path filter
        #[arg(long, requires = "path_start")]
        path_end: Option<String>,

        /// Comma-separated relationship labels to keep visible
        #[arg(long, value_delimiter = ',')]
        relationships: Option<Vec<String>>,

        /// Bound on path length in hops
        #[arg(long)]
        max_hops: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Reveal the direct neighborhood of one node
    Expand {
        /// The node to expand
        node: String,

        /// Comma-separated relationship labels to expand along
        #[arg(long, value_delimiter = ',')]
        relationships: Option<Vec<String>>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List all node ids
    Nodes,

    /// List all relationship labels
    Relationships,

    /// Show graph statistics
    Stats,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let store_path = cli.store.unwrap_or_else(commands::default_store_path);

    let result = match cli.command {
        Commands::Load { file } => commands::load(&file, &store_path),
        Commands::Query {
            filter_node,
            path_start,
            path_end,
            relationships,
            max_hops,
            json,
        } => commands::query(
            &store_path,
            filter_node,
            path_start,
            path_end,
            relationships,
            max_hops,
            json,
        ),
        Commands::Expand {
            node,
            relationships,
            json,
        } => commands::expand(&store_path, &node, relationships, json),
        Commands::Nodes => commands::nodes(&store_path),
        Commands::Relationships => commands::relationships(&store_path),
        Commands::Stats => commands::stats(&store_path),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
