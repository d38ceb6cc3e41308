//! CLI command implementations.

use colored::Colorize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use trellis_core::read_rows_from_path;
use trellis_graph::{
    ExpandOptions, GraphBuilder, GraphStore, GraphView, QueryEngine, QueryOptions, SnapshotStore,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Default snapshot location in the user data directory.
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("trellis"))
        .unwrap_or_else(|| PathBuf::from(".trellis"))
}

/// Load a CSV hierarchy and persist the resulting graph.
pub fn load(file: &Path, store_path: &Path) -> Result<()> {
    let rows = read_rows_from_path(file)?;
    debug!(rows = rows.len(), "rows read");

    let graph = GraphBuilder::from_rows(rows).build()?;

    let store = SnapshotStore::open(store_path)?;
    store.save(&graph)?;

    println!(
        "{} Loaded {} nodes and {} relationships from {}",
        "✓".green(),
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan(),
        file.display()
    );

    Ok(())
}

fn open_graph(store_path: &Path) -> Result<GraphStore> {
    let store = SnapshotStore::open(store_path)?;
    store
        .load()?
        .ok_or_else(|| "no graph loaded; run `trellis load <file>` first".into())
}

/// Query the graph with the given filters.
pub fn query(
    store_path: &Path,
    filter_node: Option<String>,
    path_start: Option<String>,
    path_end: Option<String>,
    relationships: Option<Vec<String>>,
    max_hops: Option<usize>,
    json: bool,
) -> Result<()> {
    let graph = open_graph(store_path)?;
    let engine = QueryEngine::new(&graph);

    let options = QueryOptions {
        filter_node,
        path_start,
        path_end,
        visible_relationships: relationships.map(to_set),
        max_path_hops: max_hops,
    };
    let view = engine.query(&options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_view(&view);
    Ok(())
}

fn print_view(view: &GraphView) {
    println!("{}", "Nodes".cyan().bold());
    for node in &view.nodes {
        let line = format!("  {} {} (size {})", node.kind, node.id, node.size);
        if node.visible {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }

    println!("\n{}", "Links".cyan().bold());
    for link in &view.links {
        let line = format!("  {} -[{}]- {}", link.source, link.relationship, link.target);
        if link.visible {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }

    println!(
        "\nTotal nodes: {}  Visible nodes: {}",
        view.nodes.len(),
        view.visible_node_count().to_string().green()
    );
    println!(
        "Total relationships: {}  Visible relationships: {}",
        view.links.len(),
        view.visible_link_count().to_string().green()
    );
}

/// Reveal the direct neighborhood of a node.
///
/// The CLI keeps no visibility state between invocations, so the delta
/// is computed against an empty visible set: the full neighborhood.
pub fn expand(
    store_path: &Path,
    node: &str,
    relationships: Option<Vec<String>>,
    json: bool,
) -> Result<()> {
    let graph = open_graph(store_path)?;
    let engine = QueryEngine::new(&graph);

    let options = ExpandOptions {
        visible_relationships: relationships.map(to_set),
        ..Default::default()
    };
    let delta = engine.expand(node, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&delta)?);
        return Ok(());
    }

    println!(
        "{} Revealed {} nodes and {} links around {}",
        "✓".green(),
        delta.nodes.len().to_string().cyan(),
        delta.links.len().to_string().cyan(),
        node
    );
    for link in &delta.links {
        println!("  {} -[{}]- {}", link.source, link.relationship, link.target);
    }

    Ok(())
}

/// List all node ids, sorted.
pub fn nodes(store_path: &Path) -> Result<()> {
    let graph = open_graph(store_path)?;
    for id in graph.node_ids() {
        println!("{}", id);
    }
    Ok(())
}

/// List all relationship labels, sorted and deduplicated.
pub fn relationships(store_path: &Path) -> Result<()> {
    let graph = open_graph(store_path)?;
    for label in graph.relationship_types() {
        println!("{}", label);
    }
    Ok(())
}

/// Show graph statistics.
pub fn stats(store_path: &Path) -> Result<()> {
    let graph = open_graph(store_path)?;
    let stats = graph.stats();

    println!("Nodes:              {}", stats.node_count.to_string().cyan());
    println!("Relationships:      {}", stats.edge_count.to_string().cyan());
    println!(
        "Relationship types: {}",
        stats.relationship_types.to_string().cyan()
    );

    Ok(())
}

fn to_set(labels: Vec<String>) -> HashSet<String> {
    labels.into_iter().collect()
}
