//! CLI command implementations.
//!
//! Every query command loads the edge file, builds a fresh graph, runs one
//! query and renders it. Resolving ids to labels happens here, never in the
//! graph crate.

use crate::config::{Config, CONFIG_DIR, CONFIG_FILE};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use interlock_core::EntityId;
use interlock_graph::{EdgeLevel, EdgeList, Interlock, NodeLevel, RelationshipsGraph};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Initialize Interlock config in a directory.
pub fn init(path: &Path) -> Result<()> {
    let config_dir = path.join(CONFIG_DIR);
    let config_path = config_dir.join(CONFIG_FILE);

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    fs::create_dir_all(&config_dir)?;
    fs::write(
        &config_path,
        serde_json::to_string_pretty(&Config::default())?,
    )?;

    println!("{} Initialized Interlock in {}", "✓".green(), path.display());
    println!("  Edit {} to change query defaults", config_path.display().to_string().cyan());

    Ok(())
}

/// Loads edge records, showing a spinner for large files.
fn load_edges(file: &Path) -> Result<EdgeList> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Loading {}...", file.display()));

    let result = EdgeList::from_json_file(file);
    spinner.finish_and_clear();

    Ok(result?)
}

fn build_graph(file: &Path) -> Result<RelationshipsGraph> {
    let edges = load_edges(file)?;
    Ok(RelationshipsGraph::build(edges.into_records())?)
}

fn join_ids<T: Display>(ids: impl IntoIterator<Item = T>) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct DegreesOutput<'a> {
    roots: &'a [EntityId],
    levels: Vec<NodeLevel>,
}

/// Connections of the roots, grouped by degree.
pub fn degrees(file: &Path, roots: &[EntityId], depth: usize, json: bool) -> Result<()> {
    let graph = build_graph(file)?;
    let levels = graph.connected_nodes(roots.iter().copied(), depth)?;

    if json {
        let output = DegreesOutput { roots, levels };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if levels.is_empty() {
        println!("No connections found for {}", join_ids(roots));
        return Ok(());
    }

    for (i, level) in levels.iter().enumerate() {
        println!(
            "{} {}",
            format!("Degree {}", i + 1).cyan().bold(),
            format!("({} entities)", level.len()).dimmed()
        );
        println!("  {}", join_ids(level));
    }

    Ok(())
}

#[derive(Serialize)]
struct EdgeOutput {
    id: u64,
    entity1_id: u64,
    entity2_id: u64,
    category_id: u8,
    category: &'static str,
}

fn resolve_level(graph: &RelationshipsGraph, level: &EdgeLevel) -> Vec<EdgeOutput> {
    level
        .iter()
        .filter_map(|id| graph.relationship(*id))
        .map(|rel| EdgeOutput {
            id: rel.id.get(),
            entity1_id: rel.entity1.get(),
            entity2_id: rel.entity2.get(),
            category_id: rel.category.code(),
            category: rel.category.label(),
        })
        .collect()
}

/// Relationships around the roots, grouped by hop.
pub fn edges(file: &Path, roots: &[EntityId], depth: usize, json: bool) -> Result<()> {
    let graph = build_graph(file)?;
    let levels = graph.connected_edge_ids(roots.iter().copied(), depth)?;
    let resolved: Vec<Vec<EdgeOutput>> = levels
        .iter()
        .map(|level| resolve_level(&graph, level))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    if resolved.is_empty() {
        println!("No relationships found for {}", join_ids(roots));
        return Ok(());
    }

    for (i, level) in resolved.iter().enumerate() {
        println!(
            "{} {}",
            format!("Hop {}", i + 1).cyan().bold(),
            format!("({} relationships)", level.len()).dimmed()
        );
        for edge in level {
            println!(
                "  {} {} → {} {}",
                format!("#{}", edge.id).yellow(),
                edge.entity1_id,
                edge.entity2_id,
                edge.category.dimmed()
            );
        }
    }

    Ok(())
}

/// Ranked second-degree interlocks of the roots.
///
/// The graph is built from the roots' relationship network only, which is
/// all a two-hop ranking needs. Malformed records outside that network are
/// never validated, so a file that `degrees`, `edges` and `stats` reject can
/// still produce interlocks here.
pub fn interlocks(file: &Path, roots: &[EntityId], limit: usize, json: bool) -> Result<()> {
    let edges = load_edges(file)?;
    let graph = RelationshipsGraph::from_source(&edges, roots.iter().copied())?;

    let mut ranked = graph.sorted_interlocks(roots.iter().copied());
    let total = ranked.len();
    ranked.truncate(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No interlocks found for {}", join_ids(roots));
        return Ok(());
    }

    println!(
        "{} {}",
        "Interlocks".cyan().bold(),
        format!("(showing {} of {})", ranked.len(), total).dimmed()
    );
    for (rank, Interlock { entity, count }) in ranked.iter().enumerate() {
        println!(
            "  {:>3}. {} {}",
            rank + 1,
            entity.to_string().cyan(),
            format!("({} shared)", count).dimmed()
        );
    }

    Ok(())
}

/// Show graph statistics.
pub fn stats(file: &Path) -> Result<()> {
    let graph = build_graph(file)?;
    let stats = graph.stats();

    println!("{}", "Interlock Graph".cyan().bold());
    println!();
    println!("  {} {}", "Entities:".dimmed(), stats.node_count);
    println!("  {} {}", "Relationships:".dimmed(), stats.edge_count);

    Ok(())
}
