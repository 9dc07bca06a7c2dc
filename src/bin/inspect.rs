use anyhow::{Context, Result};
use clap::Parser;
use eventgraph::graph::{get_nodes_and_edges, EdgeKind, NodeCategory};
use eventgraph::{build_network_graph, Config, ExtractionResult};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inspect")]
#[command(about = "Print node and edge statistics for an extraction result")]
struct Args {
    /// Extraction result JSON file
    input: PathBuf,

    /// Keep only nodes scoring strictly above this value
    #[arg(short, long)]
    threshold: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("Failed to load configuration")?;
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", &config.log_level)
    ).init();
    match Config::config_path() {
        Some(path) => log::debug!("Loaded configuration from {}", path.display()),
        None => log::debug!("No configuration file found, using defaults"),
    }

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let result = ExtractionResult::from_reader(std::io::BufReader::new(file))?;

    let mut options = config.extract_options()?;
    if let Some(threshold) = args.threshold {
        options.set_threshold(threshold).context("Invalid --threshold")?;
    }

    let (nodes, edges) = get_nodes_and_edges(&result, &options)?;
    let graph = build_network_graph(&nodes, &edges, &config.style_table()?, config.graph.drop_isolates)?;

    let mut by_category: BTreeMap<NodeCategory, usize> = BTreeMap::new();
    for node in &nodes {
        *by_category.entry(node.category).or_insert(0) += 1;
    }
    let arguments = edges.iter().filter(|e| e.kind == EdgeKind::Argument).count();
    let corefs = edges.len() - arguments;

    println!("\n=== {} ===\n", args.input.display());
    println!("Events: {}   Entity groups: {}", result.events.len(), result.entities.len());
    println!("Threshold: {}", options.threshold);
    println!("{:-<40}", "");
    println!("{:<20} {:>10}", "Category", "Nodes");
    println!("{:-<40}", "");
    for (category, count) in &by_category {
        println!("{:<20} {:>10}", category.as_str(), count);
    }
    println!("{:-<40}", "");
    println!("{:<20} {:>10}", "argument edges", arguments);
    println!("{:<20} {:>10}", "coref edges", corefs);
    println!("{:-<40}", "");

    println!("\nAssembled graph:");
    println!("  Nodes: {} (of {})", graph.node_count(), nodes.len());
    println!("  Edges: {} (of {})", graph.edge_count(), edges.len());
    if !graph.skipped_edges().is_empty() {
        println!("  Skipped edges with missing endpoints:");
        for edge in graph.skipped_edges() {
            println!("    {} -> {} ({})", edge.from, edge.to, edge.role);
        }
    }
    println!();

    Ok(())
}
