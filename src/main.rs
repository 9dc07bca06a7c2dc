use anyhow::{Context, Result};
use clap::Parser;
use eventgraph::graph::NodeCategory;
use eventgraph::render::RenderFormat;
use eventgraph::{plot_with, Config, ExtractionResult};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "eventgraph")]
#[command(about = "Render an event-extraction result as an interactive graph")]
struct Args {
    /// Extraction result JSON file ("-" reads stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Comma-separated node categories: event,trigger,entity_group,entity
    #[arg(short, long)]
    node_types: Option<String>,

    /// Keep only nodes scoring strictly above this value
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: html or json
    #[arg(short, long)]
    format: Option<RenderFormat>,

    /// Keep nodes that end up without edges
    #[arg(long)]
    keep_isolates: bool,
}

fn read_result(input: &Path) -> Result<ExtractionResult> {
    let result = if input == Path::new("-") {
        ExtractionResult::from_reader(std::io::stdin().lock())
    } else {
        let file = std::fs::File::open(input)
            .with_context(|| format!("Failed to open {}", input.display()))?;
        ExtractionResult::from_reader(std::io::BufReader::new(file))
    };
    result.with_context(|| format!("Failed to load extraction result from {}", input.display()))
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

    let mut options = config.extract_options()?;
    if let Some(list) = &args.node_types {
        options.categories = NodeCategory::parse_list(list)?;
    }
    if let Some(threshold) = args.threshold {
        options.set_threshold(threshold).context("Invalid --threshold")?;
    }
    let format = args.format.unwrap_or(config.render.format);
    let output = args.output.unwrap_or_else(|| config.render.output.clone());

    log::info!("Reading extraction result from {}", args.input.display());
    let result = read_result(&args.input)?;
    log::info!(
        "Loaded {} events and {} entity groups",
        result.events.len(),
        result.entities.len()
    );

    let style = config.style_table()?;
    let renderer = format.renderer();
    let drop_isolates = config.graph.drop_isolates && !args.keep_isolates;
    plot_with(
        &result,
        &options,
        &style,
        drop_isolates,
        renderer.as_ref(),
        &config.canvas(),
        &output,
    )
    .with_context(|| format!("Failed to plot graph to {}", output.display()))?;

    Ok(())
}
