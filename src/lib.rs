pub mod config;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod render;
pub mod result;
pub mod style;

pub use config::Config;
pub use error::{EventGraphError, Result};
pub use graph::{build_network_graph, get_canonical_mention, get_nodes_and_edges, EventGraph, ExtractOptions};
pub use pipeline::{build_graph, plot, plot_with, PlotSummary};
pub use result::ExtractionResult;
