//! End-to-end sequencing: extract, assemble, render.

use std::path::Path;

use crate::error::Result;
use crate::graph::{build_network_graph, get_nodes_and_edges, EventGraph, ExtractOptions};
use crate::render::{Canvas, Renderer};
use crate::result::ExtractionResult;
use crate::style::StyleTable;

/// Counts from one run, for logging and inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotSummary {
    pub extracted_nodes: usize,
    pub extracted_edges: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub skipped_edges: usize,
}

/// Extract and assemble without rendering.
pub fn build_graph(
    result: &ExtractionResult,
    options: &ExtractOptions,
    style: &StyleTable,
    drop_isolates: bool,
) -> Result<(EventGraph, PlotSummary)> {
    let (nodes, edges) = get_nodes_and_edges(result, options)?;
    let graph = build_network_graph(&nodes, &edges, style, drop_isolates)?;

    let summary = PlotSummary {
        extracted_nodes: nodes.len(),
        extracted_edges: edges.len(),
        graph_nodes: graph.node_count(),
        graph_edges: graph.edge_count(),
        skipped_edges: graph.skipped_edges().len(),
    };
    Ok((graph, summary))
}

/// Build the graph with isolates dropped and hand it to `renderer`.
pub fn plot(
    result: &ExtractionResult,
    options: &ExtractOptions,
    style: &StyleTable,
    renderer: &dyn Renderer,
    canvas: &Canvas,
    destination: &Path,
) -> Result<PlotSummary> {
    plot_with(result, options, style, true, renderer, canvas, destination)
}

/// Like [`plot`], with isolate dropping under the caller's control.
pub fn plot_with(
    result: &ExtractionResult,
    options: &ExtractOptions,
    style: &StyleTable,
    drop_isolates: bool,
    renderer: &dyn Renderer,
    canvas: &Canvas,
    destination: &Path,
) -> Result<PlotSummary> {
    let (graph, summary) = build_graph(result, options, style, drop_isolates)?;
    renderer.render(&graph.to_network(), canvas, destination)?;

    log::info!(
        "Plotted {} of {} nodes and {} of {} edges ({} skipped)",
        summary.graph_nodes,
        summary.extracted_nodes,
        summary.graph_edges,
        summary.extracted_edges,
        summary.skipped_edges
    );
    Ok(summary)
}
