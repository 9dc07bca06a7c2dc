//! Plain JSON output for custom frontends.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{Canvas, Network, Renderer};
use crate::error::Result;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, network: &Network, _canvas: &Canvas, destination: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(destination)?);
        serde_json::to_writer_pretty(&mut writer, network)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        log::info!(
            "Wrote {} nodes, {} edges to {}",
            network.nodes.len(),
            network.edges.len(),
            destination.display()
        );
        Ok(())
    }
}
