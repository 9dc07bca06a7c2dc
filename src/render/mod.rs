//! Rendering: turn an assembled graph into a viewable artifact.
//!
//! Renderers receive a flat [`Network`] (nodes and edges with their visual
//! attributes) and know nothing about how it was extracted.

mod html;
mod json;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{EventGraphError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
    pub tag: String,
    pub group: String,
    pub score: f64,
    pub size: u32,
    pub color: String,
    pub shape: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub weight: f64,
    pub color: String,
}

/// Generic graph-with-attributes handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

/// Output canvas size as CSS lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub height: String,
    pub width: String,
    #[serde(default)]
    pub heading: String,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            height: "600px".to_string(),
            width: "800px".to_string(),
            heading: String::new(),
        }
    }
}

/// Trait for graph renderers
pub trait Renderer {
    /// Write `network` to `destination`.
    fn render(&self, network: &Network, canvas: &Canvas, destination: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Html,
    Json,
}

impl RenderFormat {
    /// Renderer for this format.
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            RenderFormat::Html => Box::new(HtmlRenderer),
            RenderFormat::Json => Box::new(JsonRenderer),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFormat::Html => f.write_str("html"),
            RenderFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = EventGraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(RenderFormat::Html),
            "json" => Ok(RenderFormat::Json),
            other => Err(EventGraphError::InvalidInput(format!(
                "unknown render format `{}` (expected html|json)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("html".parse::<RenderFormat>().unwrap(), RenderFormat::Html);
        assert_eq!(" HTM ".parse::<RenderFormat>().unwrap(), RenderFormat::Html);
        assert_eq!("json".parse::<RenderFormat>().unwrap(), RenderFormat::Json);
        assert!("dot".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_default_canvas() {
        let canvas = Canvas::default();
        assert_eq!(canvas.height, "600px");
        assert_eq!(canvas.width, "800px");
    }
}
