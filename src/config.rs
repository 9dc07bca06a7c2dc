use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::error::{EventGraphError, Result};
use crate::graph::{CanonicalPolicy, ExtractOptions, NodeCategory};
use crate::render::{Canvas, RenderFormat};
use crate::style::{CategoryStyle, StyleTable};

const DEFAULT_CONFIG_FILE: &str = "eventgraph.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// What to extract and how to assemble it
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_node_types")]
    pub node_types: Vec<String>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default = "default_canonical_policy")]
    pub canonical_policy: String,
    #[serde(default = "default_drop_isolates")]
    pub drop_isolates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            graph: GraphConfig::default(),
            render: RenderConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_types: default_node_types(),
            threshold: 0.0,
            canonical_policy: default_canonical_policy(),
            drop_isolates: default_drop_isolates(),
        }
    }
}

/// Output artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_height")]
    pub height: String,
    #[serde(default = "default_width")]
    pub width: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub format: RenderFormat,
    #[serde(default)]
    pub heading: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            width: default_width(),
            output: default_output(),
            format: RenderFormat::default(),
            heading: String::new(),
        }
    }
}

/// Overrides layered on top of the built-in style tables
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    /// Keyed by category name (`event`, `trigger`, `entity_group`, `entity`)
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryStyle>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub default_tag_color: Option<String>,
    pub edge_color: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_node_types() -> Vec<String> {
    NodeCategory::ALL.iter().map(|c| c.to_string()).collect()
}

fn default_canonical_policy() -> String {
    CanonicalPolicy::Longest.to_string()
}

fn default_drop_isolates() -> bool {
    true
}

fn default_height() -> String {
    "600px".to_string()
}

fn default_width() -> String {
    "800px".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("nx.html")
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in EVENTGRAPH_CONFIG environment variable (must exist)
    /// 2. ./eventgraph.toml in current directory (defaults if absent)
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        match Self::config_path() {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// The file [`Config::load`] reads, or `None` when it falls back to defaults.
    pub fn config_path() -> Option<PathBuf> {
        match std::env::var("EVENTGRAPH_CONFIG") {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                path.exists().then_some(path)
            }
        }
    }

    pub fn from_file(path: PathBuf) -> Result<Self> {
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            EventGraphError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)
            .map_err(|e| EventGraphError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.graph.threshold) {
            return Err(EventGraphError::Config(
                "graph.threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        self.node_categories()?;

        self.graph
            .canonical_policy
            .parse::<CanonicalPolicy>()
            .map_err(|e| EventGraphError::Config(e.to_string()))?;

        if self.render.height.trim().is_empty() || self.render.width.trim().is_empty() {
            return Err(EventGraphError::Config(
                "render.height and render.width must not be empty".to_string(),
            ));
        }

        self.style_categories()?;

        Ok(())
    }

    pub fn node_categories(&self) -> Result<Vec<NodeCategory>> {
        self.graph
            .node_types
            .iter()
            .map(|name| {
                name.parse::<NodeCategory>()
                    .map_err(|e| EventGraphError::Config(e.to_string()))
            })
            .collect()
    }

    fn style_categories(&self) -> Result<BTreeMap<NodeCategory, CategoryStyle>> {
        self.style
            .categories
            .iter()
            .map(|(name, style)| {
                name.parse::<NodeCategory>()
                    .map(|c| (c, style.clone()))
                    .map_err(|e| EventGraphError::Config(e.to_string()))
            })
            .collect()
    }

    pub fn extract_options(&self) -> Result<ExtractOptions> {
        Ok(ExtractOptions {
            categories: self.node_categories()?,
            threshold: self.graph.threshold,
            canonical_policy: CanonicalPolicy::parse(&self.graph.canonical_policy),
        })
    }

    /// Built-in style tables with this config's overrides applied.
    pub fn style_table(&self) -> Result<StyleTable> {
        let mut table = StyleTable::default().merge(&self.style_categories()?, &self.style.tags);
        if let Some(color) = &self.style.default_tag_color {
            table.default_tag_color = color.clone();
        }
        if let Some(color) = &self.style.edge_color {
            table.edge_color = color.clone();
        }
        Ok(table)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            height: self.render.height.clone(),
            width: self.render.width.clone(),
            heading: self.render.heading.clone(),
        }
    }
}
