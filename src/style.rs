//! Visual style tables keyed by node category and by type tag.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::graph::NodeCategory;
use crate::result::{ENTITY_TYPES, TRIGGER_TYPES};

/// Size, shape and base color for one node category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub size: u32,
    pub shape: String,
    pub color: String,
}

impl CategoryStyle {
    fn new(size: u32, shape: &str, color: &str) -> Self {
        Self {
            size,
            shape: shape.to_string(),
            color: color.to_string(),
        }
    }
}

/// Evenly spaced samples of a diverging red-yellow-blue ramp, one per known tag.
const TAG_PALETTE: [&str; 20] = [
    "#9e0142", "#bb2149", "#d7404e", "#e75948", "#f57446", "#fa9656", "#fdb668", "#fed07e",
    "#fee796", "#fff7b1", "#f8fcb5", "#ebf7a0", "#d3ed9c", "#b4e1a2", "#92d3a4", "#6dc5a5",
    "#50aaaf", "#358bbc", "#476db0", "#5e4fa2",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTable {
    pub categories: BTreeMap<NodeCategory, CategoryStyle>,
    pub tags: HashMap<String, String>,
    pub default_tag_color: String,
    pub edge_color: String,
}

impl Default for StyleTable {
    fn default() -> Self {
        let categories = BTreeMap::from([
            (NodeCategory::Event, CategoryStyle::new(10, "box", "#dbe3e5")),
            (NodeCategory::EntityGroup, CategoryStyle::new(6, "dot", "#776d8a")),
            (NodeCategory::Entity, CategoryStyle::new(4, "square", "#f3e6e3")),
            (NodeCategory::Trigger, CategoryStyle::new(4, "diamond", "#f3e6e3")),
        ]);

        let mut tags: HashMap<String, String> = ENTITY_TYPES
            .iter()
            .chain(TRIGGER_TYPES.iter())
            .zip(TAG_PALETTE.iter())
            .map(|(tag, color)| (tag.to_string(), color.to_string()))
            .collect();
        tags.insert("ROLE".to_string(), "grey".to_string());

        Self {
            categories,
            tags,
            default_tag_color: "grey".to_string(),
            edge_color: "grey".to_string(),
        }
    }
}

impl StyleTable {
    /// Category style, falling back to a plain dot for categories missing from the table.
    pub fn category(&self, category: NodeCategory) -> CategoryStyle {
        self.categories
            .get(&category)
            .cloned()
            .unwrap_or_else(|| CategoryStyle::new(5, "dot", &self.default_tag_color))
    }

    /// Tag color; unknown tags get the neutral default.
    pub fn tag_color(&self, tag: &str) -> &str {
        self.tags
            .get(tag)
            .map(String::as_str)
            .unwrap_or(self.default_tag_color.as_str())
    }

    /// Layer overrides on top of this table.
    pub fn merge(
        mut self,
        categories: &BTreeMap<NodeCategory, CategoryStyle>,
        tags: &HashMap<String, String>,
    ) -> Self {
        for (category, style) in categories {
            self.categories.insert(*category, style.clone());
        }
        for (tag, color) in tags {
            self.tags.insert(tag.clone(), color.clone());
        }
        self
    }
}
