//! Self-contained interactive HTML page backed by vis-network.

use std::path::Path;

use super::{Canvas, Network, Renderer};
use crate::error::{EventGraphError, Result};

const TEMPLATE: &str = include_str!("../../templates/network.html");

pub struct HtmlRenderer;

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_css_length(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '%')
}

impl HtmlRenderer {
    /// Fill the page template.
    pub fn to_html(&self, network: &Network, canvas: &Canvas) -> Result<String> {
        for dim in [&canvas.height, &canvas.width] {
            if !is_css_length(dim) {
                return Err(EventGraphError::Render(format!(
                    "invalid canvas dimension `{}`",
                    dim
                )));
            }
        }

        // `</` inside a label would close the script tag.
        let json = serde_json::to_string(network)?.replace("</", "<\\/");
        let title = if canvas.heading.is_empty() {
            "eventgraph"
        } else {
            canvas.heading.as_str()
        };

        let title = escape_html(title);
        let heading = escape_html(&canvas.heading);
        Ok(fill_template(TEMPLATE, |key| match key {
            "TITLE" => Some(title.as_str()),
            "HEADING" => Some(heading.as_str()),
            "WIDTH" => Some(canvas.width.as_str()),
            "HEIGHT" => Some(canvas.height.as_str()),
            "GRAPH_JSON" => Some(json.as_str()),
            _ => None,
        }))
    }
}

/// Single left-to-right pass over `{{KEY}}` placeholders. Substituted text is
/// never rescanned; unknown keys are left as they are.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}").and_then(|end| lookup(&after[..end]).map(|v| (end, v))) {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

impl Renderer for HtmlRenderer {
    fn render(&self, network: &Network, canvas: &Canvas, destination: &Path) -> Result<()> {
        let html = self.to_html(network, canvas)?;
        std::fs::write(destination, html)?;
        log::info!("Wrote interactive graph to {}", destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NetworkNode;
    use tempfile::TempDir;

    fn network_with_label(label: &str) -> Network {
        Network {
            nodes: vec![NetworkNode {
                id: "ev0".to_string(),
                label: label.to_string(),
                tag: "IPO".to_string(),
                group: "event".to_string(),
                score: 0.8,
                size: 10,
                color: "#92d3a4".to_string(),
                shape: "box".to_string(),
            }],
            edges: Vec::new(),
        }
    }

    #[test]
    fn test_html_embeds_graph_and_canvas() {
        let html = HtmlRenderer
            .to_html(&network_with_label("IPO"), &Canvas::default())
            .unwrap();
        assert!(html.contains("\"id\":\"ev0\""));
        assert!(html.contains("width: 800px"));
        assert!(html.contains("height: 600px"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_html_escapes_script_close() {
        let html = HtmlRenderer
            .to_html(&network_with_label("</script><b>"), &Canvas::default())
            .unwrap();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script>"));
    }

    #[test]
    fn test_html_escapes_heading() {
        let canvas = Canvas {
            heading: "Q3 <filings>".to_string(),
            ..Canvas::default()
        };
        let html = HtmlRenderer.to_html(&Network::default(), &canvas).unwrap();
        assert!(html.contains("<h1>Q3 &lt;filings&gt;</h1>"));
    }

    #[test]
    fn test_html_heading_placeholders_are_not_expanded() {
        let canvas = Canvas {
            heading: "{{GRAPH_JSON}} {{WIDTH}}".to_string(),
            ..Canvas::default()
        };
        let html = HtmlRenderer
            .to_html(&network_with_label("IPO"), &canvas)
            .unwrap();
        assert!(html.contains("<h1>{{GRAPH_JSON}} {{WIDTH}}</h1>"));
        assert!(html.contains("<title>{{GRAPH_JSON}} {{WIDTH}}</title>"));
        assert_eq!(html.matches("\"id\":\"ev0\"").count(), 1);
    }

    #[test]
    fn test_fill_template_leaves_unknown_keys() {
        let filled = fill_template("a {{X}} b {{Y}} {{", |key| (key == "X").then_some("x"));
        assert_eq!(filled, "a x b {{Y}} {{");
    }

    #[test]
    fn test_html_rejects_bad_dimension() {
        let canvas = Canvas {
            height: "600px; background: red".to_string(),
            ..Canvas::default()
        };
        let err = HtmlRenderer.to_html(&Network::default(), &canvas).unwrap_err();
        assert!(matches!(err, EventGraphError::Render(_)));
    }

    #[test]
    fn test_html_render_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nx.html");
        HtmlRenderer
            .render(&network_with_label("IPO"), &Canvas::default(), &path)
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
