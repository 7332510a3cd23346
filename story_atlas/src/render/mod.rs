//! Graph emission - the finished document handed to a renderer or host shell.

use serde::Serialize;

use crate::graph::{Edge, EdgeColor, Node, PlaythroughGraph};

/// Graphviz color for edges on the example playthrough.
pub const HIGHLIGHT_COLOR: &str = "firebrick";

/// Graphviz color for all other edges.
pub const PLAIN_COLOR: &str = "gray30";

/// The finished node/edge set with highlight colors resolved, ready for a
/// renderer. Serializes to JSON via serde and renders to Graphviz DOT text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,

    /// Whether an example playthrough exists (and is highlighted).
    pub has_example_path: bool,
}

impl GraphDocument {
    /// Build the document from a finished exploration: selects the first
    /// completed playthrough and highlights its edges.
    pub fn from_graph(graph: &PlaythroughGraph) -> Self {
        let (nodes, edges) = graph.highlight_first_path();

        Self {
            nodes,
            edges,
            has_example_path: !graph.completed_paths().is_empty(),
        }
    }

    /// Render the document as a Graphviz DOT digraph.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph playthroughs {\n    rankdir=LR;\n");

        for node in &self.nodes {
            out.push_str(&format!("    \"{}\";\n", escape(node.rule().as_str())));
        }

        for edge in &self.edges {
            let color = match edge.color {
                EdgeColor::Highlighted => HIGHLIGHT_COLOR,
                EdgeColor::Plain => PLAIN_COLOR,
            };
            out.push_str(&format!(
                "    \"{}\" -> \"{}\" [color=\"{}\"];\n",
                escape(edge.source.as_str()),
                escape(edge.target.as_str()),
                color,
            ));
        }

        out.push_str("}\n");
        out
    }

    /// Render the document as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Escape a rule id for use inside a double-quoted DOT string.
fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}
