//! The playthrough graph - nodes, edges, and the exploration accumulator.

use serde::Serialize;

use story_rules::RuleId;

use crate::view::StateView;

/// Synthetic rule id marking the start of exploration. It never names a
/// real rule. The spelling is load-bearing: rule sets and downstream tooling
/// match on this exact string.
pub const ROOT_RULE: &str = "Begining";

/// The root rule id as a value.
pub fn root_rule() -> RuleId {
    RuleId::new(ROOT_RULE)
}

/// A graph node. Node identity is rule-id equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Node(pub RuleId);

impl Node {
    pub fn new(rule: impl Into<RuleId>) -> Self {
        Self(rule.into())
    }

    pub fn rule(&self) -> &RuleId {
        &self.0
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render color of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeColor {
    #[default]
    Plain,
    Highlighted,
}

/// A directed rule-to-rule transition.
///
/// Two edges are the same transition when source and target match; the
/// color is a render attribute and takes no part in deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: RuleId,
    pub target: RuleId,
    pub color: EdgeColor,
}

impl Edge {
    /// Create a plain edge.
    pub fn new(source: impl Into<RuleId>, target: impl Into<RuleId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            color: EdgeColor::Plain,
        }
    }

    /// Whether this edge is the same transition as another.
    pub fn same_transition(&self, other: &Edge) -> bool {
        self.source == other.source && self.target == other.target
    }

    /// A copy of this edge with the given color.
    pub fn recolored(&self, color: EdgeColor) -> Edge {
        Edge {
            source: self.source.clone(),
            target: self.target.clone(),
            color,
        }
    }
}

/// The accumulator threaded through exploration, returned as the finished
/// graph once exploration terminates.
///
/// Invariants: the root node is present before exploration begins; no two
/// edges share a (source, target) pair; every completed path is a non-empty
/// contiguous chain whose last edge targets an ending-producing rule;
/// `visited` only grows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaythroughGraph {
    visited: Vec<StateView>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    completed_paths: Vec<Vec<Edge>>,
}

impl PlaythroughGraph {
    /// Create an accumulator seeded with the starting view and root node.
    pub fn new(start: StateView) -> Self {
        Self {
            visited: vec![start],
            nodes: vec![Node::new(root_rule())],
            edges: vec![],
            completed_paths: vec![],
        }
    }

    /// The views observed so far, in discovery order.
    pub fn visited(&self) -> &[StateView] {
        &self.visited
    }

    /// Whether a view has been observed before. Linear scan; adequate for
    /// the state spaces stories produce.
    pub fn has_visited(&self, view: &StateView) -> bool {
        self.visited.iter().any(|seen| seen == view)
    }

    /// Record a view as observed.
    pub fn mark_visited(&mut self, view: StateView) {
        self.visited.push(view);
    }

    /// The discovered nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The discovered edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Every completed playthrough, as edge chains from root to an ending.
    pub fn completed_paths(&self) -> &[Vec<Edge>] {
        &self.completed_paths
    }

    /// Whether a rule already has a node.
    pub fn has_node(&self, rule: &RuleId) -> bool {
        self.nodes.iter().any(|node| node.rule() == rule)
    }

    /// Add a node unless its rule is already present.
    pub fn insert_node(&mut self, rule: RuleId) {
        if !self.has_node(&rule) {
            self.nodes.push(Node(rule));
        }
    }

    /// Add an edge unless the same transition is already present.
    pub fn insert_edge(&mut self, edge: Edge) {
        if !self.edges.iter().any(|e| e.same_transition(&edge)) {
            self.edges.push(edge);
        }
    }

    /// Record one full playthrough from root to an ending.
    pub fn record_completed_path(&mut self, path: Vec<Edge>) {
        debug_assert!(!path.is_empty());
        self.completed_paths.push(path);
    }

    /// Pick the example playthrough (the first discovered) and recolor its
    /// edges, leaving all others plain. Returns the node set and the
    /// recolored edge set; the graph itself is unchanged.
    pub fn highlight_first_path(&self) -> (Vec<Node>, Vec<Edge>) {
        let selected = self.completed_paths.first();

        let edges = self
            .edges
            .iter()
            .map(|edge| {
                let on_path = selected
                    .map(|path| path.iter().any(|e| e.same_transition(edge)))
                    .unwrap_or(false);

                if on_path {
                    edge.recolored(EdgeColor::Highlighted)
                } else {
                    edge.recolored(EdgeColor::Plain)
                }
            })
            .collect();

        (self.nodes.clone(), edges)
    }
}
