//! Generality graph over scalar kinds
//!
//! Encodes the fixed partial order "kind A can be safely widened into kind
//! B" as a directed acyclic graph, and answers the two queries unification
//! needs: the reachable set of a kind (every kind it can be promoted into)
//! and the lowest common shape of a group (the most specific common
//! promotion target).
//!
//! The topological ordering used to pick "most specific" is computed once
//! at construction and cached in the value; the graph is immutable
//! afterwards and safe to share across concurrent discovery calls.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::error::GraphError;
use crate::shape::{ScalarKind, TypeShape};

/// The standard promotion edges, as `(general, specific)` pairs
///
/// Each pair reads "the specific kind can be losslessly widened into the
/// general kind". Complex and time-of-day have no promotion targets.
pub const DEFAULT_EDGES: &[(ScalarKind, ScalarKind)] = &[
    (ScalarKind::String, ScalarKind::Int64),
    (ScalarKind::String, ScalarKind::Real),
    (ScalarKind::String, ScalarKind::Date),
    (ScalarKind::String, ScalarKind::DateTime),
    (ScalarKind::String, ScalarKind::Bool),
    (ScalarKind::String, ScalarKind::Null),
    (ScalarKind::DateTime, ScalarKind::Date),
    (ScalarKind::Int64, ScalarKind::Int32),
    (ScalarKind::Real, ScalarKind::Int64),
];

/// Directed acyclic graph of scalar-kind promotions
#[derive(Debug, Clone)]
pub struct GeneralityGraph {
    graph: DiGraph<ScalarKind, ()>,
    nodes: HashMap<ScalarKind, NodeIndex>,
    topo_order: Vec<ScalarKind>,
    topo_rank: HashMap<ScalarKind, usize>,
}

impl GeneralityGraph {
    /// Build a generality graph from `(general, specific)` promotion pairs
    ///
    /// Every scalar kind becomes a node, in declaration order, so the
    /// topological ordering breaks ties deterministically. A cyclic edge
    /// list is rejected here once; queries never re-validate.
    pub fn new(edges: &[(ScalarKind, ScalarKind)]) -> Result<Self, GraphError> {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for &kind in ScalarKind::ALL {
            nodes.insert(kind, graph.add_node(kind));
        }

        // Edges point from specific to general: following them widens.
        for &(general, specific) in edges {
            let from = nodes[&specific];
            let to = nodes[&general];
            if !graph.contains_edge(from, to) {
                graph.add_edge(from, to, ());
            }
        }

        let sorted = toposort(&graph, None).map_err(|cycle| GraphError::Cycle {
            kind: graph[cycle.node_id()],
        })?;
        let topo_order: Vec<ScalarKind> = sorted.iter().map(|&idx| graph[idx]).collect();
        let topo_rank = topo_order
            .iter()
            .enumerate()
            .map(|(rank, &kind)| (kind, rank))
            .collect();

        debug!(edges = edges.len(), "generality graph constructed");

        Ok(Self {
            graph,
            nodes,
            topo_order,
            topo_rank,
        })
    }

    /// The cached topological ordering, most specific kinds first
    pub fn topo_order(&self) -> &[ScalarKind] {
        &self.topo_order
    }

    /// The set of kinds `kind` can be safely widened into, itself included
    pub fn reachable_set(&self, kind: ScalarKind) -> BTreeSet<ScalarKind> {
        let mut reachable = BTreeSet::new();
        reachable.insert(kind);

        let Some(&start) = self.nodes.get(&kind) else {
            return reachable;
        };
        let mut visited = HashSet::new();
        visited.insert(start);
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for neighbor in self.graph.neighbors(node) {
                if visited.insert(neighbor) {
                    reachable.insert(self.graph[neighbor]);
                    stack.push(neighbor);
                }
            }
        }
        reachable
    }

    /// The most specific kind every member can be widened into
    ///
    /// Intersects the reachable sets of all members and picks the
    /// intersection member earliest in the cached topological order.
    /// `None` means the kinds share no promotion target; callers treat
    /// that as "no generalization applies", not as a fault.
    pub fn lowest_common_kind(&self, kinds: &[ScalarKind]) -> Option<ScalarKind> {
        let (first, rest) = kinds.split_first()?;
        let mut common = self.reachable_set(*first);
        for kind in rest {
            let reachable = self.reachable_set(*kind);
            common.retain(|k| reachable.contains(k));
            if common.is_empty() {
                return None;
            }
        }
        common
            .into_iter()
            .min_by_key(|k| self.topo_rank.get(k).copied().unwrap_or(usize::MAX))
    }

    /// Shape-level wrapper over [`lowest_common_kind`](Self::lowest_common_kind)
    ///
    /// Every member must be a bare scalar; any composite shape makes the
    /// whole query come back `None`.
    pub fn lowest_common_shape(&self, shapes: &[TypeShape]) -> Option<TypeShape> {
        let kinds = shapes
            .iter()
            .map(TypeShape::as_scalar)
            .collect::<Option<Vec<_>>>()?;
        self.lowest_common_kind(&kinds).map(TypeShape::Scalar)
    }
}

impl Default for GeneralityGraph {
    fn default() -> Self {
        Self::new(DEFAULT_EDGES).expect("default promotion edges are acyclic")
    }
}
