//! Stable-id graph arena shared by every stage that produces a graph-shaped
//! artifact (the dependency graph, the component graph, the layer graph).
//!
//! Wraps `petgraph::stable_graph::StableDiGraph` behind integer ids so that
//! node/edge payloads never hold pointers into each other — callers keep
//! `NodeId`/`EdgeId` values and look the payload up through the arena. This
//! arena-of-nodes-keyed-by-stable-ids shape is what lets node/edge payloads
//! stay plain data even when a dependency graph contains cycles.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// Stable identifier for a node. Stays valid across node/edge removal
/// (unlike a raw `petgraph::NodeIndex`, which petgraph may reuse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Stable identifier for an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

/// A directed multigraph arena keyed by `NodeId`/`EdgeId`. Generic over the
/// node and edge payload so the same arena backs the dependency graph, the
/// component-relationship graph, and the layer-relationship graph.
#[derive(Clone)]
pub struct Graph<N, E> {
    inner: StableDiGraph<N, E>,
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
        }
    }

    pub fn add_node(&mut self, payload: N) -> NodeId {
        let idx = self.inner.add_node(payload);
        NodeId(idx.index() as u64)
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId, payload: E) -> EdgeId {
        let idx = self.inner.add_edge(
            NodeIndex::new(source.0 as usize),
            NodeIndex::new(target.0 as usize),
            payload,
        );
        EdgeId(idx.index() as u64)
    }

    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.inner.node_weight(NodeIndex::new(id.0 as usize))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.inner.node_weight_mut(NodeIndex::new(id.0 as usize))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&E> {
        self.inner.edge_weight(EdgeIndex::new(id.0 as usize))
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.node_indices().map(|idx| NodeId(idx.index() as u64))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx).map(|n| (NodeId(idx.index() as u64), n)))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, NodeId, NodeId, &E)> {
        self.inner.edge_indices().filter_map(move |idx| {
            let (src, tgt) = self.inner.edge_endpoints(idx)?;
            let payload = self.inner.edge_weight(idx)?;
            Some((
                EdgeId(idx.index() as u64),
                NodeId(src.index() as u64),
                NodeId(tgt.index() as u64),
                payload,
            ))
        })
    }

    /// Outgoing edges from `source`, as `(EdgeId, target, payload)`.
    pub fn edges_from(&self, source: NodeId) -> impl Iterator<Item = (EdgeId, NodeId, &E)> {
        let idx = NodeIndex::new(source.0 as usize);
        self.inner.edges_directed(idx, Direction::Outgoing).map(|edge_ref| {
            (
                EdgeId(edge_ref.id().index() as u64),
                NodeId(edge_ref.target().index() as u64),
                edge_ref.weight(),
            )
        })
    }

    /// Incoming edges to `target`, as `(EdgeId, source, payload)`.
    pub fn edges_to(&self, target: NodeId) -> impl Iterator<Item = (EdgeId, NodeId, &E)> {
        let idx = NodeIndex::new(target.0 as usize);
        self.inner.edges_directed(idx, Direction::Incoming).map(|edge_ref| {
            (
                EdgeId(edge_ref.id().index() as u64),
                NodeId(edge_ref.source().index() as u64),
                edge_ref.weight(),
            )
        })
    }

    pub fn in_degree(&self, node: NodeId) -> usize {
        self.inner
            .edges_directed(NodeIndex::new(node.0 as usize), Direction::Incoming)
            .count()
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.inner
            .edges_directed(NodeIndex::new(node.0 as usize), Direction::Outgoing)
            .count()
    }
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: std::fmt::Debug, E> std::fmt::Debug for Graph<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

/// Depth-first cycle search over any `Graph<N, E>`. Returns the distinct
/// cycles found, each as a node-id sequence with `first == last`.
///
/// Cancellation is polled once per node visited.
pub fn find_cycles<N, E>(
    graph: &Graph<N, E>,
    cancel: &crate::progress::CancellationToken,
) -> Result<Vec<Vec<NodeId>>, crate::error::PipelineError> {
    let mut visited = std::collections::HashSet::new();
    let mut stack = Vec::new();
    let mut on_stack = std::collections::HashSet::new();
    let mut cycles = Vec::new();
    let mut seen_cycles = std::collections::HashSet::new();

    for start in graph.node_ids() {
        if visited.contains(&start) {
            continue;
        }
        dfs_visit(
            graph,
            start,
            &mut visited,
            &mut stack,
            &mut on_stack,
            &mut cycles,
            &mut seen_cycles,
            cancel,
        )?;
    }

    Ok(cycles)
}

#[allow(clippy::too_many_arguments)]
fn dfs_visit<N, E>(
    graph: &Graph<N, E>,
    node: NodeId,
    visited: &mut std::collections::HashSet<NodeId>,
    stack: &mut Vec<NodeId>,
    on_stack: &mut std::collections::HashSet<NodeId>,
    cycles: &mut Vec<Vec<NodeId>>,
    seen_cycles: &mut std::collections::HashSet<Vec<NodeId>>,
    cancel: &crate::progress::CancellationToken,
) -> Result<(), crate::error::PipelineError> {
    if cancel.is_cancelled() {
        return Err(crate::error::PipelineError::Cancelled { stage: "cycle-detection" });
    }
    visited.insert(node);
    stack.push(node);
    on_stack.insert(node);

    for (_, target, _) in graph.edges_from(node) {
        if on_stack.contains(&target) {
            let start = stack.iter().position(|&n| n == target).unwrap_or(0);
            let mut cycle: Vec<NodeId> = stack[start..].to_vec();
            cycle.push(target);
            let canonical = canonicalize_cycle(&cycle);
            if seen_cycles.insert(canonical) {
                cycles.push(cycle);
            }
        } else if !visited.contains(&target) {
            dfs_visit(graph, target, visited, stack, on_stack, cycles, seen_cycles, cancel)?;
        }
    }

    stack.pop();
    on_stack.remove(&node);
    Ok(())
}

/// Rotate a cycle so the smallest node id comes first, making two rotations
/// of the same cycle compare equal for dedup purposes.
fn canonicalize_cycle(cycle: &[NodeId]) -> Vec<NodeId> {
    let body = &cycle[..cycle.len() - 1];
    if body.is_empty() {
        return cycle.to_vec();
    }
    let min_pos = body
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let mut rotated: Vec<NodeId> = body[min_pos..].iter().chain(body[..min_pos].iter()).copied().collect();
    rotated.push(rotated[0]);
    rotated
}
