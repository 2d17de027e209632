use std::collections::VecDeque;

use crate::graph::{NodeId, SearchColor, VoxelGraph};

/// Breadth-first search from `s` over centerline-flagged nodes.
///
/// Resets all scratch state first. Nodes whose `search.visited` flag is set by
/// `prepare` are never entered, and `skip_edge(a, b)` can veto single edges.
/// Stops when `end` is dequeued. Returns whether `end` was reached; the
/// predecessor chain is left in the scratch state for the caller.
pub(crate) fn centerline_bfs<P, F>(
    graph: &mut VoxelGraph,
    s: NodeId,
    end: NodeId,
    prepare: P,
    skip_edge: F,
) -> bool
where
    P: FnOnce(&mut VoxelGraph),
    F: Fn(NodeId, NodeId) -> bool,
{
    graph.reset_search_state();
    if !graph.node(s).is_centerline {
        return false;
    }
    prepare(graph);
    let mut queue = VecDeque::new();
    let mut adj = Vec::new();
    {
        let start = &mut graph.node_mut(s).search;
        start.visited = true;
        start.cost = Some(0.0);
        start.color = SearchColor::Frontier;
    }
    queue.push_back(s);
    while let Some(u) = queue.pop_front() {
        if u == end {
            return true;
        }
        graph.neighbours_into(u, &mut adj);
        let cost_u = graph.node(u).search.cost.unwrap_or(0.0);
        for &v in &adj {
            let node = graph.node(v);
            if !node.is_centerline || node.search.visited || skip_edge(u, v) {
                continue;
            }
            let search = &mut graph.node_mut(v).search;
            search.visited = true;
            search.color = SearchColor::Frontier;
            search.cost = Some(cost_u + 1.0);
            search.predecessor = Some(u);
            queue.push_back(v);
        }
        graph.node_mut(u).search.color = SearchColor::Settled;
    }
    false
}

/// Walk predecessors from `end` back to `s`, returning the chain in `s → end`
/// order. Empty when the chain does not lead back to `s`.
pub(crate) fn backtrace(graph: &VoxelGraph, s: NodeId, end: NodeId) -> Vec<NodeId> {
    let mut chain = vec![end];
    let mut cur = end;
    while cur != s {
        match graph.node(cur).search.predecessor {
            Some(prev) if chain.len() <= graph.len() => {
                chain.push(prev);
                cur = prev;
            }
            _ => return Vec::new(),
        }
    }
    chain.reverse();
    chain
}

/// Shortest hop path between two centerline nodes, restricted to centerline
/// nodes, ordered from `s` to `end`.
///
/// Empty when `s` is not a centerline node or `end` is unreachable.
pub fn path_bfs(graph: &mut VoxelGraph, s: NodeId, end: NodeId) -> Vec<NodeId> {
    if !centerline_bfs(graph, s, end, |_| {}, |_, _| false) {
        return Vec::new();
    }
    backtrace(graph, s, end)
}
