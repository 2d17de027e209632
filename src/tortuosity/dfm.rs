use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

use super::measure::LineMeasure;
use crate::centerline::{path_bfs, CenterlineGraph, CenterlineId};
use crate::error::{Result, VesselError};
use crate::graph::{NodeId, SearchColor, VoxelGraph};
use crate::types::Position;

/// Tortuosity sample at one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DfmRecord {
    pub position: Position,
    /// Path length from the start along the traversal.
    pub path_length: f32,
    /// Straight-line distance from the start.
    pub straight_distance: f32,
    /// `path_length / straight_distance`; zero at the start.
    pub dfm: f32,
    pub dfe: u16,
}

#[inline]
fn ratio(path_length: f32, straight: f32) -> f32 {
    if straight > 0.0 {
        path_length / straight
    } else {
        0.0
    }
}

/// Nodes reached by one DFM traversal, start first, in visiting order.
///
/// Per node values live in the graph scratch state (`cum_dist`, `dfm`) until
/// the next traversal resets them; [`DfmTrace::records`] copies them out.
#[derive(Clone, Debug, PartialEq)]
pub struct DfmTrace {
    /// Index of the traversed graph in the slice given to
    /// [`DfmFromPoint::from_position`], zero for single-graph calls.
    pub graph: usize,
    pub start: NodeId,
    pub visited: Vec<NodeId>,
}

impl DfmTrace {
    pub fn records(&self, graph: &VoxelGraph, measure: &LineMeasure) -> Vec<DfmRecord> {
        let start = graph.position(self.start);
        self.visited
            .iter()
            .map(|&id| {
                let n = graph.node(id);
                DfmRecord {
                    position: n.position,
                    path_length: n.search.cum_dist,
                    straight_distance: measure.measure_straight(&start, &n.position),
                    dfm: n.search.dfm,
                    dfe: n.dfe,
                }
            })
            .collect()
    }

    pub fn max_dfm(&self, graph: &VoxelGraph) -> f32 {
        self.visited
            .iter()
            .map(|&id| graph.node(id).search.dfm)
            .fold(0.0, f32::max)
    }
}

/// Distance factor metric measured outward from one point.
#[derive(Clone, Debug)]
pub struct DfmFromPoint {
    measure: LineMeasure,
}

impl DfmFromPoint {
    pub fn new(measure: LineMeasure) -> Self {
        Self { measure }
    }

    pub fn measure(&self) -> &LineMeasure {
        &self.measure
    }

    /// Locate `position` among the centerline nodes of `centerlines` and run
    /// [`Self::from_node`] on the matching graph. Each centerline graph refers
    /// to `graphs[centerline_graph.id]`.
    ///
    /// `None` when no centerline node sits at `position`.
    pub fn from_position(
        &self,
        graphs: &mut [VoxelGraph],
        centerlines: &[CenterlineGraph],
        position: &Position,
    ) -> Option<DfmTrace> {
        for cg in centerlines {
            let Some(graph) = graphs.get_mut(cg.id) else {
                continue;
            };
            let found = cg
                .centerline_nodes()
                .into_iter()
                .find(|&n| graph.position(n) == *position);
            if let Some(start) = found {
                let mut trace = self.from_node(graph, start);
                trace.graph = cg.id;
                return Some(trace);
            }
        }
        debug!("DfmFromPoint: no centerline node at {position}");
        None
    }

    /// Breadth-first traversal of the whole voxel graph from `start`.
    ///
    /// Each newly reached node gets the predecessor's path length plus the
    /// step length, and its DFM against the straight distance from `start`.
    /// Edges between non-neighbouring voxels are logged and skipped.
    pub fn from_node(&self, graph: &mut VoxelGraph, start: NodeId) -> DfmTrace {
        graph.reset_search_state();
        let origin = graph.position(start);
        {
            let s = &mut graph.node_mut(start).search;
            s.visited = true;
            s.color = SearchColor::Frontier;
            s.cost = Some(0.0);
        }
        let mut visited = vec![start];
        let mut queue = VecDeque::from([start]);
        let mut adj = Vec::new();
        let mut skipped = 0usize;
        while let Some(u) = queue.pop_front() {
            graph.neighbours_into(u, &mut adj);
            let pu = graph.position(u);
            let cum_u = graph.node(u).search.cum_dist;
            for &v in &adj {
                if graph.node(v).search.visited {
                    continue;
                }
                let pv = graph.position(v);
                let Ok(step) = self.measure.measure_adjacent(&pu, &pv) else {
                    skipped += 1;
                    continue;
                };
                let cum = cum_u + step;
                let straight = self.measure.measure_straight(&origin, &pv);
                let s = &mut graph.node_mut(v).search;
                s.visited = true;
                s.color = SearchColor::Frontier;
                s.predecessor = Some(u);
                s.cost = Some(cum);
                s.cum_dist = cum;
                s.dfm = ratio(cum, straight);
                visited.push(v);
                queue.push_back(v);
            }
            graph.node_mut(u).search.color = SearchColor::Settled;
        }
        debug!(
            "DfmFromPoint: {} nodes reached from {}, {} invalid edges skipped",
            visited.len(),
            origin,
            skipped
        );
        DfmTrace {
            graph: 0,
            start,
            visited,
        }
    }

    /// DFM along one centerline, measured from its first node in list order.
    pub fn measure_centerline(
        &self,
        graph: &VoxelGraph,
        centerlines: &CenterlineGraph,
        line: CenterlineId,
    ) -> Result<Vec<DfmRecord>> {
        let Some(line) = centerlines.centerline(line) else {
            return Ok(Vec::new());
        };
        self.records_along(graph, line.nodes())
    }

    fn records_along(&self, graph: &VoxelGraph, nodes: &[NodeId]) -> Result<Vec<DfmRecord>> {
        let Some(&first) = nodes.first() else {
            return Ok(Vec::new());
        };
        let origin = graph.position(first);
        let mut out = Vec::with_capacity(nodes.len());
        let mut cum = 0.0f32;
        let mut prev = origin;
        for &id in nodes {
            let p = graph.position(id);
            cum += self.measure.measure_adjacent(&prev, &p)?;
            let straight = self.measure.measure_straight(&origin, &p);
            out.push(DfmRecord {
                position: p,
                path_length: cum,
                straight_distance: straight,
                dfm: ratio(cum, straight),
                dfe: graph.node(id).dfe,
            });
            prev = p;
        }
        Ok(out)
    }
}

/// DFM along the centerline path from `a` to `b`.
///
/// Empty when no centerline path joins them. Path length and DFM are also
/// written to the scratch state of the path nodes.
pub fn point_to_point_dfm(
    graph: &mut VoxelGraph,
    measure: &DfmFromPoint,
    a: NodeId,
    b: NodeId,
) -> Result<Vec<DfmRecord>> {
    let path = path_bfs(graph, a, b);
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let records = measure.records_along(graph, &path)?;
    for (&id, r) in path.iter().zip(&records) {
        let s = &mut graph.node_mut(id).search;
        s.cum_dist = r.path_length;
        s.dfm = r.dfm;
    }
    Ok(records)
}

/// Locate the centerline node at `position` in `graph`.
pub fn centerline_node_at(graph: &VoxelGraph, position: &Position) -> Result<NodeId> {
    graph
        .node_at(position)
        .filter(|&id| graph.node(id).is_centerline)
        .ok_or(VesselError::NodeNotFound(*position))
}
