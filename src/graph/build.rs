//! Build voxel graphs from a foreground volume.
//!
//! One node is created per foreground voxel with its intensity copied into
//! `dfe` and `mdfe` (the input is expected to be a distance-from-edge map or a
//! mask), so source selection favours the thickest part of each component.
//! Nodes are 26-connected and split into connected components by BFS; each
//! component becomes its own [`VoxelGraph`].
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{NodeId, VoxelGraph};
use crate::types::{Dims, Position, NEIGH_26};
use crate::volume::VolumeView;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphBuildOptions {
    /// Components with this many nodes or fewer are dropped.
    pub min_graph_size: usize,
    /// Skip voxels on the outermost layer of the volume.
    pub exclude_border: bool,
}

/// Split the foreground of `volume` into connected voxel graphs, largest first.
pub fn connected_graphs<V: VolumeView>(volume: &V, options: &GraphBuildOptions) -> Vec<VoxelGraph> {
    let dims = volume.dims();
    let mut component: Vec<Option<u32>> = vec![None; dims.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut members: Vec<usize> = Vec::new();
    let mut graphs = Vec::new();
    let mut dropped = 0usize;
    let mut next_component = 0u32;

    for start in 0..dims.len() {
        if component[start].is_some() || !accept(volume, &dims, start, options) {
            continue;
        }
        members.clear();
        queue.clear();
        component[start] = Some(next_component);
        queue.push_back(start);
        while let Some(idx) = queue.pop_front() {
            members.push(idx);
            let p = dims.position_of(idx);
            for (dx, dy, dz) in NEIGH_26 {
                let Some(nidx) = dims.index_of(&p.offset(dx, dy, dz)) else {
                    continue;
                };
                if component[nidx].is_none() && accept(volume, &dims, nidx, options) {
                    component[nidx] = Some(next_component);
                    queue.push_back(nidx);
                }
            }
        }
        next_component += 1;

        if members.len() <= options.min_graph_size {
            dropped += 1;
            continue;
        }
        graphs.push(graph_from_members(volume, &dims, &members));
    }

    graphs.sort_by(|a, b| b.len().cmp(&a.len()));
    debug!(
        "connected_graphs: {} components, kept {}, dropped {} (min_graph_size={})",
        next_component,
        graphs.len(),
        dropped,
        options.min_graph_size
    );
    graphs
}

fn accept<V: VolumeView>(volume: &V, dims: &Dims, idx: usize, options: &GraphBuildOptions) -> bool {
    let p = dims.position_of(idx);
    if options.exclude_border && dims.on_border(&p) {
        return false;
    }
    volume.get(p.x as usize, p.y as usize, p.z as usize) > 0.0
}

fn graph_from_members<V: VolumeView>(volume: &V, dims: &Dims, members: &[usize]) -> VoxelGraph {
    let positions: Vec<Position> = members.iter().map(|&i| dims.position_of(i)).collect();
    let mut graph = VoxelGraph::from_positions(positions.iter().copied());
    for (i, p) in positions.iter().enumerate() {
        let v = volume.get(p.x as usize, p.y as usize, p.z as usize);
        let node = graph.node_mut(NodeId(i as u32));
        node.dfe = v.round().clamp(0.0, u16::MAX as f32) as u16;
        node.mdfe = node.dfe as f32;
    }
    graph.connect_grid_neighbours();
    graph
}
