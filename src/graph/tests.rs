use super::*;
use crate::types::{Dims, Resolution};
use crate::volume::VolumeU16;

fn line_graph(n: i32) -> VoxelGraph {
    let mut g = VoxelGraph::from_positions((0..n).map(|x| Position::new(x, 0, 0)));
    for i in 1..n as u32 {
        g.connect(NodeId(i - 1), NodeId(i));
    }
    g
}

fn unit_distance() -> VoxelDistance {
    VoxelDistance::new(Resolution::default()).unwrap()
}

#[test]
fn connect_is_symmetric_and_ignores_self_loops() {
    let mut g = line_graph(2);
    let (a, b) = (NodeId(0), NodeId(1));
    assert!(g.node(a).adjacent.contains(&b));
    assert!(g.node(b).adjacent.contains(&a));
    g.connect(a, a);
    assert!(!g.node(a).adjacent.contains(&a));
    assert_eq!(g.node(a).degree(), 1);
}

#[test]
fn add_node_reuses_existing_position() {
    let mut g = VoxelGraph::new();
    let a = g.add_node(Position::new(1, 2, 3));
    let b = g.add_node(Position::new(1, 2, 3));
    assert_eq!(a, b);
    assert_eq!(g.len(), 1);
    assert_eq!(g.node_at(&Position::new(1, 2, 3)), Some(a));
    assert_eq!(g.node_at(&Position::new(0, 0, 0)), None);
}

#[test]
fn reset_restores_scratch_fields() {
    let mut g = line_graph(3);
    {
        let s = &mut g.node_mut(NodeId(1)).search;
        s.cost = Some(4.0);
        s.predecessor = Some(NodeId(0));
        s.color = SearchColor::Settled;
        s.visited = true;
        s.cum_dist = 2.5;
        s.dfm = 1.2;
    }
    assert!(!g.node(NodeId(1)).search.is_reset());
    g.reset_search_state();
    for n in g.nodes() {
        assert!(n.search.is_reset(), "node {} not reset", n.position);
        assert_eq!(n.search.cost, None);
        assert_eq!(n.search.color, SearchColor::Unvisited);
    }
}

#[test]
fn reset_nodes_touches_only_listed_nodes() {
    let mut g = line_graph(3);
    for id in [NodeId(0), NodeId(2)] {
        g.node_mut(id).search.visited = true;
    }
    g.reset_nodes(&[NodeId(0)]);
    assert!(g.node(NodeId(0)).search.is_reset());
    assert!(g.node(NodeId(2)).search.visited);
}

#[test]
fn source_prefers_max_mdfe_with_neighbours() {
    let mut g = line_graph(5);
    let lonely = g.add_node(Position::new(9, 9, 9));
    g.node_mut(lonely).mdfe = 10.0;
    g.node_mut(NodeId(1)).mdfe = 3.0;
    g.node_mut(NodeId(3)).mdfe = 2.0;
    let src = g.find_best_source_node(&unit_distance());
    assert_eq!(src, Some(NodeId(1)));
    assert_eq!(g.source(), Some(NodeId(1)));
}

#[test]
fn source_tie_breaks_towards_centroid() {
    let mut g = line_graph(5);
    for id in [NodeId(0), NodeId(2), NodeId(4)] {
        g.node_mut(id).mdfe = 5.0;
    }
    assert_eq!(g.find_best_source_node(&unit_distance()), Some(NodeId(2)));
}

#[test]
fn source_falls_back_to_min_nonzero_weight() {
    let mut g = line_graph(4);
    g.node_mut(NodeId(0)).weight = 0.0;
    g.node_mut(NodeId(1)).weight = 7.0;
    g.node_mut(NodeId(2)).weight = 2.0;
    g.node_mut(NodeId(3)).weight = 9.0;
    assert_eq!(g.find_best_source_node(&unit_distance()), Some(NodeId(2)));
}

#[test]
fn source_is_none_without_candidates() {
    let mut g = line_graph(3);
    assert_eq!(g.find_best_source_node(&unit_distance()), None);
    assert_eq!(g.source(), None);
}

#[test]
fn connected_graphs_splits_components_and_drops_small_ones() {
    let dims = Dims::new(8, 4, 3);
    let mut vol = VolumeU16::new(dims);
    // Diagonal staircase: 26-connected only.
    for i in 0..3 {
        vol.set(i, i, i, 4);
    }
    vol.set(7, 3, 0, 1);
    vol.set(6, 3, 0, 1);

    let graphs = connected_graphs(&vol, &GraphBuildOptions::default());
    assert_eq!(graphs.len(), 2);
    assert_eq!(graphs[0].len(), 3);
    assert_eq!(graphs[1].len(), 2);
    let mid = graphs[0].node_at(&Position::new(1, 1, 1)).unwrap();
    assert_eq!(graphs[0].node(mid).degree(), 2);
    assert_eq!(graphs[0].node(mid).dfe, 4);
    assert_eq!(graphs[0].node(mid).mdfe, 4.0);

    let opts = GraphBuildOptions {
        min_graph_size: 2,
        ..Default::default()
    };
    let graphs = connected_graphs(&vol, &opts);
    assert_eq!(graphs.len(), 1);
    assert_eq!(graphs[0].len(), 3);
}

#[test]
fn connected_graphs_can_skip_border() {
    let dims = Dims::new(5, 5, 5);
    let mut vol = VolumeU16::new(dims);
    vol.set(0, 2, 2, 1);
    vol.set(1, 2, 2, 1);
    vol.set(2, 2, 2, 1);
    let opts = GraphBuildOptions {
        exclude_border: true,
        ..Default::default()
    };
    let graphs = connected_graphs(&vol, &opts);
    assert_eq!(graphs.len(), 1);
    assert_eq!(graphs[0].len(), 2);
    assert!(graphs[0].node_at(&Position::new(0, 2, 2)).is_none());
}

#[test]
fn parallel_helpers_cover_every_graph() {
    let mut graphs = vec![line_graph(3), line_graph(4)];
    graphs[0].node_mut(NodeId(1)).mdfe = 1.0;
    graphs[1].node_mut(NodeId(2)).mdfe = 1.0;
    graphs[1].node_mut(NodeId(0)).search.visited = true;
    let sources = find_best_source_nodes(&mut graphs, &unit_distance());
    assert_eq!(sources, vec![Some(NodeId(1)), Some(NodeId(2))]);
    reset_all(&mut graphs);
    assert!(graphs
        .iter()
        .all(|g| g.nodes().iter().all(|n| n.search.is_reset())));
}

#[test]
fn max_z_and_centerline_listing() {
    let mut g = VoxelGraph::from_positions([Position::new(0, 0, 2), Position::new(0, 0, 5)]);
    g.node_mut(NodeId(1)).is_centerline = true;
    assert_eq!(g.max_z(), 5);
    assert_eq!(g.centerline_nodes(), vec![NodeId(1)]);
}
