use super::*;
use crate::distance::VoxelDistance;
use crate::graph::{NodeId, VoxelGraph};
use crate::types::{Position, Resolution};

fn line_graph(n: i32) -> VoxelGraph {
    let mut g = VoxelGraph::from_positions((0..n).map(|x| Position::new(x, 0, x % 3)));
    for i in 1..n as u32 {
        g.connect(NodeId(i - 1), NodeId(i));
    }
    g
}

#[test]
fn tree_end_is_flagged_and_good_ends_fall_back() {
    let mut g = line_graph(4);
    let mut cg = CenterlineGraph::new(7);
    cg.add_tree_end(&mut g, NodeId(3));
    cg.add_tree_end(&mut g, NodeId(3));
    assert!(g.node(NodeId(3)).is_centerline);
    assert_eq!(cg.tree_ends(), &[NodeId(3)]);
    assert_eq!(cg.good_ends(), &[NodeId(3)]);

    cg.set_good_ends(vec![NodeId(0)]);
    assert_eq!(cg.good_ends(), &[NodeId(0)]);
}

#[test]
fn add_centerline_links_members() {
    let mut g = line_graph(6);
    let mut cg = CenterlineGraph::new(3);
    let a = cg.add_centerline(&mut g, vec![NodeId(0), NodeId(1), NodeId(2)], None);
    let b = cg.add_centerline(&mut g, vec![NodeId(3), NodeId(4)], Some(NodeId(2)));
    assert_ne!(a, b);
    assert_eq!(g.node(NodeId(1)).centerline, Some(a));
    assert_eq!(g.node(NodeId(4)).centerline, Some(b));
    assert!(g.node(NodeId(2)).is_bifurcation);
    assert_eq!(cg.centerline(b).map(|c| c.graph_id), Some(3));
    assert_eq!(
        cg.centerline_nodes(),
        vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4)]
    );
    assert!(!g.node(NodeId(5)).is_centerline);
}

#[test]
fn remove_from_centerline_reports_missing_node() {
    let mut g = line_graph(3);
    let mut cg = CenterlineGraph::new(0);
    let id = cg.add_centerline(&mut g, vec![NodeId(0), NodeId(1)], None);
    assert!(cg.remove_from_centerline(&mut g, NodeId(1)));
    assert_eq!(g.node(NodeId(1)).centerline, None);
    assert_eq!(cg.centerline(id).map(|c| c.len()), Some(1));
    assert!(!cg.remove_from_centerline(&mut g, NodeId(1)));
    assert!(!cg.remove_from_centerline(&mut g, NodeId(2)));
}

#[test]
fn centerline_stats_and_comparators() {
    let mut g = line_graph(5);
    for (i, dfe) in [10u16, 20, 30, 40, 50].into_iter().enumerate() {
        g.node_mut(NodeId(i as u32)).dfe = dfe;
    }
    let mut cg = CenterlineGraph::new(0);
    let long = cg.add_centerline(&mut g, vec![NodeId(0), NodeId(1), NodeId(2)], None);
    let short = cg.add_centerline(&mut g, vec![NodeId(3), NodeId(4)], None);
    let sl = cg.centerline(long).unwrap().stats(&g);
    let ss = cg.centerline(short).unwrap().stats(&g);
    assert_eq!(sl.node_count, 3);
    assert!((sl.mean_dfe - 20.0).abs() < 1e-6);
    assert_eq!(sl.max_dfe, 30);
    assert_eq!((sl.min_z, sl.max_z), (0, 2));
    assert!((sl.mean_position[0] - 1.0).abs() < 1e-9);
    // Nodes 3 and 4 sit at z 0 and 1.
    assert_eq!(ss.max_z, 1);

    let mut v = vec![ss.clone(), sl.clone()];
    v.sort_by(CenterlineStats::cmp_longer);
    assert_eq!(v[0].node_count, 3);
    let mut v = vec![ss, sl];
    v.sort_by(CenterlineStats::cmp_deeper);
    assert_eq!(v[0].max_z, 2);
}

#[test]
fn belonging_assignment_uses_nearest_centerline_node() {
    let mut g = VoxelGraph::from_positions([
        Position::new(0, 0, 0),
        Position::new(10, 0, 0),
        Position::new(1, 0, 0),
        Position::new(2, 0, 0),
        Position::new(5, 0, 0),
        Position::new(9, 0, 0),
    ]);
    for (i, dfe) in [0u16, 0, 4, 6, 2, 8].into_iter().enumerate() {
        g.node_mut(NodeId(i as u32)).dfe = dfe;
    }
    let distance = VoxelDistance::new(Resolution::default()).unwrap();
    let centers = [NodeId(0), NodeId(1)];
    let data = assign_closest_belong_nodes(&mut g, &centers, &distance);

    let near = &data[&NodeId(0)];
    assert_eq!(
        near.belonging,
        vec![NodeId(0), NodeId(2), NodeId(3), NodeId(4)],
        "tie at x=5 goes to the first centerline node"
    );
    assert!((near.mean_dfe() - 3.0).abs() < 1e-6);
    assert_eq!(near.max_dfe(), 6);
    assert_eq!(near.max_dfc(), 500);
    assert!((near.mean_dfc() - 200.0).abs() < 1e-6);

    let far = &data[&NodeId(1)];
    assert_eq!(far.belonging, vec![NodeId(1), NodeId(5)]);
    assert!((far.mean_dfe() - 4.0).abs() < 1e-6);
    assert_eq!(far.max_dfc(), 100);
    assert!((far.mean_dfc() - 50.0).abs() < 1e-6);
    assert_eq!(g.node(NodeId(1)).dfc, 0);
    assert_eq!(g.node(NodeId(5)).closest_centerline, Some(NodeId(1)));
}

#[test]
fn anisotropic_spacing_changes_nearest_node() {
    let mut g = VoxelGraph::from_positions([
        Position::new(0, 0, 0),
        Position::new(3, 0, 3),
        Position::new(2, 0, 0),
    ]);
    let centers = [NodeId(0), NodeId(1)];
    let iso = VoxelDistance::new(Resolution::default()).unwrap();
    let data = assign_closest_belong_nodes(&mut g, &centers, &iso);
    assert!(data[&NodeId(0)].belonging.contains(&NodeId(2)));

    // Wide columns: the x offset now dominates.
    let wide = VoxelDistance::new(Resolution::new(5.0, 1.0, 1.0)).unwrap();
    let data = assign_closest_belong_nodes(&mut g, &centers, &wide);
    assert!(data[&NodeId(1)].belonging.contains(&NodeId(2)));
    assert_eq!(g.node(NodeId(2)).closest_centerline, Some(NodeId(1)));
}

#[test]
fn empty_bucket_reports_zero_means() {
    let data = CenterlineNodeData::default();
    assert!(data.is_empty());
    assert_eq!(data.mean_dfe(), 0.0);
    assert_eq!(data.mean_dfc(), 0.0);
}

#[test]
fn path_bfs_walks_centerline_only() {
    let mut g = line_graph(6);
    let mut cg = CenterlineGraph::new(0);
    cg.add_centerline(&mut g, (0..4).map(NodeId).collect(), None);
    assert_eq!(
        path_bfs(&mut g, NodeId(0), NodeId(3)),
        vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]
    );
    assert!(path_bfs(&mut g, NodeId(0), NodeId(5)).is_empty());
    assert!(path_bfs(&mut g, NodeId(5), NodeId(0)).is_empty());
    assert_eq!(path_bfs(&mut g, NodeId(2), NodeId(2)), vec![NodeId(2)]);
}

#[test]
fn assign_node_data_fills_graph_buckets() {
    let mut g = line_graph(4);
    let mut cg = CenterlineGraph::new(0);
    cg.add_centerline(&mut g, vec![NodeId(0), NodeId(3)], None);
    let distance = VoxelDistance::new(Resolution::default()).unwrap();
    cg.assign_node_data(&mut g, &distance);
    assert_eq!(cg.node_data.len(), 2);
    let total: usize = cg.node_data.values().map(|d| d.len()).sum();
    assert_eq!(total, 4);

    let line = cg.centerline(CenterlineId(0)).unwrap();
    assert_eq!(line.surround, vec![NodeId(1), NodeId(2)]);
    assert_eq!(g.node(NodeId(1)).dfc, 141);
    assert_eq!(g.node(NodeId(2)).dfc, 224);

    // Re-assignment replaces rather than appends.
    cg.assign_node_data(&mut g, &distance);
    assert_eq!(cg.centerline(CenterlineId(0)).unwrap().surround.len(), 2);
}
