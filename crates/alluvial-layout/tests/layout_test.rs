use alluvial_core::{FlowGraph, FlowRecord, build_graph};
use alluvial_layout::{Error, Extents, LayoutOptions, layout};

fn records(list: &[(&str, &str, f64)]) -> Vec<FlowRecord> {
    list.iter()
        .map(|(from, to, flow)| FlowRecord::new(*from, *to, *flow))
        .collect()
}

fn lay_out(list: &[(&str, &str, f64)], opts: &LayoutOptions) -> (FlowGraph, Extents) {
    let records = records(list);
    let mut graph = build_graph(&records).unwrap();
    let extents = layout(&mut graph, &records, opts).unwrap();
    (graph, extents)
}

#[test]
fn single_edge_layout() {
    let (graph, extents) = lay_out(&[("A", "B", 10.0)], &LayoutOptions::default());
    let a = graph.get("A").unwrap();
    let b = graph.get("B").unwrap();
    assert_eq!((a.flow_out, a.flow_in, a.x), (10.0, 0.0, Some(0)));
    assert_eq!((b.flow_in, b.flow_out, b.x), (10.0, 0.0, Some(1)));
    assert_eq!(extents.max_x, 1);
    assert_eq!(extents.max_y, 10.0);
}

#[test]
fn fan_out_produces_non_overlapping_bands() {
    let (graph, extents) = lay_out(&[("A", "B", 5.0), ("A", "C", 10.0)], &LayoutOptions::default());
    let a = graph.get("A").unwrap();
    let sorted: Vec<&str> = a.to.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(sorted, ["C", "B"]);

    let b = graph.get("B").unwrap();
    let c = graph.get("C").unwrap();
    assert_eq!(b.x, Some(1));
    assert_eq!(c.x, Some(1));

    // Bands sized 5 and 10, stacked without overlap.
    let (b_y, c_y) = (b.y.unwrap(), c.y.unwrap());
    assert_ne!(b_y, c_y);
    let (top, top_h, bottom) = if b_y < c_y {
        (b_y, 5.0, c_y)
    } else {
        (c_y, 10.0, b_y)
    };
    assert!(top + top_h <= bottom);
    assert_eq!(extents.max_y, 15.0);
}

#[test]
fn cycle_aborts_with_no_geometry() {
    let records = records(&[("A", "B", 1.0), ("B", "C", 1.0), ("C", "A", 1.0)]);
    let mut graph = build_graph(&records).unwrap();
    let err = layout(&mut graph, &records, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::CyclicGraph { .. }));
    assert!(graph.iter().all(|n| n.x.is_none() && n.y.is_none()));
}

#[test]
fn pinned_column_pushes_unpinned_successor() {
    let mut opts = LayoutOptions::default();
    opts.column.insert("A".to_string(), 2);
    let (graph, extents) = lay_out(&[("A", "B", 1.0)], &opts);
    assert_eq!(graph.get("A").unwrap().x, Some(2));
    assert_eq!(graph.get("B").unwrap().x, Some(3));
    assert_eq!(extents.max_x, 3);
}

#[test]
fn contradictory_pin_is_rejected() {
    let mut opts = LayoutOptions::default();
    opts.column.insert("B".to_string(), 0);
    let records = records(&[("A", "B", 1.0)]);
    let mut graph = build_graph(&records).unwrap();
    let err = layout(&mut graph, &records, &opts).unwrap_err();
    assert!(matches!(err, Error::InvalidColumnOverride { .. }));
}

#[test]
fn zero_flow_endpoints_get_zero_height_bands() {
    let (graph, extents) = lay_out(&[("A", "B", 0.0), ("A", "C", 4.0)], &LayoutOptions::default());
    let b = graph.get("B").unwrap();
    assert_eq!(b.flow_in, 0.0);
    assert_eq!(b.flow_out, 0.0);
    assert!(b.y.is_some());
    assert_eq!(extents.max_y, 4.0);
}

#[test]
fn column_monotonicity_holds_for_every_edge() {
    let (graph, _) = lay_out(
        &[
            ("Oil", "Fossil", 15.0),
            ("Gas", "Fossil", 20.0),
            ("Fossil", "Electricity", 30.0),
            ("Fossil", "Losses", 5.0),
            ("Solar", "Electricity", 8.0),
            ("Electricity", "Homes", 25.0),
            ("Electricity", "Industry", 13.0),
        ],
        &LayoutOptions::default(),
    );
    for node in graph.iter() {
        let x = node.x.unwrap();
        for edge in &node.to {
            let nx = graph.get(&edge.key).unwrap().x.unwrap();
            assert!(x < nx, "edge {} -> {} points backward", node.key, edge.key);
        }
    }
}

#[test]
fn extents_bound_every_position() {
    let (graph, extents) = lay_out(
        &[
            ("A", "B", 3.0),
            ("A", "C", 2.0),
            ("B", "D", 3.0),
            ("C", "D", 2.0),
        ],
        &LayoutOptions {
            node_padding: 1.5,
            ..LayoutOptions::default()
        },
    );
    for node in graph.iter() {
        let x = node.x.unwrap();
        let y = node.y.unwrap();
        assert!(x <= extents.max_x);
        assert!(y >= 0.0);
        assert!(y <= extents.max_y);
    }
}

#[test]
fn layout_is_deterministic_and_idempotent() {
    let input = records(&[
        ("A", "B", 5.0),
        ("A", "C", 10.0),
        ("B", "D", 5.0),
        ("C", "D", 6.0),
        ("C", "E", 4.0),
    ]);
    let opts = LayoutOptions {
        node_padding: 2.0,
        ..LayoutOptions::default()
    };

    let mut first = build_graph(&input).unwrap();
    let first_extents = layout(&mut first, &input, &opts).unwrap();

    let mut second = build_graph(&input).unwrap();
    let second_extents = layout(&mut second, &input, &opts).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_extents, second_extents);

    // Re-running on the already laid-out graph changes nothing.
    let again = layout(&mut first, &input, &opts).unwrap();
    assert_eq!(first, second);
    assert_eq!(again, first_extents);
}

#[test]
fn priority_orders_columns_when_present() {
    let mut opts = LayoutOptions::default();
    opts.priority.insert("B".to_string(), 2.0);
    opts.priority.insert("C".to_string(), 1.0);
    let (graph, _) = lay_out(&[("A", "B", 5.0), ("A", "C", 10.0)], &opts);
    assert!(graph.get("C").unwrap().y.unwrap() < graph.get("B").unwrap().y.unwrap());
}

#[test]
fn record_with_unknown_key_is_rejected() {
    let input = records(&[("A", "B", 1.0)]);
    let mut graph = build_graph(&input).unwrap();
    let stray = records(&[("A", "B", 1.0), ("A", "Ghost", 1.0)]);
    let err = layout(&mut graph, &stray, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnresolvedNode { ref key } if key == "Ghost"));
}
