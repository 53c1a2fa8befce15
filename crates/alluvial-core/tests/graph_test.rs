use alluvial_core::{FlowRecord, build_graph};

fn energy_records() -> Vec<FlowRecord> {
    [
        ("Agricultural waste", "Bio-conversion", 124.729),
        ("Bio-conversion", "Liquid", 0.597),
        ("Bio-conversion", "Losses", 26.862),
        ("Bio-conversion", "Solid", 280.322),
        ("Bio-conversion", "Gas", 81.144),
        ("Biofuel imports", "Liquid", 35.0),
        ("Biomass imports", "Solid", 35.0),
        ("Coal imports", "Coal", 11.606),
        ("Coal reserves", "Coal", 63.965),
        ("Coal", "Solid", 75.571),
        ("District heating", "Industry", 10.639),
        ("District heating", "Heating and cooling - commercial", 22.505),
        ("District heating", "Heating and cooling - homes", 46.184),
    ]
    .iter()
    .map(|(from, to, flow)| FlowRecord::new(*from, *to, *flow))
    .collect()
}

#[test]
fn totals_are_conserved_over_edge_lists() {
    let graph = build_graph(&energy_records()).unwrap();
    for node in graph.iter() {
        // Summation order differs (edge lists are flow-sorted), so allow for
        // float reassociation.
        let out_sum: f64 = node.to.iter().map(|e| e.flow).sum();
        let in_sum: f64 = node.from.iter().map(|e| e.flow).sum();
        assert!(
            (node.flow_out - out_sum).abs() < 1e-9,
            "out mismatch for {}",
            node.key
        );
        assert!(
            (node.flow_in - in_sum).abs() < 1e-9,
            "in mismatch for {}",
            node.key
        );
    }
}

#[test]
fn graph_round_trips_through_json() {
    let graph = build_graph(&energy_records()).unwrap();
    let json = serde_json::to_string(&graph).unwrap();
    let back: alluvial_core::FlowGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(graph, back);
}

#[test]
fn every_edge_endpoint_resolves() {
    let graph = build_graph(&energy_records()).unwrap();
    for node in graph.iter() {
        for edge in node.from.iter().chain(node.to.iter()) {
            assert!(graph.contains_key(&edge.key), "dangling key {}", edge.key);
        }
    }
}

#[test]
fn rebuild_is_deterministic() {
    let records = energy_records();
    let first = build_graph(&records).unwrap();
    let second = build_graph(&records).unwrap();
    assert_eq!(first, second);
    let first_keys: Vec<&str> = first.keys().collect();
    let second_keys: Vec<&str> = second.keys().collect();
    assert_eq!(first_keys, second_keys);
}
