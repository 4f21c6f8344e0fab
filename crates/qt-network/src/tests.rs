//! Unit tests for qt-network.
//!
//! All tests use hand-crafted networks or in-memory CSV.

#[cfg(test)]
mod helpers {
    use qt_core::{GeoPoint, Material, NodeId, PipeId, SoilType};
    use crate::{Node, Pipe, WaterNetwork, WaterNetworkBuilder};

    /// Diamond network:
    ///
    /// ```text
    ///        100      100
    ///   N1 ────── N2 ────── N4
    ///    │                  │
    ///    └─── N3 ───────────┘
    ///    500       100
    /// ```
    ///
    /// N4 is critical (priority 5).  Pipe N2-N4 has low pressure (60).
    pub fn diamond() -> (WaterNetwork, [NodeId; 4], [PipeId; 4]) {
        let mut b = WaterNetworkBuilder::new();
        let n1 = b.add_node(Node::new("N1", GeoPoint::new(0.0, 0.0), 10.0, 3)).unwrap();
        let n2 = b.add_node(Node::new("N2", GeoPoint::new(0.0, 1.0), 20.0, 2)).unwrap();
        let n3 = b.add_node(Node::new("N3", GeoPoint::new(1.0, 0.0), 30.0, 1)).unwrap();
        let n4 = b.add_node(Node::new("N4", GeoPoint::new(1.0, 1.0), 40.0, 5)).unwrap();

        let p12 = b.add_pipe(Pipe::new("P12", n1, n2, 100.0, Material::Pvc, SoilType::Rock)).unwrap();
        let p24 = b
            .add_pipe(Pipe::new("P24", n2, n4, 100.0, Material::Pvc, SoilType::Rock).with_pressure_cap(60.0))
            .unwrap();
        let p13 = b.add_pipe(Pipe::new("P13", n1, n3, 500.0, Material::CastIron, SoilType::Sand)).unwrap();
        let p34 = b.add_pipe(Pipe::new("P34", n3, n4, 100.0, Material::DuctileIron, SoilType::Clay)).unwrap();

        (b.build().unwrap(), [n1, n2, n3, n4], [p12, p24, p13, p34])
    }
}

// ── Builder & snapshot structure ──────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use qt_core::{GeoPoint, Material, NodeId, SoilType};
    use crate::{NetworkError, Node, Pipe, WaterNetworkBuilder};

    #[test]
    fn empty_build_fails() {
        assert!(matches!(WaterNetworkBuilder::new().build(), Err(NetworkError::Empty)));
    }

    #[test]
    fn first_node_is_default_source() {
        let (net, [n1, ..], _) = super::helpers::diamond();
        assert_eq!(net.source(), n1);
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.pipe_count(), 4);
    }

    #[test]
    fn explicit_source() {
        let mut b = WaterNetworkBuilder::new();
        b.add_node(Node::new("A", GeoPoint::default(), 0.0, 1)).unwrap();
        let c = b.add_node(Node::new("C", GeoPoint::default(), 0.0, 1)).unwrap();
        b.set_source(c);
        assert_eq!(b.build().unwrap().source(), c);
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut b = WaterNetworkBuilder::new();
        b.add_node(Node::new("N1", GeoPoint::default(), 1.0, 1)).unwrap();
        let err = b.add_node(Node::new("N1", GeoPoint::default(), 1.0, 1)).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateNode(ref n) if n == "N1"));
    }

    #[test]
    fn priority_out_of_range_rejected() {
        let mut b = WaterNetworkBuilder::new();
        assert!(b.add_node(Node::new("N1", GeoPoint::default(), 1.0, 0)).is_err());
        assert!(b.add_node(Node::new("N1", GeoPoint::default(), 1.0, 6)).is_err());
    }

    #[test]
    fn invalid_pipes_rejected() {
        let mut b = WaterNetworkBuilder::new();
        let a = b.add_node(Node::new("A", GeoPoint::default(), 1.0, 1)).unwrap();
        let c = b.add_node(Node::new("C", GeoPoint::default(), 1.0, 1)).unwrap();
        assert!(b.add_pipe(Pipe::new("self", a, a, 10.0, Material::Pvc, SoilType::Rock)).is_err());
        assert!(b.add_pipe(Pipe::new("zero", a, c, 0.0, Material::Pvc, SoilType::Rock)).is_err());
        assert!(b.add_pipe(Pipe::new("dangling", a, NodeId(9), 10.0, Material::Pvc, SoilType::Rock)).is_err());
        assert_eq!(b.pipe_count(), 0);
    }

    #[test]
    fn critical_nodes_recomputed() {
        let (net, [_, _, _, n4], _) = super::helpers::diamond();
        assert_eq!(net.critical_nodes(), vec![n4]);
    }

    #[test]
    fn neighbors_report_other_end() {
        let (net, [n1, n2, n3, _], _) = super::helpers::diamond();
        let mut ends: Vec<_> = net.neighbors(n1).map(|(_, _, other)| other).collect();
        ends.sort();
        assert_eq!(ends, vec![n2, n3]);
    }
}

// ── Status derivation & derived snapshots ─────────────────────────────────────

#[cfg(test)]
mod status {
    use qt_core::PipeStatus;
    use crate::Assessment;

    fn assess(p: f64) -> Assessment {
        Assessment { stress: 1.0, failure_prob: p }
    }

    #[test]
    fn unassessed_pipes_are_healthy() {
        let (net, _, [p12, ..]) = super::helpers::diamond();
        assert_eq!(net.pipe_status(p12), Some(PipeStatus::Healthy));
        assert!(net.failed_pipes().is_empty());
    }

    #[test]
    fn status_follows_threshold() {
        let (mut net, _, [p12, p24, ..]) = super::helpers::diamond();
        net.set_assessment(p12, assess(0.7));
        net.set_assessment(p24, assess(0.6));
        net.set_failure_threshold(0.6);
        assert_eq!(net.pipe_status(p12), Some(PipeStatus::Failed));
        // Strictly greater than the threshold fails; equal does not.
        assert_eq!(net.pipe_status(p24), Some(PipeStatus::Healthy));
        assert_eq!(net.failed_pipes(), vec![p12]);
    }

    #[test]
    fn without_failed_keeps_ids_and_damaged_copy() {
        let (mut damaged, _, [p12, p24, p13, p34]) = super::helpers::diamond();
        damaged.set_assessment(p12, assess(0.9));
        damaged.set_failure_threshold(0.5);

        let operational = damaged.without_failed();
        assert!(operational.pipe(p12).is_none());
        assert_eq!(operational.pipe(p24).unwrap().name, "P24");
        assert!(operational.pipe(p13).is_some() && operational.pipe(p34).is_some());
        // The damaged snapshot still holds the failed pipe for display.
        assert_eq!(damaged.pipe_count(), 4);
        assert_eq!(operational.pipe_count(), 3);
    }

    #[test]
    fn synthetic_pipes_are_rerouted_and_never_rescored() {
        let (mut net, [n1, _, _, n4], _) = super::helpers::diamond();
        let r = net.add_synthetic_pipe(n1, n4, 250.0, 0.1, 100.0);
        net.set_failure_threshold(0.05);
        assert_eq!(net.pipe_status(r), Some(PipeStatus::Rerouted));
        assert!(!net.set_assessment(r, assess(1.0)));
        assert_eq!(net.pipe(r).unwrap().failure_prob(), Some(0.1));
        assert_eq!(net.pipe(r).unwrap().name, "R-N1-N4");
    }
}

// ── Reachability ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod reach {
    use crate::component_count;

    #[test]
    fn full_network_reachable() {
        let (net, _, _) = super::helpers::diamond();
        let r = net.reachable_from_source();
        assert_eq!(r.len(), 4);
        assert_eq!(r.start(), net.source());
        assert_eq!(component_count(&net), 1);
    }

    #[test]
    fn removal_splits_components() {
        let (mut net, [n1, n2, n3, n4], [p12, _, p13, _]) = super::helpers::diamond();
        net.remove_pipe(p12);
        net.remove_pipe(p13);
        let r = net.reachable_from_source();
        assert!(r.contains(n1));
        assert!(!r.contains(n2) && !r.contains(n3) && !r.contains(n4));
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![n1]);
        assert_eq!(component_count(&net), 2);
    }

    #[test]
    fn removing_twice_is_noop() {
        let (mut net, _, [p12, ..]) = super::helpers::diamond();
        assert!(net.remove_pipe(p12).is_some());
        assert!(net.remove_pipe(p12).is_none());
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod paths {
    use crate::{by_length, shortest_path, shortest_path_tree};

    #[test]
    fn trivial_same_node() {
        let (net, [n1, ..], _) = super::helpers::diamond();
        let p = shortest_path(&net, n1, n1, by_length).unwrap();
        assert!(p.is_trivial());
        assert_eq!(p.nodes, vec![n1]);
        assert_eq!(p.cost, 0.0);
    }

    #[test]
    fn shortest_by_length() {
        let (net, [n1, n2, _, n4], [p12, p24, ..]) = super::helpers::diamond();
        let p = shortest_path(&net, n1, n4, by_length).unwrap();
        assert_eq!(p.nodes, vec![n1, n2, n4]);
        assert_eq!(p.pipes, vec![p12, p24]);
        assert_eq!(p.cost, 200.0);
    }

    #[test]
    fn pruned_pipes_force_detour() {
        let (net, [n1, _, n3, n4], _) = super::helpers::diamond();
        let p = shortest_path(&net, n1, n4, |pipe, _| {
            (pipe.pressure_cap >= 80.0).then_some(pipe.length_m)
        })
        .unwrap();
        assert_eq!(p.nodes, vec![n1, n3, n4]);
        assert_eq!(p.cost, 600.0);
    }

    #[test]
    fn limit_leaves_far_nodes_unreached() {
        let (net, [n1, n2, n3, n4], _) = super::helpers::diamond();
        let tree = shortest_path_tree(&net, n1, Some(150.0), by_length);
        assert_eq!(tree.distance(n2), Some(100.0));
        assert_eq!(tree.distance(n3), None);
        assert_eq!(tree.distance(n4), None);
        assert_eq!(tree.reached().count(), 2);
    }

    #[test]
    fn disconnected_has_no_path() {
        let (mut net, [n1, _, _, n4], [p12, _, p13, _]) = super::helpers::diamond();
        net.remove_pipe(p12);
        net.remove_pipe(p13);
        assert!(shortest_path(&net, n1, n4, by_length).is_none());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use qt_core::{Material, QtError, SoilType};
    use crate::{LoadOptions, NetworkError, load_network_csv, load_network_readers};

    const NODES: &str = "\
node_id,lat,lon,priority,type,demand\n\
N1,23.26,77.41,5,critical,120\n\
N2,23.265,77.412,2,residential,60\n\
N3,23.27,77.40,4,critical,90\n";

    const PIPES: &str = "\
pipe_id,from,to,length,material,age,soil,pressure_cap\n\
P2,N1,N2,420,CI,35,clay,95\n\
P3,N2,N3,300,PVC,10,silt,120\n";

    #[test]
    fn loads_nodes_and_pipes() {
        let net = load_network_readers(Cursor::new(NODES), Cursor::new(PIPES), &LoadOptions::default())
            .unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.pipe_count(), 2);
        assert_eq!(net.node(net.source()).name, "N1");

        let n3 = net.node_id("N3").unwrap();
        assert_eq!(net.node(n3).kind, "critical");
        assert!(net.node(n3).is_critical());

        let (_, p2) = net.pipes().next().unwrap();
        assert_eq!(p2.material, Material::CastIron);
        assert_eq!(p2.soil, SoilType::Clay);
        assert_eq!(p2.age_years, 35.0);
        assert!(p2.is_physical);
        assert_eq!(p2.risk, None);
    }

    #[test]
    fn optional_columns() {
        let pipes = "\
pipe_id,from,to,length,material,age,soil,pressure_cap,is_physical,risk\n\
P2,N1,N2,420,DI,35,rock,95,1,0.4\n\
P3,N2,N3,300,PVC,10,sand,120,0,\n";
        let net = load_network_readers(Cursor::new(NODES), Cursor::new(pipes), &LoadOptions::default())
            .unwrap();
        let pipes: Vec<_> = net.pipes().map(|(_, p)| p.clone()).collect();
        assert_eq!(pipes[0].risk, Some(0.4));
        assert!(pipes[0].is_physical);
        assert!(!pipes[1].is_physical);
        assert_eq!(pipes[1].risk, None);
    }

    #[test]
    fn unknown_soil_fails_fast() {
        let pipes = "\
pipe_id,from,to,length,material,age,soil,pressure_cap\n\
P2,N1,N2,420,CI,35,gravel,95\n";
        let err = load_network_readers(Cursor::new(NODES), Cursor::new(pipes), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, NetworkError::Category(QtError::UnknownCategory { kind: "soil", .. })));
    }

    #[test]
    fn explicit_fallback_substitutes() {
        let pipes = "\
pipe_id,from,to,length,material,age,soil,pressure_cap\n\
P2,N1,N2,420,HDPE,35,gravel,95\n";
        let opts = LoadOptions {
            fallback_material: Some(Material::DuctileIron),
            fallback_soil:     Some(SoilType::Clay),
            ..LoadOptions::default()
        };
        let net = load_network_readers(Cursor::new(NODES), Cursor::new(pipes), &opts).unwrap();
        let (_, p) = net.pipes().next().unwrap();
        assert_eq!(p.material, Material::DuctileIron);
        assert_eq!(p.soil, SoilType::Clay);
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let pipes = "\
pipe_id,from,to,length,material,age,soil,pressure_cap\n\
P2,N1,N9,420,CI,35,clay,95\n";
        let err = load_network_readers(Cursor::new(NODES), Cursor::new(pipes), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode(ref n) if n == "N9"));
    }

    #[test]
    fn named_source() {
        let opts = LoadOptions { source: Some("N3".into()), ..LoadOptions::default() };
        let net = load_network_readers(Cursor::new(NODES), Cursor::new(PIPES), &opts).unwrap();
        assert_eq!(net.node(net.source()).name, "N3");
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let nodes = dir.path().join("nodes.csv");
        let pipes = dir.path().join("pipes.csv");
        std::fs::write(&nodes, NODES).unwrap();
        std::fs::write(&pipes, PIPES).unwrap();
        let net = load_network_csv(&nodes, &pipes, &LoadOptions::default()).unwrap();
        assert_eq!(net.pipe_count(), 2);
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generator {
    use crate::{GeneratorConfig, component_count, generate_network};

    #[test]
    fn generated_tree_shape() {
        let cfg = GeneratorConfig::default();
        let net = generate_network(&cfg, 7).unwrap();
        assert_eq!(net.node_count(), 25);
        assert_eq!(net.pipe_count(), 24);
        assert_eq!(component_count(&net), 1);
        assert_eq!(net.node(net.source()).name, "N1");
    }

    #[test]
    fn attribute_ranges() {
        let net = generate_network(&GeneratorConfig::default(), 11).unwrap();
        for (id, node) in net.nodes() {
            if id.index() < 3 {
                assert!(node.is_critical(), "{} should be critical", node.name);
            } else {
                assert!(node.priority <= 3);
            }
            assert!((40.0..=150.0).contains(&node.demand));
        }
        for (_, pipe) in net.pipes() {
            assert!((200.0..=800.0).contains(&pipe.length_m));
            assert!((5.0..=50.0).contains(&pipe.age_years));
            assert!((70.0..=130.0).contains(&pipe.pressure_cap));
        }
    }

    #[test]
    fn same_seed_same_network() {
        let cfg = GeneratorConfig { node_count: 12, ..GeneratorConfig::default() };
        let a = generate_network(&cfg, 3).unwrap();
        let b = generate_network(&cfg, 3).unwrap();
        let la: Vec<_> = a.pipes().map(|(_, p)| (p.from, p.to, p.length_m)).collect();
        let lb: Vec<_> = b.pipes().map(|(_, p)| (p.from, p.to, p.length_m)).collect();
        assert_eq!(la, lb);
    }
}
