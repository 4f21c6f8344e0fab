//! Integration tests for qt-sim.

use qt_core::{GeoPoint, Material, SoilType};
use qt_hazard::{ScoreInput, WeightedScorer};
use qt_network::{GeneratorConfig, Node, Pipe, WaterNetwork, WaterNetworkBuilder, generate_network};
use qt_response::PriorityRouter;

use crate::{SimBuilder, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Failure is keyed on pipe age: pipes older than 50 years always fail,
/// the rest score zero and sit on the probability floor.
fn age_scorer(input: &ScoreInput) -> f64 {
    if input.age_years > 50.0 { 1.0 } else { 0.0 }
}

type AgeSim = Simulation<fn(&ScoreInput) -> f64, PriorityRouter>;

/// Five-node line `N1 - N2 - N3 - N4 - N5`, 500 m pipes, N4 critical.
/// Pipes named in `doomed` are 99 years old; `shortcut` adds
/// `P15` (300 m, pressure 100) between N1 and N5.
fn line(doomed: &[&str], shortcut: bool) -> WaterNetwork {
    let mut b = WaterNetworkBuilder::new();
    let ids: Vec<_> = (1..=5)
        .map(|i| {
            let priority = if i == 4 { 5 } else { 2 };
            b.add_node(Node::new(format!("N{i}"), GeoPoint::default(), 20.0, priority)).unwrap()
        })
        .collect();
    let mut pipes: Vec<(String, usize, usize, f64)> = (0..4)
        .map(|w| (format!("P{}{}", w + 1, w + 2), w, w + 1, 500.0))
        .collect();
    if shortcut {
        pipes.push(("P15".to_owned(), 0, 4, 300.0));
    }
    for (name, a, z, length) in pipes {
        let age = if doomed.contains(&name.as_str()) { 99.0 } else { 10.0 };
        b.add_pipe(
            Pipe::new(name, ids[a], ids[z], length, Material::DuctileIron, SoilType::Clay)
                .with_age(age)
                .with_pressure_cap(100.0),
        )
        .unwrap();
    }
    b.build().unwrap()
}

fn age_sim(base: WaterNetwork) -> AgeSim {
    SimBuilder::new(base, age_scorer as fn(&ScoreInput) -> f64, PriorityRouter::default())
        .build()
        .unwrap()
}

fn generated() -> WaterNetwork {
    generate_network(&GeneratorConfig::default(), 42).unwrap()
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use qt_core::SimConfig;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(generated(), WeightedScorer::default(), PriorityRouter::default())
            .build()
            .unwrap();
        assert_eq!(sim.config(), &SimConfig::default());
        assert_eq!(sim.base().node_count(), 25);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimConfig { total_supply: -1.0, ..SimConfig::default() };
        let result = SimBuilder::new(generated(), WeightedScorer::default(), PriorityRouter::default())
            .config(config)
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Single runs ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use qt_core::PipeStatus;
    use qt_response::SupplyRoute;

    use super::*;
    use crate::{Scenario, SimError};

    #[test]
    fn no_elapsed_time_means_no_damage() {
        let sim = SimBuilder::new(generated(), WeightedScorer::default(), PriorityRouter::default())
            .build()
            .unwrap();
        let out = sim.run(Scenario::new(6.5, 0.0)).unwrap();
        assert_eq!(out.threshold, None);
        assert_eq!(out.metrics.failed_pipes, 0);
        assert_eq!(out.metrics.critical_service_ratio, 100.0);
        assert_eq!(out.metrics.overall_service_ratio, 100.0);
        assert!(out.reroutes.is_empty());
        assert!((out.allocation.total() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn stranded_without_feasible_donor() {
        let sim = age_sim(line(&["P23"], false));
        let out = sim.run(Scenario::new(6.5, 3.0)).unwrap();

        let base = sim.base();
        let n4 = base.node_id("N4").unwrap();
        let p23 = base.pipes().find(|(_, p)| p.name == "P23").map(|(id, _)| id).unwrap();

        assert_eq!(out.damaged.pipe_status(p23), Some(PipeStatus::Failed));
        assert!(out.operational.pipe(p23).is_none());
        assert_eq!(out.stranded, vec![n4]);
        assert_eq!(out.routes[&n4], SupplyRoute::Unreachable);
        assert_eq!(out.allocation.get(n4), None);
        assert_eq!(out.metrics.failed_pipes, 1);
        assert_eq!(out.metrics.critical_connectivity_loss, 100.0);
    }

    #[test]
    fn rerouted_via_shortcut_donor() {
        let sim = age_sim(line(&["P23", "P45"], true));
        let out = sim.run(Scenario::new(6.5, 3.0)).unwrap();

        let base = sim.base();
        let (n4, n5) = (base.node_id("N4").unwrap(), base.node_id("N5").unwrap());
        assert_eq!(out.metrics.failed_pipes, 2);
        assert_eq!(out.reroutes.len(), 1);
        assert_eq!(out.reroutes[0].donor, n5);
        assert_eq!(out.operational.pipe_status(out.reroutes[0].pipe), Some(PipeStatus::Rerouted));

        let names = out.routes[&n4].node_names(&out.operational).unwrap();
        assert_eq!(names, ["N1", "N5", "N4"]);
        assert_eq!(out.metrics.critical_service_ratio, 100.0);
        assert_eq!(out.metrics.overall_service_ratio, 100.0);
        assert!((out.allocation.total() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn shortcut_survives_without_reroute() {
        let sim = age_sim(line(&["P23"], true));
        let out = sim.run(Scenario::new(6.5, 3.0)).unwrap();
        assert!(out.reroutes.is_empty());
        assert_eq!(out.metrics.critical_service_ratio, 100.0);
    }

    #[test]
    fn base_network_untouched() {
        let sim = age_sim(line(&["P23", "P45"], true));
        sim.run(Scenario::new(7.0, 5.0)).unwrap();
        let base = sim.base();
        assert_eq!(base.pipe_count(), 5);
        assert_eq!(base.failure_threshold(), None);
        assert!(base.pipes().all(|(_, p)| p.assessment.is_none() && p.is_physical));
    }

    #[test]
    fn repeated_runs_identical() {
        let sim = SimBuilder::new(generated(), WeightedScorer::default(), PriorityRouter::default())
            .build()
            .unwrap();
        let a = sim.run(Scenario::new(7.0, 4.0)).unwrap();
        let b = sim.run(Scenario::new(7.0, 4.0)).unwrap();
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.reroutes, b.reroutes);
        assert_eq!(a.routes, b.routes);
        assert_eq!(a.allocation, b.allocation);
    }

    #[test]
    fn invalid_scenario_rejected() {
        let sim = age_sim(line(&[], false));
        assert!(matches!(sim.run(Scenario::new(f64::NAN, 1.0)), Err(SimError::Scenario(_))));
        assert!(matches!(sim.run(Scenario::new(-1.0, 1.0)), Err(SimError::Scenario(_))));
        assert!(matches!(sim.run(Scenario::new(6.5, f64::INFINITY)), Err(SimError::Scenario(_))));
    }
}

// ── Observer callbacks ────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use qt_hazard::DamageReport;
    use qt_response::RerouteOutcome;

    use super::*;
    use crate::{Scenario, SimObserver, SimOutcome};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SimObserver for Recorder {
        fn on_run_start(&mut self, s: &Scenario) {
            self.events.push(format!("start {}", s.elapsed_min));
        }
        fn on_damage(&mut self, _: &Scenario, r: &DamageReport) {
            self.events.push(format!("damage {}", r.failed));
        }
        fn on_reroute(&mut self, _: &Scenario, r: &RerouteOutcome) {
            self.events.push(format!("reroute {}", r.reroutes.len()));
        }
        fn on_run_end(&mut self, o: &SimOutcome) {
            self.events.push(format!("end {}", o.metrics.critical_service_ratio));
        }
    }

    #[test]
    fn hooks_fire_in_stage_order() {
        let sim = age_sim(line(&["P23", "P45"], true));
        let mut rec = Recorder::default();
        sim.run_with_observer(Scenario::new(6.5, 2.0), &mut rec).unwrap();
        assert_eq!(rec.events, ["start 2", "damage 2", "reroute 1", "end 100"]);
    }

    #[test]
    fn invalid_scenario_fires_nothing() {
        let sim = age_sim(line(&[], false));
        let mut rec = Recorder::default();
        assert!(sim.run_with_observer(Scenario::new(f64::NAN, 2.0), &mut rec).is_err());
        assert!(rec.events.is_empty());
    }

    #[test]
    fn timeline_reports_every_minute() {
        let sim = age_sim(line(&["P23"], false));
        let mut rec = Recorder::default();
        let outcomes = sim.run_timeline_with_observer(6.5, 3, &mut rec).unwrap();
        assert_eq!(outcomes.len(), 4);
        assert_eq!(rec.events.iter().filter(|e| e.starts_with("end")).count(), 4);
    }
}

// ── Timeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timeline_tests {
    use super::*;

    #[test]
    fn one_outcome_per_minute_in_order() {
        let sim = SimBuilder::new(generated(), WeightedScorer::default(), PriorityRouter::default())
            .build()
            .unwrap();
        let outcomes = sim.run_timeline(6.5, 10).unwrap();
        assert_eq!(outcomes.len(), 11);
        for (m, o) in outcomes.iter().enumerate() {
            assert_eq!(o.scenario.elapsed_min, m as f64);
            assert_eq!(o.scenario.magnitude, 6.5);
        }
        assert_eq!(outcomes[0].threshold, None);
        assert!(outcomes[1..].iter().all(|o| o.threshold.is_some_and(|t| t <= 0.65)));
    }

    #[test]
    fn timeline_matches_single_runs() {
        let sim = age_sim(line(&["P23", "P45"], true));
        let outcomes = sim.run_timeline(6.5, 2).unwrap();
        for o in &outcomes {
            let single = sim.run(o.scenario).unwrap();
            assert_eq!(o.metrics, single.metrics);
        }
        assert_eq!(outcomes[0].metrics.failed_pipes, 0);
        assert_eq!(outcomes[2].metrics.failed_pipes, 2);
    }
}
