use std::f64::consts::PI;

use approx::assert_relative_eq;

use orbitsim::simulation::engine::Engine;
use orbitsim::simulation::presets::{MOON_DISTANCE, EARTH_MASS, MOON_MASS};
use orbitsim::{
    aim, launch_velocity, Body, EngineConfig, MassEntry, NVec2, Parameters, PresetConfig,
    Scenario, ScenarioConfig, SimError,
};

/// Parameters with unit scaling and a density chosen so that radius = cbrt(2 * mass)
pub fn test_params() -> Parameters {
    Parameters {
        G: 1.0,
        density: 3.0 / (8.0 * PI),
        mpp: 1.0,
        spf: 1.0,
        collision_factor: 1.0,
        ..Parameters::default()
    }
}

pub fn body_at(x: f64, y: f64, m: f64, p: &Parameters) -> Body {
    Body::new(NVec2::new(x, y), NVec2::zeros(), m, p).unwrap()
}

/// Two overlapping bodies that merge on the first step, plus one far away
pub fn merging_scenario() -> Scenario {
    let p = test_params();
    let mut sc = Scenario::new(p.clone()).unwrap();
    sc.spawn(body_at(0.0, 0.0, 100.0, &p));
    sc.spawn(body_at(3.0, 0.0, 10.0, &p));
    sc.spawn(Body::new(NVec2::new(500.0, 0.0), NVec2::new(0.0, 2.0), 1.0, &p).unwrap());
    sc
}

// ==================================================================================
// Launch tests
// ==================================================================================

#[test]
fn aim_clamps_to_line_length() {
    let p = Parameters::default();
    let anchor = NVec2::new(100.0, 100.0);

    let line = aim(anchor, NVec2::new(700.0, 100.0), &p);
    assert_relative_eq!(line.end.x, 400.0, epsilon = 1e-9);
    assert_relative_eq!(line.end.y, 100.0, epsilon = 1e-9);
    assert_eq!(line.strength, 1.0);

    let line = aim(anchor, NVec2::new(100.0, 250.0), &p);
    assert_eq!(line.end, NVec2::new(100.0, 250.0));
    assert_relative_eq!(line.strength, 0.5, epsilon = 1e-12);
}

#[test]
fn launch_goes_opposite_to_drag() {
    let p = Parameters::default();
    let anchor = NVec2::new(100.0, 100.0);

    let v = launch_velocity(anchor, NVec2::new(250.0, 100.0), &p);
    assert_relative_eq!(v.x, -1500.0, epsilon = 1e-9);
    assert_relative_eq!(v.y, 0.0, epsilon = 1e-9);

    // far drag saturates at the max speed
    let v = launch_velocity(anchor, NVec2::new(100.0, -900.0), &p);
    assert_relative_eq!(v.norm(), p.max_launch_speed, max_relative = 1e-12);
    assert!(v.y > 0.0);

    assert_eq!(launch_velocity(anchor, anchor, &p), NVec2::zeros());
}

#[test]
fn mass_entry_reads_digits_times_exponent() {
    let mut entry = MassEntry::new();
    assert_eq!(entry.commit(24), None);

    entry.push_digit(1);
    entry.push_digit(2);
    entry.push_digit(42); // ignored
    assert_eq!(entry.digits(), "12");
    assert_relative_eq!(entry.commit(24).unwrap(), 1.2e25, max_relative = 1e-12);
    assert!(entry.is_empty());

    entry.push_digit(0);
    entry.push_digit(0);
    assert_eq!(entry.commit(24), None);
}

// ==================================================================================
// Scenario operations
// ==================================================================================

#[test]
fn hold_aim_release_cycle() {
    let p = Parameters::default();
    let mut sc = Scenario::new(p.clone()).unwrap();

    let id = sc.spawn_held(NVec2::new(100.0, 100.0), 6.0e24, false).unwrap();
    assert_eq!(sc.held(), Some(id));
    assert!(!sc.system.get_body(id).unwrap().released);

    let line = sc.aim(NVec2::new(100.0, 400.0)).unwrap();
    assert_relative_eq!(line.strength, 1.0, epsilon = 1e-12);

    // held bodies stay put while the simulation runs
    sc.step_once();
    assert_eq!(sc.system.get_body(id).unwrap().position, NVec2::new(100.0, 100.0));

    assert_eq!(sc.release_held(NVec2::new(250.0, 100.0)), Some(id));
    assert_eq!(sc.held(), None);
    assert!(sc.aim(NVec2::zeros()).is_none());

    let b = sc.system.get_body(id).unwrap();
    assert!(b.released);
    assert_relative_eq!(b.velocity().x, -1500.0, epsilon = 1e-6);
    assert_relative_eq!(b.momentum.x, -1500.0 * 6.0e24, max_relative = 1e-12);
}

#[test]
fn spawning_a_new_held_body_releases_the_previous_one() {
    let mut sc = Scenario::new(Parameters::default()).unwrap();
    let first = sc.spawn_held(NVec2::new(100.0, 100.0), 6.0e24, false).unwrap();
    let second = sc.spawn_held(NVec2::new(600.0, 600.0), 6.0e25, true).unwrap();

    assert_eq!(sc.held(), Some(second));
    assert!(sc.system.get_body(first).unwrap().released);
    assert!(sc.system.get_body(second).unwrap().fixed);
}

#[test]
fn typed_mass_applies_to_held_body() {
    let mut sc = Scenario::new(Parameters::default()).unwrap();

    // nothing held, digits are dropped
    sc.type_digit(5);
    assert_eq!(sc.typed_digits(), "");

    let id = sc.spawn_held(NVec2::new(100.0, 100.0), 6.0e24, false).unwrap();
    sc.type_digit(3);
    sc.type_digit(0);
    let mass = sc.commit_typed_mass().unwrap().unwrap();

    assert_relative_eq!(mass, 3.0e25, max_relative = 1e-12);
    let b = sc.system.get_body(id).unwrap();
    assert_eq!(b.mass(), mass);
    assert_relative_eq!(b.radius(), sc.parameters.radius_from_mass(mass));

    assert_eq!(sc.commit_typed_mass().unwrap(), None);
}

#[test]
fn pause_and_single_step() {
    let mut sc = merging_scenario();

    sc.pause();
    assert!(sc.is_paused());
    assert!(!sc.tick());
    assert_eq!(sc.system.frame, 0);
    assert_eq!(sc.run(10).frames, 0);

    sc.step_once();
    assert_eq!(sc.system.frame, 1);

    sc.toggle_pause();
    assert!(sc.tick());
    assert_eq!(sc.system.frame, 2);
}

#[test]
fn run_reports_absorptions() {
    let mut sc = merging_scenario();
    let summary = sc.run(3);

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.absorptions.len(), 1);
    assert_eq!(summary.bodies_left, 2);
    assert_eq!(summary.total_mass, 111.0);
}

#[test]
fn reset_does_not_resurrect_absorbed_bodies() {
    let mut sc = merging_scenario();
    let survivor = sc.system.bodies()[0].id();
    sc.run(5);
    assert_eq!(sc.system.len(), 2);

    sc.reset();

    assert_eq!(sc.system.len(), 2);
    assert_eq!(sc.system.frame, 0);
    let s = sc.system.get_body(survivor).unwrap();
    assert_eq!(s.mass(), 100.0);
    assert_eq!(s.position, NVec2::zeros());
    assert_eq!(s.momentum, NVec2::zeros());
    assert!(s.trail().is_empty());
}

#[test]
fn reset_drops_launched_bodies() {
    let yaml = "engine:\n  preset:\n    kind: circular_orbit\n";
    let mut sc = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    let preset_ids: Vec<_> = sc.system.bodies().iter().map(|b| b.id()).collect();
    assert_eq!(preset_ids.len(), 2);

    sc.spawn_held(NVec2::new(100.0, 100.0), 1.0e22, false).unwrap();
    sc.release_held(NVec2::new(50.0, 100.0)).unwrap();
    let still_held = sc.spawn_held(NVec2::new(700.0, 700.0), 1.0e22, false).unwrap();
    sc.run(3);
    assert_eq!(sc.system.len(), 4);

    sc.reset();

    let ids: Vec<_> = sc.system.bodies().iter().map(|b| b.id()).collect();
    assert_eq!(ids, preset_ids);
    assert_eq!(sc.held(), None);
    assert!(sc.system.get_body(still_held).is_none());
    for b in sc.system.bodies() {
        assert_eq!(b.position, b.initial_position());
    }
}

#[test]
fn reset_keeps_spawned_starting_bodies() {
    let mut sc = merging_scenario();
    sc.spawn_held(NVec2::new(50.0, 50.0), 1.0, false).unwrap();
    assert_eq!(sc.system.len(), 4);

    sc.reset();

    assert_eq!(sc.system.len(), 3);
    assert_eq!(sc.held(), None);
}

#[test]
fn reset_is_idempotent() {
    let mut sc = merging_scenario();
    sc.run(4);

    sc.reset();
    let once: Vec<_> = sc
        .system
        .bodies()
        .iter()
        .map(|b| (b.id(), b.position, b.momentum, b.mass(), b.radius()))
        .collect();
    sc.reset();
    let twice: Vec<_> = sc
        .system
        .bodies()
        .iter()
        .map(|b| (b.id(), b.position, b.momentum, b.mass(), b.radius()))
        .collect();

    assert_eq!(once, twice);
    for b in sc.system.bodies() {
        assert_eq!(b.position, b.initial_position());
        assert_eq!(b.momentum, b.initial_momentum());
        assert_eq!(b.mass(), b.initial_mass());
    }
}

#[test]
fn clear_removes_everything() {
    let mut sc = merging_scenario();
    sc.spawn_held(NVec2::new(50.0, 50.0), 1.0, false).unwrap();
    sc.run(2);

    sc.clear();

    assert!(sc.system.is_empty());
    assert_eq!(sc.held(), None);
    assert_eq!(sc.system.frame, 0);
    assert!(sc.center_of_mass().is_none());
}

#[test]
fn setters_on_missing_bodies_are_no_ops() {
    let mut sc = merging_scenario();
    let absorbed = sc.system.bodies()[1].id();
    sc.step_once();
    assert!(sc.system.get_body(absorbed).is_none());

    assert_eq!(sc.set_mass(absorbed, 5.0), Ok(false));
    assert!(!sc.set_momentum(absorbed, NVec2::new(1.0, 1.0)));
    assert!(!sc.set_velocity(absorbed, NVec2::new(1.0, 1.0)));
    assert!(!sc.set_fixed(absorbed, true));
    assert!(!sc.set_released(absorbed, false));
}

#[test]
fn setters_on_live_bodies() {
    let mut sc = merging_scenario();
    let id = sc.system.bodies()[2].id();

    assert_eq!(sc.set_mass(id, 0.0), Err(SimError::InvalidMass(0.0)));
    assert_eq!(sc.system.get_body(id).unwrap().mass(), 1.0);

    assert_eq!(sc.set_mass(id, 4.0), Ok(true));
    assert!(sc.set_velocity(id, NVec2::new(0.5, 0.0)));
    assert_eq!(sc.system.get_body(id).unwrap().momentum, NVec2::new(2.0, 0.0));

    assert!(sc.set_fixed(id, true));
    sc.step_once();
    let b = sc.system.get_body(id).unwrap();
    assert_eq!(b.position, NVec2::new(500.0, 0.0));
    assert_eq!(b.momentum, NVec2::zeros());
}

#[test]
fn new_rejects_invalid_parameters() {
    let mut p = Parameters::default();
    p.spf = -1.0;
    assert!(matches!(
        Scenario::new(p),
        Err(SimError::InvalidParameter { name: "spf", .. })
    ));
}

// ==================================================================================
// Presets and configuration
// ==================================================================================

const RANDOM_YAML: &str = r#"
engine:
  frames: 10
  preset:
    kind: random
    count: 30
  seed: 7
  width: 800.0
  height: 600.0
parameters:
  trail_length: null
"#;

#[test]
fn yaml_defaults_fill_missing_fields() {
    let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
    assert_eq!(cfg.engine.preset, PresetConfig::None);
    assert_eq!(cfg.engine.frames, 600);
    assert!(cfg.bodies.is_empty());
    assert_eq!(cfg.parameters.G, Parameters::default().G);

    let cfg = ScenarioConfig::from_yaml_str(RANDOM_YAML).unwrap();
    assert_eq!(cfg.engine.preset, PresetConfig::Random { count: 30 });
    assert_eq!(cfg.parameters.trail_length, None);
    assert_eq!(cfg.parameters.spf, Parameters::default().spf);
}

#[test]
fn yaml_bodies_and_flags() {
    let yaml = r#"
bodies:
  - x: [ 10.0, 20.0 ]
    v: [ 100.0, 0.0 ]
    m: 2.0e24
  - x: [ 400.0, 400.0 ]
    m: 6.0e24
    fixed: true
    released: false
"#;
    let sc = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();

    assert_eq!(sc.system.len(), 2);
    let a = &sc.system.bodies()[0];
    assert!(a.released && !a.fixed);
    assert_relative_eq!(a.momentum.x, 2.0e26, max_relative = 1e-12);
    let b = &sc.system.bodies()[1];
    assert!(b.fixed && !b.released);
    assert_eq!(b.momentum, NVec2::zeros());
}

#[test]
fn yaml_rejects_bad_values() {
    let cfg = ScenarioConfig::from_yaml_str("parameters:\n  density: 0.0\n").unwrap();
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(SimError::InvalidParameter { name: "density", .. })
    ));

    let cfg = ScenarioConfig::from_yaml_str("bodies:\n  - x: [0.0, 0.0]\n    m: -1.0\n").unwrap();
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(SimError::InvalidMass(_))
    ));

    assert!(ScenarioConfig::from_yaml_str("engine:\n  preset:\n    kind: spiral\n").is_err());
}

#[test]
fn yaml_rejects_bad_bounds() {
    let yaml = "engine:\n  preset:\n    kind: random\n    count: 3\n  width: -10.0\n";
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(
        Scenario::build_scenario(cfg).err(),
        Some(SimError::InvalidParameter { name: "width", value: -10.0 })
    );

    let yaml = "engine:\n  preset:\n    kind: random\n    count: 3\n  height: .nan\n";
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(SimError::InvalidParameter { name: "height", .. })
    ));

    let yaml = "engine:\n  preset:\n    kind: random\n    count: 3\n  width: 0.0\n  height: 0.0\n";
    let sc = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    assert!(sc.system.bodies().iter().all(|b| b.position == NVec2::zeros()));
}

#[test]
fn engine_defaults_follow_config() {
    let engine = Engine::default();
    let cfg = EngineConfig::default();
    assert_eq!(engine.frames, cfg.frames);
    assert_eq!(engine.seed, cfg.seed);
    assert_eq!(engine.paused, cfg.paused);
    assert_eq!(engine.preset, cfg.preset);
}

#[test]
fn random_preset_is_seeded_and_at_rest() {
    let build = || Scenario::build_scenario(ScenarioConfig::from_yaml_str(RANDOM_YAML).unwrap()).unwrap();
    let a = build();
    let b = build();

    assert_eq!(a.system.len(), 30);
    for (x, y) in a.system.bodies().iter().zip(b.system.bodies()) {
        assert_eq!(x.position, y.position);
        assert_eq!(x.mass(), y.mass());
    }
    for body in a.system.bodies() {
        assert!(body.released && !body.fixed);
        assert_eq!(body.momentum, NVec2::zeros());
        assert!((0.0..=800.0).contains(&body.position.x));
        assert!((0.0..=600.0).contains(&body.position.y));
        assert!((8.0e22..=4.0e23).contains(&body.mass()));
    }

    let mut cfg = ScenarioConfig::from_yaml_str(RANDOM_YAML).unwrap();
    cfg.engine.seed = 8;
    let c = Scenario::build_scenario(cfg).unwrap();
    assert_ne!(a.system.bodies()[0].position, c.system.bodies()[0].position);
}

#[test]
fn random_preset_keeps_total_mass_and_momentum() {
    let mut sc = Scenario::build_scenario(ScenarioConfig::from_yaml_str(RANDOM_YAML).unwrap()).unwrap();
    let mass = sc.system.total_mass();

    let summary = sc.run(50);

    assert_relative_eq!(summary.total_mass, mass, max_relative = 1e-12);
    let p = sc.system.total_momentum();
    let scale = 1.0e23 * 1.0e3; // a typical body's mass times a few hundred m/s
    assert!(p.norm() < scale * 1e-9, "momentum drifted to {p:?}");
}

#[test]
fn circular_orbit_preset() {
    let yaml = "engine:\n  preset:\n    kind: circular_orbit\n";
    let mut sc = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    let earth = sc.system.bodies()[0].id();
    let moon = sc.system.bodies()[1].id();

    let m = sc.system.get_body(moon).unwrap();
    let expected = (sc.parameters.G * (EARTH_MASS + MOON_MASS) / (MOON_DISTANCE * sc.parameters.mpp)).sqrt();
    assert_relative_eq!(m.velocity().norm(), expected, max_relative = 1e-12);
    assert!(m.velocity().y > 0.0);
    assert!(sc.system.get_body(earth).unwrap().fixed);

    for _ in 0..200 {
        assert!(sc.step_once().is_empty());
        let e = sc.system.get_body(earth).unwrap().position;
        assert_eq!(e, NVec2::new(400.0, 400.0));
        let r = (sc.system.get_body(moon).unwrap().position - e).norm();
        assert!((r - MOON_DISTANCE).abs() < 0.05 * MOON_DISTANCE, "moon drifted to {r}");
    }
}

#[test]
fn oscillation_preset_falls_toward_anchors() {
    let yaml = "engine:\n  preset:\n    kind: oscillation\nparameters:\n  spf: 600.0\n";
    let mut sc = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    assert_eq!(sc.system.len(), 3);

    let summary = sc.run(20);

    assert!(summary.absorptions.is_empty());
    let bodies = sc.system.bodies();
    assert_eq!(bodies[0].position, NVec2::new(200.0, 400.0));
    assert_eq!(bodies[1].position, NVec2::new(600.0, 400.0));
    assert!(bodies[2].position.y > 100.0);
    assert_relative_eq!(bodies[2].position.x, 400.0, epsilon = 1e-6);
}

#[test]
fn center_of_mass_through_scenario() {
    let p = test_params();
    let mut sc = Scenario::new(p.clone()).unwrap();
    sc.spawn(body_at(0.0, 0.0, 1.0, &p));
    sc.spawn(body_at(0.0, 8.0, 3.0, &p));

    let com = sc.center_of_mass().unwrap();
    assert_relative_eq!(com.position.y, 6.0, epsilon = 1e-12);
    assert_eq!(com.total_mass, 4.0);
}
