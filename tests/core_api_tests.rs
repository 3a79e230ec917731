use rocket_sim::{
    MissionOutcome, Priority, ResourceStatus, Scenario, SimulationBuilder, SimulationConfig,
    SimulationEngine, SystemStatus,
};

fn quick_config() -> SimulationConfig {
    SimulationConfig::new()
        .with_manager_wait_ms(1)
        .with_system_wait_ms(1)
}

#[test]
fn test_last_oxygen_unit_ends_mission_step_by_step() {
    let mut builder = SimulationBuilder::new(quick_config());
    let oxygen = builder.add_resource("Oxygen", 1, 50).unwrap();
    builder.add_resource("Energy", 30, 50).unwrap();
    let crew = builder.add_system("Crew", Some(("Oxygen", 1)), None, 0).unwrap();
    let life_support = builder
        .add_system("Life Support", Some(("Energy", 7)), Some(("Oxygen", 4)), 0)
        .unwrap();
    let mut manager = builder.build();

    // Consumes the last unit
    crew.run_once();
    assert_eq!(oxygen.amount(), 0);

    // Next attempt finds nothing
    crew.run_once();

    let queue = manager.event_queue().clone();
    let first = queue.pop().unwrap();
    assert_eq!(first.status, ResourceStatus::Empty);
    assert_eq!(first.priority, Priority::High);
    assert_eq!(first.resource, "Oxygen");
    queue.push(first);

    manager.process_events();

    assert!(!manager.is_running());
    assert_eq!(manager.outcome(), Some(MissionOutcome::OxygenDepleted));
    assert_eq!(crew.status(), SystemStatus::Terminate);
    assert_eq!(life_support.status(), SystemStatus::Terminate);
}

#[test]
fn test_oxygen_depletion_end_to_end() {
    let mut builder = SimulationBuilder::new(quick_config());
    builder.add_resource("Oxygen", 1, 50).unwrap();
    builder.add_system("Crew", Some(("Oxygen", 1)), None, 1).unwrap();

    let summary = SimulationEngine::new(builder.build()).run().unwrap();

    assert_eq!(summary.outcome, Some(MissionOutcome::OxygenDepleted));
    assert_eq!(summary.final_snapshot.resource("Oxygen").unwrap().amount, 0);
    assert_eq!(
        summary.final_snapshot.system("Crew").unwrap().status,
        SystemStatus::Terminate
    );
}

#[test]
fn test_exact_distance_fill_reaches_destination() {
    let mut builder = SimulationBuilder::new(quick_config());
    builder.add_resource("Distance", 4975, 5000).unwrap();
    builder
        .add_system("Propulsion", None, Some(("Distance", 25)), 1)
        .unwrap();

    let summary = SimulationEngine::new(builder.build()).run().unwrap();

    assert_eq!(summary.outcome, Some(MissionOutcome::DestinationReached));
    assert_eq!(summary.final_snapshot.resource("Distance").unwrap().amount, 5000);
}

#[test]
fn test_distance_overflow_reaches_destination() {
    let mut builder = SimulationBuilder::new(quick_config());
    let distance = builder.add_resource("Distance", 4980, 5000).unwrap();
    let propulsion = builder
        .add_system("Propulsion", None, Some(("Distance", 25)), 0)
        .unwrap();
    let mut manager = builder.build();

    propulsion.run_once();
    assert_eq!(distance.amount(), 5000);
    assert_eq!(propulsion.amount_stored(), 5);

    let event = manager.event_queue().pop().unwrap();
    assert_eq!(event.status, ResourceStatus::Capacity);
    assert_eq!(event.priority, Priority::Low);

    manager.apply_event(&event);
    assert_eq!(manager.outcome(), Some(MissionOutcome::DestinationReached));
    assert_eq!(propulsion.status(), SystemStatus::Terminate);
}

#[test]
fn test_full_resource_throttles_its_producer() {
    let mut builder = SimulationBuilder::new(quick_config().with_low_threshold(None));
    builder.add_resource("Fuel", 100, 100).unwrap();
    let energy = builder.add_resource("Energy", 50, 50).unwrap();
    let generator = builder
        .add_system("Generator", Some(("Fuel", 5)), Some(("Energy", 10)), 0)
        .unwrap();
    let mut manager = builder.build();

    generator.run_once();
    assert_eq!(generator.amount_stored(), 10);
    assert_eq!(energy.amount(), 50);

    manager.process_events();
    assert_eq!(generator.status(), SystemStatus::Slow);
    assert!(manager.is_running());

    // Room frees up; the buffered output lands without consuming more fuel
    assert_eq!(energy.try_consume(20), ResourceStatus::Ok);
    generator.run_once();
    assert_eq!(generator.amount_stored(), 0);
    assert_eq!(energy.amount(), 40);
    assert_eq!(manager.resource("Fuel").unwrap().amount(), 95);
}

#[test]
fn test_bundled_scenario_matches_default_mission() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/default_mission.json");
    let scenario = Scenario::from_path(path).unwrap();
    assert_eq!(scenario, Scenario::default_mission());
}

#[test]
fn test_default_mission_runs_to_an_outcome() {
    let scenario =
        Scenario::default_mission().with_config(quick_config().with_max_manager_iterations(2000));
    let manager = scenario.into_builder().unwrap().build();

    let summary = SimulationEngine::new(manager).run().unwrap();

    assert!(summary.outcome.is_some());
    assert!(summary
        .final_snapshot
        .systems
        .iter()
        .all(|s| s.status == SystemStatus::Terminate));
}
