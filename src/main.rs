use rocket_sim::{ConsoleRenderer, LogObserver, Scenario, SimulationEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scenario from {}", path);
            Scenario::from_path(&path)?
        }
        None => Scenario::default_mission(),
    };

    let mut builder = scenario.into_builder()?;
    builder
        .add_observer(Box::new(ConsoleRenderer::stdout()))
        .add_observer(Box::new(LogObserver));

    let summary = SimulationEngine::new(builder.build()).run()?;

    println!();
    match summary.outcome {
        Some(outcome) => println!("{}", outcome.message()),
        None => println!("Simulation stopped without a mission outcome."),
    }
    for resource in &summary.final_snapshot.resources {
        println!("{}: {} / {}", resource.name, resource.amount, resource.max_capacity);
    }
    Ok(())
}
