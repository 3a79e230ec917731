use super::event::Event;
use super::manager::MissionOutcome;
use super::resource::ResourceSnapshot;
use super::system::SystemSnapshot;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};

const ANSI_CLEAR: &str = "\x1b[2J";
const ANSI_MV_TL: &str = "\x1b[H";
const ANSI_LN_CLR: &str = "\x1b[K";

/// Best-effort view of every resource and system at one manager iteration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationSnapshot {
    pub iteration: u64,
    pub resources: Vec<ResourceSnapshot>,
    pub systems: Vec<SystemSnapshot>,
}

impl SimulationSnapshot {
    pub fn resource(&self, name: &str) -> Option<&ResourceSnapshot> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn system(&self, name: &str) -> Option<&SystemSnapshot> {
        self.systems.iter().find(|s| s.name == name)
    }
}

/// Sink for the manager's state, called from the manager thread
pub trait StateObserver: Send {
    fn observe(&mut self, snapshot: &SimulationSnapshot);

    fn on_event(&mut self, _event: &Event) {}

    fn on_mission_end(&mut self, _outcome: MissionOutcome) {}
}

/// Redraws the state in place on a terminal using cursor-control sequences
pub struct ConsoleRenderer<W: Write + Send> {
    out: W,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, snapshot: &SimulationSnapshot) -> io::Result<()> {
        write!(self.out, "{}{}", ANSI_CLEAR, ANSI_MV_TL)?;

        writeln!(self.out, "{}Current Resource Amounts:", ANSI_LN_CLR)?;
        writeln!(self.out, "{}-------------------------", ANSI_LN_CLR)?;
        for resource in &snapshot.resources {
            writeln!(
                self.out,
                "{}{}: {} / {}",
                ANSI_LN_CLR, resource.name, resource.amount, resource.max_capacity
            )?;
        }

        writeln!(self.out, "{}\n{}System Statuses:", ANSI_LN_CLR, ANSI_LN_CLR)?;
        writeln!(self.out, "{}----------------", ANSI_LN_CLR)?;
        for system in &snapshot.systems {
            writeln!(self.out, "{}{}: {}", ANSI_LN_CLR, system.name, system.status)?;
        }

        self.out.flush()
    }
}

impl<W: Write + Send> StateObserver for ConsoleRenderer<W> {
    fn observe(&mut self, snapshot: &SimulationSnapshot) {
        // A closed terminal should not stop the simulation
        let _ = self.render(snapshot);
    }

    fn on_event(&mut self, event: &Event) {
        let _ = writeln!(
            self.out,
            "Event: [{}] Resource [{} : {}] Status [{}]",
            event.source, event.resource, event.amount, event.status
        );
    }

    fn on_mission_end(&mut self, outcome: MissionOutcome) {
        let _ = writeln!(self.out, "{}", outcome.message());
        let _ = self.out.flush();
    }
}

/// Routes snapshots and events to the `log` facade
#[derive(Debug, Default)]
pub struct LogObserver;

impl StateObserver for LogObserver {
    fn observe(&mut self, snapshot: &SimulationSnapshot) {
        let resources: Vec<String> = snapshot
            .resources
            .iter()
            .map(|r| format!("{}={}/{}", r.name, r.amount, r.max_capacity))
            .collect();
        let systems: Vec<String> = snapshot
            .systems
            .iter()
            .map(|s| format!("{}={}", s.name, s.status))
            .collect();
        debug!(
            "[Snapshot {}] resources: {} | systems: {}",
            snapshot.iteration,
            resources.join(", "),
            systems.join(", ")
        );
    }

    fn on_event(&mut self, event: &Event) {
        debug!(
            "[Event {}] {} reported {} on {} ({})",
            event.id, event.source, event.status, event.resource, event.amount
        );
    }

    fn on_mission_end(&mut self, outcome: MissionOutcome) {
        info!("{}", outcome.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SystemStatus;

    fn snapshot() -> SimulationSnapshot {
        SimulationSnapshot {
            iteration: 3,
            resources: vec![ResourceSnapshot {
                name: "Fuel".to_string(),
                amount: 995,
                max_capacity: 1000,
            }],
            systems: vec![SystemSnapshot {
                name: "Propulsion".to_string(),
                status: SystemStatus::Fast,
                amount_stored: 25,
            }],
        }
    }

    #[test]
    fn test_console_renderer_draws_resources_and_systems() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.observe(&snapshot());
        let text = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(text.starts_with(ANSI_CLEAR));
        assert!(text.contains("Fuel: 995 / 1000"));
        assert!(text.contains("Propulsion: FAST"));
    }

    #[test]
    fn test_console_renderer_prints_mission_end() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.on_mission_end(MissionOutcome::DestinationReached);
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("Destination reached"));
    }

    #[test]
    fn test_snapshot_lookup_and_serialization() {
        let snap = snapshot();
        assert_eq!(snap.resource("Fuel").map(|r| r.amount), Some(995));
        assert!(snap.system("Crew").is_none());

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["systems"][0]["status"], "Fast");
        assert_eq!(json["resources"][0]["max_capacity"], 1000);
    }
}
