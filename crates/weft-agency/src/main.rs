//! The modeled booking-agency run.
//!
//! Builds the monitor over the fixed workflow net, spawns the six role
//! workers plus a report-writer thread parked on the monitor's
//! completion latch, and writes `log.txt` when the exit transition has
//! fired its 186 times. The α-profile and policy variant are constants
//! of the modeled instance, not flags.

use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use weft::net::topology::WORKER_SEGMENTS;
use weft::prelude::*;

/// α-profile of the modeled instance.
const PROFILE: AlphaProfile = AlphaProfile::Fast;

/// Where the final statistics land.
const LOG_PATH: &str = "log.txt";

const ROLE_NAMES: [&str; 6] = ["entry", "senior-desk", "regular-desk", "confirm", "cancel", "exit"];

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();

    match run() {
        Ok(elapsed_ms) => {
            info!(elapsed_ms, "simulation complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "simulation aborted");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<u64, Box<dyn std::error::Error>> {
    let monitor = Arc::new(Monitor::new(
        PetriNet::new(PROFILE),
        policy(),
        MonitorConfig::default(),
    ));

    let specs: Vec<WorkerSpec> = ROLE_NAMES
        .iter()
        .zip(WORKER_SEGMENTS)
        .map(|(name, segment)| WorkerSpec::new(*name, segment))
        .collect();

    let started = Instant::now();
    let workers = spawn_workers(&monitor, &specs)?;
    info!(workers = workers.len(), "agency open");

    // The writer parks on the completion latch instead of polling; it
    // snapshots the statistics only after termination is observed.
    let writer = {
        let monitor = Arc::clone(&monitor);
        let done = monitor.completion();
        thread::Builder::new().name("report-writer".into()).spawn(move || {
            if done.recv().is_err() {
                // Monitor dropped without terminating; nothing to write.
                return Ok(());
            }
            let report = monitor.report();
            let file = File::create(LOG_PATH)?;
            write_report(BufWriter::new(file), &report)
        })?
    };

    for handle in workers {
        let fired = handle
            .join()
            .expect("worker thread panicked")?;
        info!(fired, "worker joined");
    }
    writer.join().expect("report writer panicked")?;
    info!(path = LOG_PATH, "report written");

    Ok(started.elapsed().as_millis() as u64)
}

/// Policy variant of the modeled instance.
fn policy() -> Box<dyn FiringPolicy> {
    Box::new(Prioritized)
}
