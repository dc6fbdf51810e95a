//! The worker protocol: segment-cycling threads.
//!
//! A worker owns an ordered segment of transitions and requests them
//! from the monitor in a round-robin over the segment, blocking inside
//! [`Monitor::fire_transition`] as needed. The first `Ok(false)` —
//! termination observed — ends the worker, which reports its local
//! success count.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use weft_net::NetError;

use crate::monitor::Monitor;

/// Name and transition segment for one worker thread.
#[derive(Clone, Debug)]
pub struct WorkerSpec {
    /// Thread name, also used in log events.
    pub name: String,
    /// The transitions this worker requests, cycled in order.
    pub transitions: Vec<usize>,
}

impl WorkerSpec {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, transitions: &[usize]) -> Self {
        Self {
            name: name.into(),
            transitions: transitions.to_vec(),
        }
    }
}

/// Cycle `transitions` against the monitor until termination.
///
/// Returns the number of successful firings this worker performed, or
/// the fatal engine error that ended the run.
pub fn run_worker(monitor: &Monitor, transitions: &[usize]) -> Result<u64, NetError> {
    let mut fired = 0u64;
    loop {
        for &t in transitions {
            if monitor.fire_transition(t)? {
                fired += 1;
            } else {
                debug!(fired, "termination observed; worker exiting");
                return Ok(fired);
            }
        }
    }
}

/// Spawn one named OS thread per spec, each running [`run_worker`].
///
/// Join handles are returned in spec order; joining them all is the
/// caller's completion barrier.
pub fn spawn_workers(
    monitor: &Arc<Monitor>,
    specs: &[WorkerSpec],
) -> io::Result<Vec<JoinHandle<Result<u64, NetError>>>> {
    specs
        .iter()
        .map(|spec| {
            let monitor = Arc::clone(monitor);
            let transitions = spec.transitions.clone();
            thread::Builder::new()
                .name(spec.name.clone())
                .spawn(move || run_worker(&monitor, &transitions))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::MonitorConfig;
    use weft_net::{AlphaProfile, PetriNet};
    use weft_policy::Balanced;

    #[test]
    fn worker_counts_its_own_firings() {
        // Terminate after T1 fires twice; the worker owns the T0/T1
        // entry segment and so performs every firing itself.
        let monitor = Arc::new(Monitor::new(
            PetriNet::new(AlphaProfile::Fast),
            Box::new(Balanced),
            MonitorConfig {
                exit_transition: 1,
                required_exit_fires: 2,
            },
        ));
        let handles = spawn_workers(
            &monitor,
            &[WorkerSpec::new("entry", &[0, 1])],
        )
        .unwrap();
        let fired: u64 = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .sum();
        assert_eq!(fired, 4, "two T0 and two T1 firings");
        assert_eq!(monitor.report().fires[1], 2);
    }
}
