//! End-to-end runs of the modeled booking-agency workflow.
//!
//! The full six-role ensemble runs against both policies under the
//! fast α-profile until the exit transition (T11) has fired 186 times.
//! These are wall-clock tests: the fast profile's α bounds are a few
//! milliseconds and every entry passes through at least one timed
//! transition, so a run takes on the order of a second.

use std::sync::Arc;
use std::time::{Duration, Instant};

use weft_monitor::{spawn_workers, Monitor, MonitorConfig, SimReport, WorkerSpec};
use weft_net::topology::{TRANSITION_COUNT, WORKER_SEGMENTS};
use weft_net::{AlphaProfile, PetriNet};
use weft_policy::{Balanced, FiringPolicy, Prioritized};

const ROLE_NAMES: [&str; 6] = ["entry", "senior-desk", "regular-desk", "confirm", "cancel", "exit"];

fn ensemble_specs() -> Vec<WorkerSpec> {
    ROLE_NAMES
        .iter()
        .zip(WORKER_SEGMENTS)
        .map(|(name, segment)| WorkerSpec::new(*name, segment))
        .collect()
}

fn run_ensemble(policy: Box<dyn FiringPolicy>) -> (Arc<Monitor>, SimReport) {
    let monitor = Arc::new(Monitor::new(
        PetriNet::new(AlphaProfile::Fast),
        policy,
        MonitorConfig::default(),
    ));
    let handles = spawn_workers(&monitor, &ensemble_specs()).unwrap();
    let mut worker_total = 0u64;
    for handle in handles {
        worker_total += handle.join().unwrap().unwrap();
    }
    let report = monitor.report();
    // Every successful firing was performed by exactly one worker.
    assert_eq!(worker_total, report.fires.iter().sum::<u64>());
    (monitor, report)
}

#[test]
fn balanced_ensemble_reaches_termination() {
    let (monitor, report) = run_ensemble(Box::new(Balanced));

    assert_eq!(report.fires[11], 186);
    for t in 0..TRANSITION_COUNT {
        assert!(report.fires[t] >= 1, "T{t} never fired");
    }

    let total: u64 = report.invariant_counts.iter().sum();
    assert_eq!(total, 186);
    // Balanced selection splits the four behavioral cycles roughly
    // evenly around 186 / 4 = 46.
    for (j, &count) in report.invariant_counts.iter().enumerate() {
        assert!(count >= 20, "family {j} starved: {count} cycles");
    }

    // After termination every further request is refused without
    // touching the engine.
    assert!(!monitor.fire_transition(0).unwrap());
    assert!(!monitor.fire_transition(11).unwrap());
    assert_eq!(monitor.report(), report);
}

#[test]
fn prioritized_ensemble_skews_the_senior_confirmed_cycle() {
    let (_, report) = run_ensemble(Box::new(Prioritized));

    assert_eq!(report.fires[11], 186);
    let counts = &report.invariant_counts;
    assert_eq!(counts.iter().sum::<u64>(), 186);

    // Family 4 (senior desk + confirmed payment) is the one both ratio
    // tiers feed; it must dominate the un-preferred families 1 and 3.
    let max = *counts.iter().max().unwrap();
    assert_eq!(counts[3], max, "senior+confirmed should dominate: {counts:?}");
    assert!(counts[3] > 2 * counts[0], "family 1 not suppressed: {counts:?}");
    assert!(counts[3] > 2 * counts[2], "family 3 not suppressed: {counts:?}");
}

#[test]
fn racing_workers_serialize_on_one_firing() {
    // Threshold 1 on T0: whichever worker gets the mutex first fires,
    // the other observes termination. Run a few rounds to exercise
    // different interleavings.
    for _ in 0..16 {
        let monitor = Arc::new(Monitor::new(
            PetriNet::new(AlphaProfile::Fast),
            Box::new(Balanced),
            MonitorConfig {
                exit_transition: 0,
                required_exit_fires: 1,
            },
        ));
        let a = {
            let monitor = Arc::clone(&monitor);
            std::thread::spawn(move || monitor.fire_transition(0).unwrap())
        };
        let b = {
            let monitor = Arc::clone(&monitor);
            std::thread::spawn(move || monitor.fire_transition(0).unwrap())
        };
        let outcomes = [a.join().unwrap(), b.join().unwrap()];
        assert_eq!(
            outcomes.iter().filter(|&&fired| fired).count(),
            1,
            "exactly one of the racers may fire"
        );
        assert_eq!(monitor.report().fires[0], 1);
    }
}

#[test]
fn alpha_window_is_observed_on_the_wall_clock() {
    // Under the slow profile T1 carries α = 30 ms. It becomes enabled
    // when T0 fires, so the second call cannot return before the
    // window has elapsed.
    let monitor = Monitor::new(
        PetriNet::new(AlphaProfile::Slow),
        Box::new(Balanced),
        MonitorConfig::default(),
    );
    let start = Instant::now();
    assert!(monitor.fire_transition(0).unwrap());
    assert!(monitor.fire_transition(1).unwrap());
    assert!(
        start.elapsed() >= Duration::from_millis(30),
        "T1 fired inside its α window"
    );
}
