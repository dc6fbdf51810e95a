//! The monitor protocol: mutex, condition queues, release, and drain.
//!
//! # Locking model
//!
//! One `Mutex<NetState>` guards the engine and the per-queue waiter
//! counts; one `Condvar` per transition forms the condition queues.
//! This is the condition-variable rendition of the source protocol's
//! semaphore scheme: wherever the mutex is given up, the holder first
//! decides — inside the critical section — which single blocked worker
//! to wake, then releases the lock (by `Condvar::wait` when it is about
//! to block itself, by dropping the guard otherwise). One releaser
//! action per release, so no two waiters are woken for one state
//! change.
//!
//! # Timed transitions
//!
//! A worker whose transition is marking-enabled but still inside its α
//! window marks the transition `waiting`, releases the lock through the
//! normal release protocol, sleeps out the remainder of the window
//! without any lock held, then re-acquires and fires. The `waiting`
//! flag keeps the policy from handing the transition to anyone else
//! while the sleeper is in flight.

use std::sync::{Condvar, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, info, trace};

use weft_core::{MatrixError, TransitionSet};
use weft_net::topology::TRANSITION_COUNT;
use weft_net::{NetError, PetriNet};
use weft_policy::FiringPolicy;

use crate::report::SimReport;

// ── Configuration ────────────────────────────────────────────────

/// Termination parameters.
#[derive(Clone, Copy, Debug)]
pub struct MonitorConfig {
    /// The transition whose firing count ends the simulation.
    pub exit_transition: usize,
    /// How many times it must fire.
    pub required_exit_fires: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            exit_transition: 11,
            required_exit_fires: 186,
        }
    }
}

// ── Monitor ──────────────────────────────────────────────────────

/// Everything the monitor mutex guards: the engine plus the queue
/// occupancy counts the release protocol reads.
struct NetState {
    net: PetriNet,
    queue_waiters: [usize; TRANSITION_COUNT],
    /// Completion latch already signaled.
    done: bool,
}

/// The monitor. See the [module docs](self) for the locking model.
pub struct Monitor {
    state: Mutex<NetState>,
    queues: Vec<Condvar>,
    policy: Box<dyn FiringPolicy>,
    config: MonitorConfig,
    done_tx: Sender<()>,
    done_rx: Receiver<()>,
}

// Workers share the monitor across threads by reference.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Monitor>();
};

impl Monitor {
    /// Wrap `net` behind the monitor with the given wake-up policy and
    /// termination parameters.
    pub fn new(net: PetriNet, policy: Box<dyn FiringPolicy>, config: MonitorConfig) -> Self {
        let (done_tx, done_rx) = bounded(1);
        Self {
            state: Mutex::new(NetState {
                net,
                queue_waiters: [0; TRANSITION_COUNT],
                done: false,
            }),
            queues: (0..TRANSITION_COUNT).map(|_| Condvar::new()).collect(),
            policy,
            config,
            done_tx,
            done_rx,
        }
    }

    /// Fire transition `t`, blocking until the firing succeeds or the
    /// simulation terminates.
    ///
    /// `Ok(true)` — fired. `Ok(false)` — the exit transition had already
    /// reached its target when this call observed the engine. `Err` —
    /// a structural fault (bad index or broken place invariant); the
    /// engine is unusable and the caller should abort.
    pub fn fire_transition(&self, t: usize) -> Result<bool, NetError> {
        if t >= TRANSITION_COUNT {
            return Err(NetError::Matrix(MatrixError::OutOfRange {
                index: t,
                len: TRANSITION_COUNT,
            }));
        }

        let mut state = self.state.lock().unwrap();
        loop {
            if self.terminated(&state) {
                self.drain(&mut state);
                return Ok(false);
            }

            let mut now = state.net.now_ms();
            let permit;
            if !state.net.waiting(t)
                && state.net.is_enabled(t)
                && state.net.is_timed(t)
                && !state.net.is_temporally_ready(t, now)
            {
                // Timed-wait sub-protocol: reserve the transition, give
                // up the lock, sleep out the rest of the α window, then
                // come back and fire. The probe is treated as satisfied
                // because `waiting` kept the slot reserved and the
                // window has elapsed by construction.
                let sleep_ms = state.net.timestamp(t) + state.net.min_delay(t) - now;
                state.net.set_waiting(t, true);
                self.wake_next(&state, now);
                drop(state);

                trace!(transition = t, sleep_ms, "sleeping out alpha window");
                thread::sleep(Duration::from_millis(sleep_ms));

                state = self.state.lock().unwrap();
                state.net.set_waiting(t, false);
                now = state.net.now_ms();
                permit = true;
            } else {
                permit = !state.net.waiting(t)
                    && state.net.is_enabled(t)
                    && (!state.net.is_timed(t) || state.net.is_temporally_ready(t, now));
            }

            let fired = state.net.try_fire(t, permit, now)?;
            trace!(transition = t, fired, "fire attempt");
            self.wake_next(&state, now);
            if fired {
                return Ok(true);
            }

            // Not fireable: park on this transition's queue. The wait
            // releases the mutex; on wake-up (policy pick, drain, or a
            // spurious wake) the loop re-probes everything.
            state.queue_waiters[t] += 1;
            state = self.queues[t].wait(state).unwrap();
            state.queue_waiters[t] -= 1;
        }
    }

    /// A receiver that yields one message when termination is first
    /// observed. Intended for the report writer.
    pub fn completion(&self) -> Receiver<()> {
        self.done_rx.clone()
    }

    /// Snapshot the final statistics under the lock.
    pub fn report(&self) -> SimReport {
        let state = self.state.lock().unwrap();
        SimReport {
            sequence: state.net.sequence().to_string(),
            fires: state.net.fires().to_vec(),
            invariant_counts: state.net.transition_invariant_counts().to_vec(),
        }
    }

    fn terminated(&self, state: &NetState) -> bool {
        state.net.fires()[self.config.exit_transition] >= self.config.required_exit_fires
    }

    /// Release protocol: wake at most one policy-chosen worker whose
    /// transition is fireable right now. Runs inside the critical
    /// section; the caller gives up the lock immediately afterwards.
    fn wake_next(&self, state: &NetState, now_ms: u64) {
        let queued: TransitionSet = state
            .queue_waiters
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(t, _)| t)
            .collect();
        let candidates = state.net.enabled_now(now_ms).intersection(queued);
        let pick = self.policy.select(candidates, state.net.fires());
        // The policy answers an empty candidate set with index 0, so a
        // wake-up is only issued if that queue really has waiters.
        if state.queue_waiters[pick] > 0 {
            trace!(transition = pick, "waking queued worker");
            self.queues[pick].notify_one();
        }
    }

    /// Drain protocol: on termination, wake one waiter on every
    /// non-empty queue. Each woken worker re-observes termination and
    /// drains again, so every parked worker is released in a bounded
    /// number of wake-ups.
    fn drain(&self, state: &mut NetState) {
        if !state.done {
            state.done = true;
            info!(
                exit_transition = self.config.exit_transition,
                fires = self.config.required_exit_fires,
                "termination reached; draining queues"
            );
            let _ = self.done_tx.try_send(());
        }
        for (t, queue) in self.queues.iter().enumerate() {
            if state.queue_waiters[t] > 0 {
                debug!(transition = t, "draining queue");
                queue.notify_one();
            }
        }
    }
}
