//! Cooperative discrete-event scheduler
//!
//! Single-threaded kernel: exactly one process executes at any simulated
//! instant; concurrency is logical. Pending activations are kept in a
//! min-ordered heap; ties at the same instant break by process priority
//! (lower first), then by insertion order, so runs are fully deterministic
//! for a fixed seed.

use super::{Process, ProcessId, Transition};
use crate::domain::SimTime;
use rand::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Lifecycle state of an arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessState {
    /// Has a pending activation in the heap.
    Scheduled,
    /// Currently inside `resume`.
    Running,
    /// Suspended until externally activated.
    Passive,
    /// Finished or cancelled; the slot is free for reuse.
    Terminated,
}

/// One pending resume point.
#[derive(Debug)]
struct Activation {
    time: SimTime,
    priority: i8,
    seq: u64,
    pid: ProcessId,
}

impl PartialEq for Activation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Activation {}

impl PartialOrd for Activation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Activation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.priority.cmp(&other.priority))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

struct Slot<W> {
    generation: u32,
    priority: i8,
    state: ProcessState,
    process: Option<Box<dyn Process<W>>>,
}

/// The simulation kernel: clock, process arena, and activation heap.
///
/// `world` is the state processes share between suspension points; `rng` is
/// the single random source, so a fixed seed fixes the whole run.
pub struct Sim<W> {
    now: SimTime,
    heap: BinaryHeap<Reverse<Activation>>,
    slots: Vec<Slot<W>>,
    free: Vec<usize>,
    seq: u64,
    pub world: W,
    pub rng: StdRng,
}

impl<W> Sim<W> {
    pub fn new(world: W, rng: StdRng) -> Self {
        Self {
            now: SimTime::ZERO,
            heap: BinaryHeap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            seq: 0,
            world,
            rng,
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Spawn a process with its first resume at `at`.
    ///
    /// `priority` orders same-instant activations: lower runs first.
    pub fn spawn(&mut self, process: Box<dyn Process<W>>, at: SimTime, priority: i8) -> ProcessId {
        debug_assert!(at >= self.now, "cannot schedule in the past");
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    priority,
                    state: ProcessState::Terminated,
                    process: None,
                });
                self.slots.len() - 1
            }
        };
        let entry = &mut self.slots[slot];
        entry.priority = priority;
        entry.state = ProcessState::Scheduled;
        entry.process = Some(process);
        let pid = ProcessId {
            slot,
            generation: entry.generation,
        };
        self.push_activation(pid, at, priority);
        pid
    }

    /// Schedule a resume for a passive process.
    ///
    /// A no-op on terminated or cancelled handles, and on processes that
    /// already have a pending activation.
    pub fn activate(&mut self, pid: ProcessId, at: SimTime) {
        debug_assert!(at >= self.now, "cannot schedule in the past");
        let Some(entry) = self.slots.get_mut(pid.slot) else {
            return;
        };
        if entry.generation != pid.generation || entry.state != ProcessState::Passive {
            return;
        }
        entry.state = ProcessState::Scheduled;
        let priority = entry.priority;
        self.push_activation(pid, at, priority);
    }

    /// Synchronously cancel a process.
    ///
    /// The process is dropped immediately, its pending activation (if any)
    /// becomes void, and the handle can never resume again. Cancelling a
    /// terminated handle, or a handle from a reused slot, is a no-op. A
    /// process may cancel itself mid-resume; its final transition is then
    /// ignored.
    pub fn cancel(&mut self, pid: ProcessId) {
        let Some(entry) = self.slots.get_mut(pid.slot) else {
            return;
        };
        if entry.generation != pid.generation || entry.state == ProcessState::Terminated {
            return;
        }
        entry.process = None;
        self.retire_slot(pid.slot);
    }

    /// Whether the handle still refers to a live (non-terminated) process.
    pub fn is_live(&self, pid: ProcessId) -> bool {
        self.slots
            .get(pid.slot)
            .is_some_and(|entry| {
                entry.generation == pid.generation && entry.state != ProcessState::Terminated
            })
    }

    /// Resume the earliest pending process. Returns false when nothing is left.
    pub fn step(&mut self) -> bool {
        while let Some(Reverse(activation)) = self.heap.pop() {
            let pid = activation.pid;
            let entry = &mut self.slots[pid.slot];
            // Stale entries: cancelled processes, reused slots.
            if entry.generation != pid.generation || entry.state != ProcessState::Scheduled {
                continue;
            }
            debug_assert!(activation.time >= self.now, "clock is monotone");
            self.now = activation.time;
            entry.state = ProcessState::Running;
            let mut process = entry.process.take().expect("scheduled process has a body");

            let transition = process.resume(pid, self);

            let entry = &mut self.slots[pid.slot];
            if entry.generation != pid.generation || entry.state == ProcessState::Terminated {
                // Cancelled itself (directly or via a close path) during the
                // resume; the returned transition is void.
                return true;
            }
            match transition {
                Transition::WaitFor(delay) => {
                    debug_assert!(delay >= 0.0, "wait durations are non-negative");
                    entry.state = ProcessState::Scheduled;
                    entry.process = Some(process);
                    let priority = entry.priority;
                    let at = self.now + delay;
                    self.push_activation(pid, at, priority);
                }
                Transition::Passivate => {
                    entry.state = ProcessState::Passive;
                    entry.process = Some(process);
                }
                Transition::Done => {
                    self.retire_slot(pid.slot);
                }
            }
            return true;
        }
        false
    }

    /// Run until no process is ready.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Run until no process is ready or the next activation lies beyond
    /// `horizon`.
    pub fn run_until(&mut self, horizon: SimTime) {
        while let Some(Reverse(activation)) = self.heap.peek() {
            if activation.time > horizon {
                break;
            }
            if !self.step() {
                break;
            }
        }
    }

    fn push_activation(&mut self, pid: ProcessId, at: SimTime, priority: i8) {
        self.seq += 1;
        self.heap.push(Reverse(Activation {
            time: at,
            priority,
            seq: self.seq,
            pid,
        }));
    }

    fn retire_slot(&mut self, slot: usize) {
        let entry = &mut self.slots[slot];
        entry.state = ProcessState::Terminated;
        entry.process = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
    }
}
