//! Process trait and handles
//!
//! A process is a cooperative state machine owned by the kernel. Each resume
//! runs to the next suspension point and reports how it wants to suspend.

use super::Sim;

/// Stable handle to a scheduled process.
///
/// Handles index an arena slot and carry the slot's generation, so a handle
/// held by another component can never resume or cancel a process that has
/// since been replaced in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId {
    pub(super) slot: usize,
    pub(super) generation: u32,
}

#[cfg(test)]
impl ProcessId {
    /// Fabricate a handle for tests that never resume it.
    pub(crate) fn test_handle(slot: usize, generation: u32) -> Self {
        Self { slot, generation }
    }
}

/// How a process suspends at the end of a resume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Sleep for a simulated duration, then resume again.
    WaitFor(f64),
    /// Suspend until another process calls `Sim::activate` on this handle.
    Passivate,
    /// Terminate permanently.
    Done,
}

/// A cooperative process driven by the kernel.
///
/// `resume` runs atomically with respect to every other process: nothing else
/// executes until it returns a [`Transition`]. It may freely mutate the shared
/// world and spawn, activate, or cancel other processes through `sim`.
pub trait Process<W> {
    fn resume(&mut self, pid: ProcessId, sim: &mut Sim<W>) -> Transition;

    /// Short name for logging.
    fn label(&self) -> &'static str;
}
