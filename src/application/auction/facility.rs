//! Mutual-exclusion facility
//!
//! Single-slot resource with no internal wait queue: callers that fail
//! `try_acquire` manage their own retry, which is why arbitration polls. The
//! check-then-act pattern is safe because the kernel is cooperative: a
//! process runs to its next suspension point atomically with respect to all
//! others.

use crate::application::kernel::ProcessId;

/// Binary mutual-exclusion resource with an owner slot.
///
/// Invariant: at most one holder at any simulated instant.
#[derive(Debug, Default)]
pub struct Facility {
    holder: Option<ProcessId>,
    acquires: u64,
    rejections: u64,
}

impl Facility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire iff free. Records the holder on success.
    pub fn try_acquire(&mut self, pid: ProcessId) -> bool {
        if self.holder.is_some() {
            self.rejections += 1;
            return false;
        }
        self.holder = Some(pid);
        self.acquires += 1;
        true
    }

    /// Release the facility. Idempotent when not held.
    pub fn release(&mut self, pid: ProcessId) {
        debug_assert!(
            self.holder.is_none() || self.holder == Some(pid),
            "release by a non-holder"
        );
        self.holder = None;
    }

    pub fn is_busy(&self) -> bool {
        self.holder.is_some()
    }

    pub fn holder(&self) -> Option<ProcessId> {
        self.holder
    }

    /// Successful acquisitions over the run.
    pub fn acquires(&self) -> u64 {
        self.acquires
    }

    /// Failed acquisition attempts over the run.
    pub fn rejections(&self) -> u64 {
        self.rejections
    }
}
