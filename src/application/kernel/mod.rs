//! Discrete-event kernel
//!
//! Cooperative process scheduler over a simulated clock. Processes are
//! explicit state machines owned by an arena; suspension points are the
//! [`Transition`] variants returned from each resume.

mod process;
mod scheduler;

pub use process::{Process, ProcessId, Transition};
pub use scheduler::Sim;
