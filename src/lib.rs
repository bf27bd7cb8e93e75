//! # Nondeterministic Turing machine simulation
//!
//! This library simulates single-tape nondeterministic Turing machines
//! against input strings, deciding for each whether the machine accepts,
//! rejects, or exceeds a per-branch step budget.
//!
//! ## Core design
//!
//! 1. **Transition index**: dense state table with sorted input rows and
//!    hybrid linear/binary lookup
//! 2. **Paged tape**: two-way infinite, allocated page by page, shared
//!    between branches with copy-on-write
//! 3. **Branch scheduler**: depth-first run queue over explicit branch
//!    values; nondeterminism is a work list, not host concurrency
//! 4. **Tri-valued verdict**: accept short-circuits; a drained queue is a
//!    reject, or undetermined when any branch hit the budget
//!
//! ## Usage
//!
//! ```
//! use ndtm::{Move, Simulator, TransitionIndex, Verdict};
//!
//! let mut builder = TransitionIndex::builder();
//! builder.transition(0, b'a', b'a', Move::Right, 1);
//! builder.accept(1);
//!
//! let simulator = Simulator::new(builder.build(), 100);
//! assert_eq!(simulator.run(b"a"), Verdict::Accept);
//! assert_eq!(simulator.run(b"b"), Verdict::Reject);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod loader; // Program stream parsing and driver glue
pub mod machine; // Transition index
pub mod sched; // Branch scheduler
pub mod tape; // Paged copy-on-write tape

// Re-exports for convenience
pub use loader::{load_program, run_program, Program};
pub use machine::{Move, StateId, Symbol, Transition, TransitionIndex, BLANK};
pub use sched::{Branch, RunStats, Scheduler, Verdict};
pub use tape::{Tape, PAGE_SIZE};

use thiserror::Error;

/// Errors surfaced by the driver layer
///
/// The simulation core itself never fails: malformed machine definitions
/// are tolerated best-effort and every run terminates with a verdict.
/// Only the surrounding stream I/O can go wrong.
#[derive(Error, Debug)]
pub enum SimulatorError {
    /// Reading the program stream or writing a verdict failed
    #[error("program stream I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A machine definition bound to its step budget
///
/// One `Simulator` is built per program and reused across input strings;
/// each [`run`](Simulator::run) is independent.
#[derive(Debug, Clone)]
pub struct Simulator {
    index: TransitionIndex,
    max_steps: u32,
}

impl Simulator {
    /// Create a simulator from an index and per-branch step budget
    pub fn new(index: TransitionIndex, max_steps: u32) -> Self {
        Self { index, max_steps }
    }

    /// Create a simulator from a parsed [`Program`]
    pub fn from_program(program: Program) -> Self {
        Self::new(program.index, program.max_steps)
    }

    /// The machine's transition index
    pub fn index(&self) -> &TransitionIndex {
        &self.index
    }

    /// The per-branch step budget
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Simulate one input string to a verdict
    pub fn run(&self, input: &[u8]) -> Verdict {
        Scheduler::new(&self.index, self.max_steps).run(input)
    }

    /// Simulate one input string, also returning run counters
    pub fn run_with_stats(&self, input: &[u8]) -> (Verdict, RunStats) {
        let mut scheduler = Scheduler::new(&self.index, self.max_steps);
        let verdict = scheduler.run(input);
        (verdict, scheduler.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_is_reusable() {
        let mut builder = TransitionIndex::builder();
        builder.transition(0, b'a', b'a', Move::Right, 0);
        builder.transition(0, b'b', b'b', Move::Right, 1);
        builder.accept(1);
        let simulator = Simulator::new(builder.build(), 100);

        assert_eq!(simulator.run(b"aab"), Verdict::Accept);
        assert_eq!(simulator.run(b"aaa"), Verdict::Reject);
        assert_eq!(simulator.run(b"aab"), Verdict::Accept);
    }

    #[test]
    fn test_stats_reported() {
        let mut builder = TransitionIndex::builder();
        builder.transition(0, BLANK, BLANK, Move::Right, 0);
        let simulator = Simulator::new(builder.build(), 7);

        let (verdict, stats) = simulator.run_with_stats(b"");
        assert_eq!(verdict, Verdict::Undetermined);
        assert_eq!(stats.branches_preempted, 1);
        assert_eq!(stats.max_steps_taken, 7);
    }
}
