//! Machine definition and transition lookup
//!
//! A nondeterministic single-tape machine is stored as a dense state table:
//! - States numbered `0..=max_state`, state 0 initial by convention
//! - Per state: an accept flag and input rows sorted by input symbol
//! - Per input row: the list of applicable transitions (the fan-out)

mod transition;

pub use transition::{Move, StateId, Symbol, Transition, BLANK};

use std::collections::BTreeMap;

/// Input rows at or below this count are scanned linearly; above it,
/// binary search. Alphabets are small, so the constant usually wins.
const LINEAR_SEARCH_MAX: usize = 4;

/// One input row of a state: the transitions applicable when the head
/// reads `input` in that state
#[derive(Debug, Clone)]
pub struct InputEntry {
    /// Input symbol this row matches
    input: Symbol,

    /// Outgoing transitions, in definition order
    transitions: Vec<Transition>,
}

/// A single control state
#[derive(Debug, Clone, Default)]
pub struct State {
    accept: bool,

    /// Rows sorted ascending by input symbol (binary-searchable)
    entries: Vec<InputEntry>,
}

impl State {
    /// Whether this state carries the accept flag
    pub fn is_accept(&self) -> bool {
        self.accept
    }

    /// Number of distinct input symbols with at least one transition
    pub fn input_count(&self) -> usize {
        self.entries.len()
    }
}

/// Immutable transition index for one machine
///
/// Built once per machine definition via [`TransitionIndexBuilder`], then
/// shared read-only by every computation branch.
#[derive(Debug, Clone)]
pub struct TransitionIndex {
    /// Dense `[0, max_state]` vector; unreferenced numbers in range exist
    /// with no rows and no accept flag
    states: Vec<State>,
}

impl TransitionIndex {
    /// Create a fluent builder
    pub fn builder() -> TransitionIndexBuilder {
        TransitionIndexBuilder::new()
    }

    /// Highest state number in the machine
    pub fn max_state(&self) -> StateId {
        (self.states.len() - 1) as StateId
    }

    /// Access a state by number
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    /// Look up the transitions applicable to `(state, input)`
    ///
    /// Returns an empty slice when the state has no row for `input`.
    /// Hybrid search: linear scan for small row counts, binary search
    /// otherwise.
    pub fn lookup(&self, state: StateId, input: Symbol) -> &[Transition] {
        let entries = &self.states[state as usize].entries;
        let found = if entries.len() <= LINEAR_SEARCH_MAX {
            entries.iter().find(|e| e.input == input)
        } else {
            entries
                .binary_search_by_key(&input, |e| e.input)
                .ok()
                .map(|i| &entries[i])
        };
        found.map(|e| e.transitions.as_slice()).unwrap_or(&[])
    }

    /// Whether `state` carries the accept flag
    ///
    /// Reaching a flagged state accepts the run outright, whether or not
    /// the state defines further transitions; a flagged state may loop on
    /// blanks without forfeiting acceptance.
    pub fn is_accept(&self, state: StateId) -> bool {
        self.states[state as usize].accept
    }
}

/// Accumulates a transition stream and accept-state list, then freezes
/// them into a [`TransitionIndex`]
///
/// Records sharing `(state, input)` extend that row's transition list in
/// stream order. Accept numbers above the highest state seen in any
/// transition are dropped (such states are unreachable).
#[derive(Debug)]
pub struct TransitionIndexBuilder {
    /// `state -> input -> transitions`, kept sorted by the map ordering
    records: BTreeMap<StateId, BTreeMap<Symbol, Vec<Transition>>>,
    accept: Vec<StateId>,
    max_state: StateId,
}

impl TransitionIndexBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            accept: Vec::new(),
            max_state: 0,
        }
    }

    /// Add one transition record `(q_in, input) -> (output, movement, q_out)`
    pub fn transition(
        &mut self,
        q_in: StateId,
        input: Symbol,
        output: Symbol,
        movement: Move,
        q_out: StateId,
    ) -> &mut Self {
        self.max_state = self.max_state.max(q_in).max(q_out);
        self.records
            .entry(q_in)
            .or_default()
            .entry(input)
            .or_default()
            .push(Transition {
                write: output,
                movement,
                next: q_out,
            });
        self
    }

    /// Mark a state number as accepting
    pub fn accept(&mut self, state: StateId) -> &mut Self {
        self.accept.push(state);
        self
    }

    /// Freeze into an immutable index
    pub fn build(&mut self) -> TransitionIndex {
        let mut states = vec![State::default(); self.max_state as usize + 1];

        for (&number, rows) in &self.records {
            states[number as usize].entries = rows
                .iter()
                .map(|(&input, transitions)| InputEntry {
                    input,
                    transitions: transitions.clone(),
                })
                .collect();
        }

        for &number in &self.accept {
            if number <= self.max_state {
                states[number as usize].accept = true;
            } else {
                tracing::debug!(state = number, "accept flag on unreachable state ignored");
            }
        }

        TransitionIndex { states }
    }
}

impl Default for TransitionIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_state_table() {
        let mut b = TransitionIndex::builder();
        b.transition(0, b'a', b'a', Move::Right, 5);
        let index = b.build();

        assert_eq!(index.max_state(), 5);
        // States 1..=4 never referenced, but present and empty
        for q in 1..=4 {
            assert_eq!(index.state(q).input_count(), 0);
            assert!(!index.state(q).is_accept());
        }
    }

    #[test]
    fn test_rows_sorted_and_accumulated() {
        let mut b = TransitionIndex::builder();
        b.transition(0, b'z', b'z', Move::Stay, 0);
        b.transition(0, b'a', b'0', Move::Right, 1);
        b.transition(0, b'a', b'1', Move::Left, 2);

        let index = b.build();
        // Two rows at state 0, fan-out of two at 'a' in stream order
        assert_eq!(index.state(0).input_count(), 2);
        let fan = index.lookup(0, b'a');
        assert_eq!(fan.len(), 2);
        assert_eq!(fan[0].write, b'0');
        assert_eq!(fan[1].write, b'1');
        assert_eq!(index.lookup(0, b'z').len(), 1);
        assert!(index.lookup(0, b'q').is_empty());
    }

    #[test]
    fn test_binary_search_path() {
        // More rows than the linear threshold to force the binary branch
        let mut b = TransitionIndex::builder();
        for (i, &c) in b"abcdefgh".iter().enumerate() {
            b.transition(0, c, c, Move::Right, i as StateId);
        }
        let index = b.build();

        for &c in b"abcdefgh" {
            let fan = index.lookup(0, c);
            assert_eq!(fan.len(), 1, "missing row for {}", c as char);
            assert_eq!(fan[0].write, c);
        }
        assert!(index.lookup(0, b'_').is_empty());
        assert!(index.lookup(0, b'z').is_empty());
    }

    #[test]
    fn test_accept_out_of_range_ignored() {
        let mut b = TransitionIndex::builder();
        b.transition(0, b'a', b'a', Move::Stay, 1);
        b.accept(1);
        b.accept(99);
        let index = b.build();

        assert_eq!(index.max_state(), 1);
        assert!(index.state(1).is_accept());
    }

    #[test]
    fn test_accept_flags() {
        let mut b = TransitionIndex::builder();
        b.transition(0, b'a', b'a', Move::Right, 1);
        b.transition(1, b'b', b'b', Move::Right, 2);
        b.accept(1);
        b.accept(2);
        let index = b.build();

        assert!(!index.is_accept(0));
        // The flag is independent of whether the state keeps outgoing rows
        assert!(index.is_accept(1));
        assert!(index.is_accept(2));
    }

    #[test]
    fn test_empty_stream_still_has_initial_state() {
        let index = TransitionIndex::builder().build();
        assert_eq!(index.max_state(), 0);
        assert!(index.lookup(0, BLANK).is_empty());
    }
}
