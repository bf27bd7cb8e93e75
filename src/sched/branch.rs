//! A single path of the nondeterministic computation tree
//!
//! A branch owns its control state, head position, and step count, and
//! shares its tape with sibling branches until the first divergent write.

use crate::machine::{Move, StateId, Symbol, Transition, BLANK};
use crate::tape::{Tape, PAGE_SIZE};
use std::rc::Rc;

/// One computation branch: control state, shared tape handle, head, step
/// count, and the transition picked for its next step
#[derive(Debug, Clone)]
pub struct Branch {
    state: StateId,
    tape: Rc<Tape>,

    /// Index of the head's page within the tape, or `None` while the tape
    /// has no pages
    head_page: Option<usize>,

    /// Cell index within the head page, `0..PAGE_SIZE`
    head_pos: usize,

    steps: u32,

    /// Transition to execute on the next scheduling step; `None` means
    /// "look one up from the current cell"
    pending: Option<Transition>,
}

impl Branch {
    /// Create a root branch in state 0 over a fresh, empty tape
    pub fn root() -> Self {
        Self {
            state: 0,
            tape: Rc::new(Tape::new()),
            head_page: None,
            head_pos: 0,
            steps: 0,
            pending: None,
        }
    }

    /// Fork a child for sibling transition `t`
    ///
    /// The child shares this branch's tape (no page is copied until one
    /// side writes) and inherits state, head, and step count.
    pub fn fork(&self, t: Transition) -> Self {
        Self {
            state: self.state,
            tape: Rc::clone(&self.tape),
            head_page: self.head_page,
            head_pos: self.head_pos,
            steps: self.steps,
            pending: Some(t),
        }
    }

    /// Current control state
    pub fn state(&self) -> StateId {
        self.state
    }

    /// Transitions executed so far on this path
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Take the pending transition, if any
    pub fn take_pending(&mut self) -> Option<Transition> {
        self.pending.take()
    }

    /// Select the transition for the next step
    pub fn set_pending(&mut self, t: Transition) {
        self.pending = Some(t);
    }

    /// Whether `self` and `other` still alias the same tape
    pub fn shares_tape_with(&self, other: &Branch) -> bool {
        Rc::ptr_eq(&self.tape, &other.tape)
    }

    /// Execute one transition: write, move, advance the step count, and
    /// enter the next state
    pub fn apply(&mut self, t: Transition) {
        self.write(t.write);
        self.advance(t.movement);
        self.steps += 1;
        self.state = t.next;
    }

    /// Read the cell under the head; blank while no page is allocated
    pub fn read(&self) -> Symbol {
        match self.head_page {
            None => BLANK,
            Some(page) => self.tape.read(page, self.head_pos),
        }
    }

    /// Write `symbol` under the head
    ///
    /// No-op when the cell already holds `symbol` (in particular, a blank
    /// write on an unallocated tape allocates nothing). Otherwise the
    /// tape is privatized if shared, and a first page is attached when
    /// none exists.
    pub fn write(&mut self, symbol: Symbol) {
        if self.read() == symbol {
            return;
        }
        let tape = Rc::make_mut(&mut self.tape);
        let page = match self.head_page {
            Some(page) => page,
            None => {
                tape.alloc_first();
                self.head_page = Some(0);
                self.head_pos = 0;
                0
            }
        };
        tape.write(page, self.head_pos, symbol);
    }

    /// Move the head one cell left or right (`Stay` is a no-op)
    ///
    /// Crossing the end of the page list is a page fault: a blank
    /// neighbor is attached, privatizing a shared tape first. Attachment
    /// happens only when the move actually crosses and no neighbor
    /// exists. Moving with no allocated page is a no-op in every
    /// direction.
    pub fn advance(&mut self, movement: Move) {
        let Some(page) = self.head_page else {
            return;
        };
        match movement {
            Move::Stay => {}
            Move::Left => {
                if self.head_pos == 0 {
                    if page == 0 {
                        // Left page fault; indices shift, head enters the
                        // new leftmost page
                        Rc::make_mut(&mut self.tape).push_front_page();
                    } else {
                        self.head_page = Some(page - 1);
                    }
                    self.head_pos = PAGE_SIZE - 1;
                } else {
                    self.head_pos -= 1;
                }
            }
            Move::Right => {
                if self.head_pos == PAGE_SIZE - 1 {
                    let next = page + 1;
                    if next == self.tape.page_count() {
                        // Right page fault
                        Rc::make_mut(&mut self.tape).push_back_page();
                    }
                    self.head_page = Some(next);
                    self.head_pos = 0;
                } else {
                    self.head_pos += 1;
                }
            }
        }
    }

    /// Rewind the head to the leftmost page, cell 0
    ///
    /// Used when seeding a root branch: the input is written left to
    /// right, then the head returns to the start. On a pageless tape the
    /// head simply stays unset.
    pub fn rewind(&mut self) {
        self.head_page = if self.tape.is_empty() { None } else { Some(0) };
        self.head_pos = 0;
    }
}
