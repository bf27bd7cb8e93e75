//! Transition rules δ: Q × Γ → P(Q × Γ × {L,S,R})

/// Tape symbol (element of alphabet Γ); a single octet
pub type Symbol = u8;

/// Machine state number (element of Q)
pub type StateId = u32;

/// The reserved blank symbol: an unwritten cell reads as `BLANK`
pub const BLANK: Symbol = b'_';

/// Single transition right part: what to write, where to move, next state
///
/// `Copy` on purpose: branches carry their pending transition by value, so
/// no borrow of the [`TransitionIndex`](super::TransitionIndex) outlives a
/// scheduling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Symbol written at the head before moving
    pub write: Symbol,

    /// Head movement after the write
    pub movement: Move,

    /// Next control state
    pub next: StateId,
}

/// Head movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Move left (decrement position)
    Left,

    /// Stay (no movement)
    Stay,

    /// Move right (increment position)
    Right,
}

impl Move {
    /// Decode from the wire byte (`L`, `S`, `R`)
    ///
    /// Returns `None` for any other byte; callers treat that as [`Move::Stay`]
    /// (a malformed move never aborts a machine definition).
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'L' => Some(Move::Left),
            b'S' => Some(Move::Stay),
            b'R' => Some(Move::Right),
            _ => None,
        }
    }

    /// Encode as the wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Move::Left => b'L',
            Move::Stay => b'S',
            Move::Right => b'R',
        }
    }
}
