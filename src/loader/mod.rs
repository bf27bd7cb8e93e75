//! Sectioned machine-definition stream and driver glue
//!
//! Wire format, in order:
//! 1. `tr` keyword, then transition lines `<q_in> <c_in> <c_out> <move> <q_out>`
//! 2. `acc` keyword, then accept-state numbers, one per line
//! 3. `max` keyword, then the per-branch step budget on one line
//! 4. `run` keyword, then input strings, one per line, until EOF
//!
//! Parsing is best-effort throughout: a line that does not parse ends its
//! section and is taken as the next keyword, an invalid move byte degrades
//! to `S`, out-of-range accept numbers are dropped, and a missing budget
//! means zero. The stream is treated as raw bytes; only the numeric
//! fields must be ASCII digits.

use crate::machine::{Move, StateId, Symbol, TransitionIndex};
use crate::{Simulator, SimulatorError};
use std::io::{BufRead, Write};

/// A parsed machine definition: the transition index plus step budget
#[derive(Debug, Clone)]
pub struct Program {
    /// The frozen transition index
    pub index: TransitionIndex,

    /// Per-branch step budget
    pub max_steps: u32,
}

/// Parse the `tr`, `acc`, and `max` sections, consuming the stream up to
/// and including the `run` keyword line
///
/// The remaining lines of `reader` are the input strings; callers
/// typically hand them to [`run_program`] or iterate themselves.
pub fn load_program<R: BufRead>(reader: &mut R) -> Result<Program, SimulatorError> {
    let mut builder = TransitionIndex::builder();

    // "tr" keyword; its content is not validated
    next_line(reader)?;

    // Transition records until the first line that does not parse; that
    // line is the "acc" keyword
    while let Some(line) = next_line(reader)? {
        if parse_transition(&line, &mut builder).is_none() {
            break;
        }
    }

    // Accept numbers until the first non-number; that line is "max"
    while let Some(line) = next_line(reader)? {
        match parse_number(&line) {
            Some(state) => {
                builder.accept(state);
            }
            None => break,
        }
    }

    // Budget value, then the "run" keyword line. When the value line is
    // itself unparsable it already is the keyword: budget stays zero and
    // nothing further is consumed.
    let mut max_steps = 0;
    if let Some(line) = next_line(reader)? {
        match parse_number(&line) {
            Some(value) => {
                max_steps = value;
                next_line(reader)?; // "run"
            }
            None => {
                tracing::debug!("step budget missing, defaulting to 0");
            }
        }
    }

    Ok(Program {
        index: builder.build(),
        max_steps,
    })
}

/// Read a program from `reader` and write one verdict character per input
/// string to `output`
pub fn run_program<R: BufRead, W: Write>(
    reader: &mut R,
    output: &mut W,
) -> Result<(), SimulatorError> {
    let program = load_program(reader)?;
    let simulator = Simulator::from_program(program);

    while let Some(line) = next_line(reader)? {
        let verdict = simulator.run(&line);
        writeln!(output, "{verdict}")?;
    }
    Ok(())
}

/// Read one raw line without its terminator; `None` at EOF
///
/// A final line without `\n` is returned as given (a partial trailing
/// input string is still simulated).
fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, SimulatorError> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Parse one transition record into the builder; `None` ends the section
fn parse_transition(line: &[u8], builder: &mut crate::machine::TransitionIndexBuilder) -> Option<()> {
    let mut fields = line
        .split(|&b| b == b' ' || b == b'\t')
        .filter(|f| !f.is_empty());

    let q_in: StateId = parse_field(fields.next()?)?;
    let input: Symbol = single_byte(fields.next()?)?;
    let output: Symbol = single_byte(fields.next()?)?;
    let move_byte: u8 = single_byte(fields.next()?)?;
    let q_out: StateId = parse_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }

    let movement = Move::from_byte(move_byte).unwrap_or_else(|| {
        tracing::debug!(
            state = q_in,
            input = %(input as char),
            movement = %(move_byte as char),
            "invalid move byte, treating as S"
        );
        Move::Stay
    });

    builder.transition(q_in, input, output, movement, q_out);
    Some(())
}

/// Parse a line holding one decimal number and nothing else
fn parse_number(line: &[u8]) -> Option<u32> {
    let mut fields = line
        .split(|&b| b == b' ' || b == b'\t')
        .filter(|f| !f.is_empty());
    let value = parse_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }
    Some(value)
}

fn parse_field(field: &[u8]) -> Option<u32> {
    std::str::from_utf8(field).ok()?.parse().ok()
}

fn single_byte(field: &[u8]) -> Option<u8> {
    match field {
        [b] => Some(*b),
        _ => None,
    }
}
