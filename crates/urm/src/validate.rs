//! Whole-program validation run after the `stop` record is read.
//!
//! Branch labels can point forward, so whether they stay inside the program
//! is only known once its extent is. The parser feeds every branch label to
//! a [`JumpTracker`]; [`validate_program`] then checks the furthest one
//! against the `stop` label before anything can execute.

use urm_core::{Instruction, Program, ProgramError};

use crate::errors::{ParseError, ParseErrorKind, SourceLocation};

/// A branch label as it appeared in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpReference {
    /// The 1-based label jumped to.
    pub label: usize,
    /// Label of the record containing the branch.
    pub at_label: usize,
    /// Where the label was written.
    pub location: SourceLocation,
}

/// Running maximum of referenced branch labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpTracker {
    furthest: Option<JumpReference>,
}

impl JumpTracker {
    /// Creates a tracker that has seen no branches.
    #[must_use]
    pub const fn new() -> Self {
        Self { furthest: None }
    }

    /// Records one branch label. The first of equal maxima is kept.
    pub fn record(&mut self, reference: JumpReference) {
        if self
            .furthest
            .is_none_or(|furthest| reference.label > furthest.label)
        {
            self.furthest = Some(reference);
        }
    }

    /// Highest label referenced so far; 1 when there are no branches.
    #[must_use]
    pub fn max_label(&self) -> usize {
        self.furthest.map_or(1, |furthest| furthest.label)
    }

    /// The reference that set the current maximum.
    #[must_use]
    pub const fn furthest(&self) -> Option<JumpReference> {
        self.furthest
    }
}

/// Checks that no recorded branch jumps past `stop_label`.
///
/// # Errors
///
/// Returns [`ParseErrorKind::OutOfRangeJump`] located at the furthest
/// offending label.
pub fn check_jump_bounds(jumps: &JumpTracker, stop_label: usize) -> Result<(), ParseError> {
    if jumps.max_label() <= stop_label {
        return Ok(());
    }
    jumps.furthest().map_or(Ok(()), |reference| {
        Err(ParseError {
            label: reference.at_label,
            location: reference.location,
            kind: ParseErrorKind::OutOfRangeJump {
                label: reference.label,
                stop_label,
            },
        })
    })
}

/// Validates a fully parsed instruction sequence and freezes it into a
/// [`Program`].
///
/// # Errors
///
/// Returns [`ParseErrorKind::OutOfRangeJump`] if any branch jumps past the
/// `stop` record.
pub fn validate_program(
    instructions: Vec<Instruction>,
    jumps: &JumpTracker,
) -> Result<Program, ParseError> {
    let stop_label = instructions.len() + 1;
    check_jump_bounds(jumps, stop_label)?;
    Program::new(instructions).map_err(|error| match error {
        ProgramError::OutOfRangeJump {
            at_label,
            label,
            stop_label,
        } => ParseError {
            label: at_label,
            location: SourceLocation::START,
            kind: ParseErrorKind::OutOfRangeJump { label, stop_label },
        },
    })
}
