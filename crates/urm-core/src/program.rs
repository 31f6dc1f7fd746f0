//! Validated, immutable instruction sequences.

use crate::{Instruction, ProgramError};

/// An instruction sequence whose branch targets all lie in `[0, len]`.
///
/// Index `len` is the position of the `stop` record, so a branch there halts.
/// Construction is the only place that check happens; the engine relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Vec<Instruction>", into = "Vec<Instruction>")
)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Builds a program, rejecting branches that jump past the `stop` record.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::OutOfRangeJump`] for the first branch whose
    /// target exceeds `instructions.len()`.
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, ProgramError> {
        let stop_index = instructions.len();

        for (index, instruction) in instructions.iter().enumerate() {
            let Some((if_zero, if_nonzero)) = instruction.branch_targets() else {
                continue;
            };
            let furthest = if_zero.max(if_nonzero);
            if furthest > stop_index {
                return Err(ProgramError::OutOfRangeJump {
                    at_label: index + 1,
                    label: furthest.saturating_add(1),
                    stop_label: stop_index + 1,
                });
            }
        }

        Ok(Self { instructions })
    }

    /// Number of executable instructions (the halting `pc`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true for a program consisting only of `stop`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// 1-based label of the `stop` record.
    #[must_use]
    pub fn stop_label(&self) -> usize {
        self.instructions.len() + 1
    }

    /// Instruction at a 0-based index, or `None` at or past the stop index.
    #[must_use]
    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    /// All instructions in order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Smallest register file that covers every register the program names.
    #[must_use]
    pub fn register_count(&self) -> usize {
        self.instructions
            .iter()
            .map(|instruction| instruction.register().index() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl TryFrom<Vec<Instruction>> for Program {
    type Error = ProgramError;

    fn try_from(instructions: Vec<Instruction>) -> Result<Self, Self::Error> {
        Self::new(instructions)
    }
}

impl From<Program> for Vec<Instruction> {
    fn from(program: Program) -> Self {
        program.instructions
    }
}
