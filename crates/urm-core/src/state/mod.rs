//! Mutable machine state owned by the execution engine.

/// Register file and program counter.
pub mod registers;

pub use registers::MachineState;
use crate::Program;

/// Execution-state machine for host-observable control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Ready to execute the instruction at `pc`.
    #[default]
    Running,
    /// `pc` reached the `stop` index; registers hold the result.
    Halted,
}

impl RunState {
    /// Returns true once the program has run off its last instruction.
    #[must_use]
    pub const fn is_halted(self) -> bool {
        matches!(self, Self::Halted)
    }

    /// Derives the state implied by a program counter.
    #[must_use]
    pub fn at(pc: usize, program: &Program) -> Self {
        if pc >= program.len() {
            Self::Halted
        } else {
            Self::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RunState;
    use crate::{Instruction, Program, RegisterId};

    #[test]
    fn run_state_default_is_running() {
        assert_eq!(RunState::default(), RunState::Running);
        assert!(!RunState::Running.is_halted());
        assert!(RunState::Halted.is_halted());
    }

    #[test]
    fn stop_index_implies_halted() {
        let program =
            Program::new(vec![Instruction::Increment(RegisterId(0))]).expect("valid program");
        assert_eq!(RunState::at(0, &program), RunState::Running);
        assert_eq!(RunState::at(1, &program), RunState::Halted);
    }
}
