//! Core execution engine for Unbounded Register Machine programs.

/// Closed instruction set and register identifiers.
pub mod instruction;
pub use instruction::{Instruction, InstructionDisplay, Natural, RegisterId};

/// Program construction errors.
pub mod error;
pub use error::ProgramError;

/// Validated instruction sequences.
pub mod program;
pub use program::Program;

/// Public host-facing configuration, outcome, and trace types.
pub mod api;
pub use api::{
    MachineConfig, NullSink, RunOutcome, StepOutcome, TraceEvent, TraceSink,
    DEFAULT_SATURATION_CAP,
};

/// Register file and run-state model.
pub mod state;
pub use state::{MachineState, RunState};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{
    commit_execution, execute_instruction, floored_decrement, run_program, run_to_halt,
    run_traced, saturating_increment, step_one, step_traced, ExecuteState,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use serde_json as _;
