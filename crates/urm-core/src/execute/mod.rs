//! Instruction execution for the register machine.
//!
//! A step runs in two phases, so an instruction's effects land together:
//! 1. [`execute_instruction`] reads the state and computes the register
//!    write (if any) and the next `pc`.
//! 2. [`commit_execution`] applies them and re-derives the run state.
//!
//! Halting is purely positional: the machine stops when `pc` equals the
//! program length. Nothing here bounds the number of steps.

mod arith;

pub use arith::{floored_decrement, saturating_increment};

use crate::{
    Instruction, MachineConfig, MachineState, Natural, NullSink, Program, RegisterId, RunOutcome,
    RunState, StepOutcome, TraceEvent, TraceSink,
};

/// Side effects computed for one instruction, applied by [`commit_execution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteState {
    /// Register write to perform, if the instruction writes one.
    pub write: Option<(RegisterId, Natural)>,
    /// Program counter after the instruction.
    pub next_pc: usize,
    /// True when `next_pc` came from a branch rather than fall-through.
    pub jumped: bool,
}

impl ExecuteState {
    const fn write(register: RegisterId, value: Natural, pc: usize) -> Self {
        Self {
            write: Some((register, value)),
            next_pc: pc + 1,
            jumped: false,
        }
    }

    const fn jump(target: usize) -> Self {
        Self {
            write: None,
            next_pc: target,
            jumped: true,
        }
    }
}

/// Computes the effects of `instruction`, located at `pc`, without mutating
/// the state.
#[must_use]
pub fn execute_instruction(
    instruction: &Instruction,
    pc: usize,
    state: &MachineState,
    config: &MachineConfig,
) -> ExecuteState {
    match *instruction {
        Instruction::Increment(register) => ExecuteState::write(
            register,
            saturating_increment(state.register(register), config.saturation_cap),
            pc,
        ),
        Instruction::Decrement(register) => {
            ExecuteState::write(register, floored_decrement(state.register(register)), pc)
        }
        Instruction::Assign(register, value) => ExecuteState::write(register, value, pc),
        Instruction::Branch {
            register,
            if_zero,
            if_nonzero,
        } => {
            if state.register(register) == 0 {
                ExecuteState::jump(if_zero)
            } else {
                ExecuteState::jump(if_nonzero)
            }
        }
    }
}

/// Applies computed effects to the state.
pub fn commit_execution(state: &mut MachineState, exec: &ExecuteState, program: &Program) {
    if let Some((register, value)) = exec.write {
        state.set_register(register, value);
    }
    state.set_pc(exec.next_pc);
    state.set_run_state(RunState::at(exec.next_pc, program));
}

/// Executes the instruction at the current `pc`, if there is one.
pub fn step_one(
    state: &mut MachineState,
    program: &Program,
    config: &MachineConfig,
) -> StepOutcome {
    step_traced(state, program, config, &mut NullSink)
}

/// [`step_one`] with trace events delivered to `sink` when
/// [`MachineConfig::tracing_enabled`] is set.
pub fn step_traced(
    state: &mut MachineState,
    program: &Program,
    config: &MachineConfig,
    sink: &mut dyn TraceSink,
) -> StepOutcome {
    let pc = state.pc();
    let Some(instruction) = program.get(pc) else {
        state.set_run_state(RunState::Halted);
        if config.tracing_enabled {
            sink.on_event(TraceEvent::Halted { pc });
        }
        return StepOutcome::Halted;
    };

    if config.tracing_enabled {
        sink.on_event(TraceEvent::InstructionStart {
            pc,
            instruction: *instruction,
        });
    }

    let exec = execute_instruction(instruction, pc, state, config);
    commit_execution(state, &exec, program);

    if config.tracing_enabled {
        if let Some((register, value)) = exec.write {
            sink.on_event(TraceEvent::RegisterWrite { register, value });
        }
        if exec.jumped {
            sink.on_event(TraceEvent::Jump {
                from: pc,
                to: exec.next_pc,
            });
        }
    }

    StepOutcome::Retired { pc }
}

/// Steps until the machine halts. Does not return for a non-terminating
/// program.
pub fn run_to_halt(
    state: &mut MachineState,
    program: &Program,
    config: &MachineConfig,
) -> RunOutcome {
    run_traced(state, program, config, &mut NullSink)
}

/// [`run_to_halt`] with trace events delivered to `sink`.
pub fn run_traced(
    state: &mut MachineState,
    program: &Program,
    config: &MachineConfig,
    sink: &mut dyn TraceSink,
) -> RunOutcome {
    let mut steps = 0_u64;
    while let StepOutcome::Retired { .. } = step_traced(state, program, config, sink) {
        steps += 1;
    }
    RunOutcome { steps }
}

/// Runs `program` from a fresh zeroed state and returns the final state.
#[must_use]
pub fn run_program(program: &Program, config: &MachineConfig) -> (MachineState, RunOutcome) {
    let mut state = MachineState::for_program(program);
    let outcome = run_to_halt(&mut state, program, config);
    (state, outcome)
}
