use crate::{Natural, Program, RegisterId, RunState};

/// Register values indexed by [`RegisterId`], plus the program counter.
///
/// Every register starts at zero. Values never go negative: the type is
/// unsigned and the engine floors decrements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineState {
    registers: Vec<Natural>,
    pc: usize,
    run_state: RunState,
}

impl MachineState {
    /// Creates a zeroed state with `register_count` registers and `pc = 0`.
    #[must_use]
    pub fn new(register_count: usize) -> Self {
        Self {
            registers: vec![0; register_count],
            pc: 0,
            run_state: RunState::Running,
        }
    }

    /// Creates a zeroed state sized for `program`, halted already if the
    /// program is empty.
    #[must_use]
    pub fn for_program(program: &Program) -> Self {
        let mut state = Self::new(program.register_count());
        state.run_state = RunState::at(0, program);
        state
    }

    /// Reads a register. Registers outside the file read as zero.
    #[must_use]
    pub fn register(&self, id: RegisterId) -> Natural {
        self.registers.get(id.index()).copied().unwrap_or(0)
    }

    /// Writes a register, growing the file if `id` lies past its end.
    pub fn set_register(&mut self, id: RegisterId, value: Natural) {
        let index = id.index();
        if index >= self.registers.len() {
            self.registers.resize(index + 1, 0);
        }
        self.registers[index] = value;
    }

    /// All register values in id order.
    #[must_use]
    pub fn registers(&self) -> &[Natural] {
        &self.registers
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// Current run state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Overwrites the run state.
    pub const fn set_run_state(&mut self, run_state: RunState) {
        self.run_state = run_state;
    }
}
