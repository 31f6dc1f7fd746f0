//! Public host-facing API contracts for embedding the engine.

use crate::{Instruction, Natural, RegisterId};

/// Default increment saturation bound (2^30 + 2^29).
pub const DEFAULT_SATURATION_CAP: Natural = (1 << 30) + (1 << 29);

/// Top-level immutable configuration for a machine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineConfig {
    /// Increments leave a register unchanged once it holds at least this value.
    pub saturation_cap: Natural,
    /// Enables trace callback dispatch.
    pub tracing_enabled: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            saturation_cap: DEFAULT_SATURATION_CAP,
            tracing_enabled: false,
        }
    }
}

/// Output status from one step attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The instruction at `pc` executed.
    Retired {
        /// 0-based index of the executed instruction.
        pc: usize,
    },
    /// `pc` is at the `stop` index; nothing executed.
    Halted,
}

/// Aggregated outcome of running until halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Number of instructions executed during this call.
    pub steps: u64,
}

/// Trace events emitted at step boundaries when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// An instruction is about to execute.
    InstructionStart {
        /// 0-based index of the instruction.
        pc: usize,
        /// The instruction itself.
        instruction: Instruction,
    },
    /// A register was written.
    RegisterWrite {
        /// Written register.
        register: RegisterId,
        /// Value after the write.
        value: Natural,
    },
    /// A branch moved the program counter.
    Jump {
        /// 0-based index of the branch.
        from: usize,
        /// 0-based index it transferred to.
        to: usize,
    },
    /// Execution reached the `stop` index.
    Halted {
        /// Final program counter (the program length).
        pc: usize,
    },
}

/// Sink trait for trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn on_event(&mut self, _event: TraceEvent) {}
}

#[cfg(test)]
mod tests {
    use super::{MachineConfig, TraceEvent, TraceSink, DEFAULT_SATURATION_CAP};

    #[test]
    fn default_config_uses_observed_cap_and_no_tracing() {
        let config = MachineConfig::default();
        assert_eq!(config.saturation_cap, 1_610_612_736);
        assert_eq!(config.saturation_cap, DEFAULT_SATURATION_CAP);
        assert!(!config.tracing_enabled);
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut events = Vec::new();
        events.on_event(TraceEvent::Jump { from: 1, to: 0 });
        events.on_event(TraceEvent::Halted { pc: 3 });
        assert_eq!(
            events,
            vec![
                TraceEvent::Jump { from: 1, to: 0 },
                TraceEvent::Halted { pc: 3 }
            ]
        );
    }
}
