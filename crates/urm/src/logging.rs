//! Log output for the command-line interpreter.

use tracing::trace;
use tracing_subscriber::{fmt, EnvFilter};
use urm_core::{Instruction, RegisterId, TraceEvent, TraceSink};

use crate::naturalize::VariableTable;

/// Filter used when `--trace` is given.
pub const TRACE_FILTER: &str = "warn,urm=trace";

/// Installs a stderr subscriber.
///
/// `RUST_LOG` overrides the default `warn` filter unless `trace` is set, in
/// which case [`TRACE_FILTER`] is used.
pub fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new(TRACE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Forwards engine trace events to `tracing`, naming registers by their
/// source variable.
#[derive(Debug, Clone, Copy)]
pub struct LogSink<'a> {
    variables: &'a VariableTable,
}

impl<'a> LogSink<'a> {
    /// Creates a sink that resolves register names through `variables`.
    #[must_use]
    pub const fn new(variables: &'a VariableTable) -> Self {
        Self { variables }
    }

    fn name(&self, register: RegisterId) -> String {
        self.variables
            .name(register)
            .map_or_else(|| register.to_string(), str::to_string)
    }

    /// Renders `instruction` the way it is written in source.
    #[must_use]
    pub fn describe(&self, instruction: &Instruction) -> String {
        instruction
            .display_with(|register| self.name(register))
            .to_string()
    }
}

impl TraceSink for LogSink<'_> {
    fn on_event(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::InstructionStart { pc, instruction } => {
                trace!(label = pc + 1, "{}", self.describe(&instruction));
            }
            TraceEvent::RegisterWrite { register, value } => {
                trace!(variable = %self.name(register), value, "write");
            }
            TraceEvent::Jump { from, to } => trace!(from = from + 1, to = to + 1, "jump"),
            TraceEvent::Halted { pc } => trace!(label = pc + 1, "stop"),
        }
    }
}
