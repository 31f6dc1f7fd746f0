use thiserror::Error;

/// Structural defects that make an instruction sequence unexecutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ProgramError {
    /// A branch names a label past the `stop` record.
    #[error("instruction {at_label} jumps to label {label}, past the stop instruction at label {stop_label}")]
    OutOfRangeJump {
        /// 1-based label of the offending branch.
        at_label: usize,
        /// 1-based label the branch targets.
        label: usize,
        /// 1-based label of the `stop` record.
        stop_label: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::ProgramError;

    #[test]
    fn out_of_range_jump_message_names_both_labels() {
        let error = ProgramError::OutOfRangeJump {
            at_label: 2,
            label: 99,
            stop_label: 5,
        };
        let message = error.to_string();
        assert!(message.starts_with("instruction 2 "));
        assert!(message.contains("label 99"));
        assert!(message.contains("label 5"));
    }
}
