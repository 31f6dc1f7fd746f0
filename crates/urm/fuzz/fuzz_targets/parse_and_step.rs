#![no_main]

use libfuzzer_sys::fuzz_target;
use urm::{parse_program, ParseOptions, VariableMode};
use urm_core::{step_one, MachineConfig, MachineState, StepOutcome};

const STEP_LIMIT: usize = 4096;

fuzz_target!(|data: &[u8]| {
    let Some((&mode, text)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(text) else {
        return;
    };

    let options = ParseOptions {
        variable_mode: if mode & 1 == 0 {
            VariableMode::Strict
        } else {
            VariableMode::Permissive
        },
    };
    let Ok(parsed) = parse_program(text, &options) else {
        return;
    };

    let mut state = MachineState::new(parsed.variables.len());
    let config = MachineConfig::default();
    for _ in 0..STEP_LIMIT {
        if step_one(&mut state, &parsed.program, &config) == StepOutcome::Halted {
            break;
        }
        assert!(state.pc() <= parsed.program.len());
    }
});
