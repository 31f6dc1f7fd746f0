//! Serialization coverage for the optional `serde` feature.

use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use serde_json as _;
use thiserror as _;
use urm_core as _;

#[cfg(feature = "serde")]
mod json {
    use urm_core::{run_program, Instruction, MachineConfig, MachineState, Program, RegisterId};

    #[test]
    fn program_round_trips_through_json() {
        let program = Program::new(vec![
            Instruction::Assign(RegisterId(0), 2),
            Instruction::Branch {
                register: RegisterId(0),
                if_zero: 3,
                if_nonzero: 2,
            },
            Instruction::Decrement(RegisterId(0)),
        ])
        .expect("valid program");

        let json = serde_json::to_string(&program).expect("program serializes");
        let restored: Program = serde_json::from_str(&json).expect("program deserializes");

        assert_eq!(restored, program);
    }

    #[test]
    fn deserialization_revalidates_jump_targets() {
        let program = Program::new(vec![Instruction::Increment(RegisterId(0))]).expect("valid");
        let json = serde_json::to_string(&program).expect("program serializes");
        let tampered = json.replace(
            "{\"Increment\":0}",
            "{\"Branch\":{\"register\":0,\"if_zero\":7,\"if_nonzero\":0}}",
        );
        assert_ne!(tampered, json);

        let error = serde_json::from_str::<Program>(&tampered).expect_err("out-of-range jump");
        assert!(error.to_string().contains("label 8"));
    }

    #[test]
    fn deserialization_rejects_maximal_jump_target() {
        let json = format!(
            "[{{\"Branch\":{{\"register\":0,\"if_zero\":{},\"if_nonzero\":0}}}}]",
            usize::MAX
        );

        let error = serde_json::from_str::<Program>(&json).expect_err("target past stop");
        assert!(error.to_string().contains(&format!("label {}", usize::MAX)));
    }

    #[test]
    fn final_state_round_trips_through_json() {
        let program = Program::new(vec![Instruction::Assign(RegisterId(1), 4)]).expect("valid");
        let (state, _) = run_program(&program, &MachineConfig::default());

        let json = serde_json::to_string(&state).expect("state serializes");
        let restored: MachineState = serde_json::from_str(&json).expect("state deserializes");

        assert_eq!(restored, state);
        assert_eq!(restored.register(RegisterId(1)), 4);
    }
}
