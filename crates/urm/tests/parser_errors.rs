//! Front-end behavior: error classification, naturalization order and the
//! parse-then-run pipeline.

#![allow(clippy::pedantic, clippy::nursery)]

use proptest::prelude::*;
use rstest::rstest;
use tempfile as _;
use tracing as _;
use tracing_subscriber as _;
use urm::report::format_report;
use urm::{parse_program, ParseErrorKind, ParseOptions, ParsedProgram, VariableMode};
use urm_core::{run_to_halt, MachineConfig, MachineState, RegisterId};

fn parse(text: &str) -> Result<ParsedProgram, urm::ParseError> {
    parse_program(text, &ParseOptions::default())
}

fn run(text: &str) -> String {
    let parsed = parse(text).expect("program should parse");
    let mut state = MachineState::new(parsed.variables.len());
    run_to_halt(&mut state, &parsed.program, &MachineConfig::default());
    format_report(&parsed.variables, &state)
}

#[rstest]
#[case::assign("1: X1 <- 5\n2: stop", "X1: 5\n")]
#[case::round_trip("1: X1 <- 0\n2: X1 <- X1 + 1\n3: X1 <- X1 - 1\n4: stop", "X1: 0\n")]
#[case::decrement_floor("1: X1 <- X1 - 1\n2: stop", "X1: 0\n")]
#[case::countdown(
    "1: X1 <- 3\n2: if X1 = 0 goto 5 else goto 3\n3: X1 <- X1 - 1\n4: if X11 = 0 goto 2 else goto 2\n5: stop",
    "X1: 0\nX11: 0\n"
)]
#[case::branch_to_stop("1: if X1 = 0 goto 2 else goto 1\n2: stop", "X1: 0\n")]
#[case::large_constant("1: X1 <- 18446744073709551615\n2: X1 <- X1 + 1\n3: stop", "X1: 18446744073709551615\n")]
fn programs_run_to_expected_registers(#[case] text: &str, #[case] expected: &str) {
    let report = run(text);
    assert_eq!(
        report.strip_prefix("Values of variables after running program:\n"),
        Some(expected)
    );
}

#[rstest]
#[case::skipped_label("1: X1 <- 1\n3: X1 <- 5\n4: stop", 2)]
#[case::repeated_label("1: X1 <- 1\n1: stop", 2)]
#[case::first_label_not_one("0: stop", 1)]
fn label_mismatch_reports_expected_label(#[case] text: &str, #[case] label: usize) {
    let error = parse(text).expect_err("label out of sequence");
    assert_eq!(error.label, label);
    assert!(matches!(
        error.kind,
        ParseErrorKind::LabelMismatch { expected, .. } if expected == label
    ));
}

#[rstest]
#[case::foreign_register("1: X1 <- X2\n2: stop", "X2")]
#[case::other_variable("1: X11 <- 1\n2: X1 <- X11\n3: stop", "X11")]
#[case::negative("1: X1 <- -1\n2: stop", "-1")]
#[case::overflow("1: X1 <- 18446744073709551616\n2: stop", "18446744073709551616")]
#[case::word("1: X1 <- five\n2: stop", "five")]
fn non_constants_are_invalid(#[case] text: &str, #[case] token: &str) {
    assert_eq!(
        parse(text).expect_err("not a constant").kind,
        ParseErrorKind::InvalidConstant(token.to_string())
    );
}

#[rstest]
#[case::to_stop("1: if X1 = 0 goto 2 else goto 2\n2: stop", true)]
#[case::past_stop("1: if X1 = 0 goto 3 else goto 1\n2: stop", false)]
#[case::far_past_stop(
    "1: X1 <- 1\n2: if X1 = 0 goto 99 else goto 1\n3: X1 <- 0\n4: X1 <- 0\n5: stop",
    false
)]
fn jumps_are_bounded_by_stop(#[case] text: &str, #[case] accepted: bool) {
    let result = parse(text);
    assert_eq!(result.is_ok(), accepted, "{result:?}");
    if let Err(error) = result {
        assert!(matches!(error.kind, ParseErrorKind::OutOfRangeJump { .. }));
    }
}

#[test]
fn meta_mode_changes_only_name_checks() {
    let options = ParseOptions {
        variable_mode: VariableMode::Permissive,
    };
    let parsed = parse_program("1: n <- 1\n2: if n = 0 goto 3 else goto 3\n3: stop", &options)
        .expect("permissive names");
    assert_eq!(parsed.variables.lookup("n"), Some(RegisterId(0)));

    let error = parse_program("1: n <- X1 + 1\n2: stop", &options).expect_err("still strict grammar");
    assert_eq!(error.kind, ParseErrorKind::InvalidConstant("X1".into()));
}

fn variable_name() -> impl Strategy<Value = String> {
    (1usize..6).prop_map(|ones| format!("X{}", "1".repeat(ones)))
}

proptest! {
    #[test]
    fn ids_follow_first_occurrence(names in prop::collection::vec(variable_name(), 1..12)) {
        let mut text = String::new();
        for (index, name) in names.iter().enumerate() {
            text.push_str(&format!("{}: {name} <- {index}\n", index + 1));
        }
        text.push_str(&format!("{}: stop\n", names.len() + 1));

        let parsed = parse(&text).expect("generated program is valid");

        let mut first_seen: Vec<&str> = Vec::new();
        for name in &names {
            if !first_seen.contains(&name.as_str()) {
                first_seen.push(name);
            }
        }
        let table: Vec<(&str, RegisterId)> = parsed.variables.iter().collect();
        prop_assert_eq!(table.len(), first_seen.len());
        for (k, (name, id)) in table.into_iter().enumerate() {
            prop_assert_eq!(name, first_seen[k]);
            prop_assert_eq!(id, RegisterId(k));
        }
    }

    #[test]
    fn parsing_is_deterministic(text in "[0-9X1:<\\- +a-z\n]{0,60}") {
        let first = parse(&text);
        let second = parse(&text);
        prop_assert_eq!(first, second);
    }
}
