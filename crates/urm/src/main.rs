//! CLI entry point for the URM interpreter binary.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber as _;
use urm::logging::{init_logging, LogSink};
use urm::report::{format_report, SUCCESS_BANNER};
use urm::{load_program, ParseOptions, VariableMode};
use urm_core::{run_to_halt, run_traced, MachineConfig, MachineState};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: urm <source> [options]

Runs an Unbounded Register Machine program and prints the final value of
every variable.

Options:
  -m, --meta   Accept any token as a variable name
  -t, --trace  Log every executed instruction to stderr
  -h, --help   Show this help message

Files ending in .md are read as Markdown: only ```urm fenced blocks are
run and everything else is skipped, so a plain program must not use a .md
name. Any other extension is read as plain program text.

Examples:
  urm double.urm
  urm --trace notes/double.urm.md
";

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    input: PathBuf,
    meta: bool,
    trace: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum ParseResult {
    Run(RunArgs),
    Help,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut input: Option<PathBuf> = None;
    let mut meta = false;
    let mut trace = false;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--meta" || arg == "-m" {
            meta = true;
            continue;
        }

        if arg == "--trace" || arg == "-t" {
            trace = true;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        input = Some(PathBuf::from(arg));
    }

    let input = input.ok_or_else(|| "missing input path".to_string())?;
    Ok(ParseResult::Run(RunArgs { input, meta, trace }))
}

fn run(args: &RunArgs) -> Result<(), i32> {
    let options = ParseOptions {
        variable_mode: if args.meta {
            VariableMode::Permissive
        } else {
            VariableMode::Strict
        },
    };

    let parsed = match load_program(&args.input, &options) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e.format_for_stderr());
            return Err(1);
        }
    };

    println!("{SUCCESS_BANNER}");

    let config = MachineConfig {
        tracing_enabled: args.trace,
        ..MachineConfig::default()
    };
    let mut state = MachineState::new(parsed.variables.len());
    let outcome = if args.trace {
        run_traced(
            &mut state,
            &parsed.program,
            &config,
            &mut LogSink::new(&parsed.variables),
        )
    } else {
        run_to_halt(&mut state, &parsed.program, &config)
    };
    info!(steps = outcome.steps, "program halted");

    print!("{}", format_report(&parsed.variables, &state));
    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => {
            init_logging(args.trace);
            match run(&args) {
                Ok(()) => 0,
                Err(code) => code,
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = OsString> {
        list.iter()
            .map(OsString::from)
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_path_alone() {
        let result = parse_args(args(&["prog.urm"])).expect("valid args");
        assert_eq!(
            result,
            ParseResult::Run(RunArgs {
                input: PathBuf::from("prog.urm"),
                meta: false,
                trace: false,
            })
        );
    }

    #[test]
    fn flags_may_come_before_or_after_path() {
        let before = parse_args(args(&["-m", "--trace", "prog.urm"])).expect("valid args");
        let after = parse_args(args(&["prog.urm", "--meta", "-t"])).expect("valid args");

        let expected = ParseResult::Run(RunArgs {
            input: PathBuf::from("prog.urm"),
            meta: true,
            trace: true,
        });
        assert_eq!(before, expected);
        assert_eq!(after, expected);
    }

    #[test]
    fn options_are_checked_in_order() {
        let result = parse_args(args(&["prog.urm", "--bogus", "-h"]));
        assert_eq!(result, Err("unknown option: --bogus".to_string()));

        let result = parse_args(args(&["--help", "--bogus"])).expect("help parses");
        assert_eq!(result, ParseResult::Help);
    }

    #[test]
    fn rejects_missing_path() {
        let error = parse_args(args(&["--meta"])).expect_err("path required");
        assert!(error.contains("missing input"));
    }

    #[test]
    fn rejects_two_paths() {
        let error = parse_args(args(&["a.urm", "b.urm"])).expect_err("one path only");
        assert!(error.contains("multiple input paths"));
    }

    #[test]
    fn usage_warns_about_markdown_names() {
        assert!(USAGE_TEXT.contains("a plain program must not use a .md\nname"));
    }

    #[test]
    fn rejects_unknown_option() {
        let error = parse_args(args(&["--verbose", "a.urm"])).expect_err("unknown flag");
        assert_eq!(error, "unknown option: --verbose");
    }
}
