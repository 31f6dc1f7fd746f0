//! Parser and command-line front end for Unbounded Register Machine
//! programs.
//!
//! Program text is read record by record with a [`scanner::Scanner`],
//! variables are numbered by a [`naturalize::VariableTable`], and the
//! result is validated into a [`urm_core::Program`] ready to run.

#[cfg(test)]
use proptest as _;

/// Structured parse errors and warnings.
pub mod errors;
/// File reading and diagnostic location mapping.
pub mod loader;
/// Subscriber setup and the tracing trace sink.
pub mod logging;
/// Variable naming rules and id assignment.
pub mod naturalize;
/// Record and program parsing.
pub mod parser;
/// Final register report.
pub mod report;
/// Whitespace-insensitive character scanner.
pub mod scanner;
/// Plain and literate Markdown source extraction.
pub mod source;
/// Jump-label bounds checking.
pub mod validate;

pub use errors::{ParseError, ParseErrorKind, ParseWarning, SourceLocation};
pub use loader::{load_program, LoadError, LoadErrorKind};
pub use naturalize::{VariableMode, VariableTable};
pub use parser::{parse_program, parse_record, ParseOptions, ParsedProgram, ParsedRecord};
