//! Reading programs from disk.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{ParseError, SourceLocation};
use crate::parser::{parse_program, ParseOptions, ParsedProgram};
use crate::source::{extract_source, SourceContent};

/// Failure to load a program file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    /// What went wrong.
    pub kind: LoadErrorKind,
    /// The file being loaded.
    pub file: String,
}

/// Classification of load failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The file could not be read.
    Io(String),
    /// The program text was rejected. Locations refer to the original file.
    Parse(ParseError),
}

impl LoadError {
    /// Formats the error as a single diagnostic line.
    #[must_use]
    pub fn format_for_stderr(&self) -> String {
        match &self.kind {
            LoadErrorKind::Io(message) => format!("{}: error: {message}", self.file),
            LoadErrorKind::Parse(error) => {
                format!("{}:{}: error: {error}", self.file, error.location)
            }
        }
    }

    /// The parse error, if the file was read but rejected.
    #[must_use]
    pub const fn parse_error(&self) -> Option<&ParseError> {
        match &self.kind {
            LoadErrorKind::Parse(error) => Some(error),
            LoadErrorKind::Io(_) => None,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LoadErrorKind::Io(message) => write!(f, "{}: I/O error: {message}", self.file),
            LoadErrorKind::Parse(error) => write!(f, "{}:{}: {error}", self.file, error.location),
        }
    }
}

impl std::error::Error for LoadError {}

/// Reads, extracts and parses the program at `path`.
///
/// # Errors
///
/// Returns [`LoadErrorKind::Io`] if the file cannot be read and
/// [`LoadErrorKind::Parse`] if its text is not a valid program.
pub fn load_program(path: &Path, options: &ParseOptions) -> Result<ParsedProgram, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError {
        kind: LoadErrorKind::Io(e.to_string()),
        file: path.display().to_string(),
    })?;

    let source = extract_source(path, &content);
    debug!(
        file = %source.file_path,
        lines = source.lines.len(),
        "extracted program text"
    );

    parse_source(&source, options)
}

/// Parses already extracted text, mapping locations back to the file.
///
/// # Errors
///
/// Returns [`LoadErrorKind::Parse`] if the text is not a valid program.
pub fn parse_source(
    source: &SourceContent,
    options: &ParseOptions,
) -> Result<ParsedProgram, LoadError> {
    let remap = |location: SourceLocation| SourceLocation {
        line: source.original_line(location.line),
        column: location.column,
    };

    let mut parsed = parse_program(&source.text(), options).map_err(|error| LoadError {
        kind: LoadErrorKind::Parse(ParseError {
            location: remap(error.location),
            ..error
        }),
        file: source.file_path.clone(),
    })?;

    for warning in &mut parsed.warnings {
        *warning = warning.with_location(remap(warning.location()));
        warn!(file = %source.file_path, "{warning}");
    }

    debug!(
        instructions = parsed.program.len(),
        variables = parsed.variables.len(),
        "parsed program"
    );
    Ok(parsed)
}
