//! Structured error reporting for parsing and validation.
//!
//! Every error names the label of the record being read when it occurred,
//! plus a line/column position in the source file:
//! ```text
//! prog.urm:3:9: error: instruction 3: expected '<', found '='
//! ```

use std::fmt;

/// A position in program text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

impl SourceLocation {
    /// The first character of a file.
    pub const START: Self = Self { line: 1, column: 1 };
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Parse or validation failure for a whole program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based label of the record being parsed (for jump validation, the
    /// record holding the offending branch).
    pub label: usize,
    /// Where in the text the problem was found.
    pub location: SourceLocation,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// Classification of parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The record's label is missing or not the next sequential label.
    LabelMismatch {
        /// The label that was required.
        expected: usize,
        /// What was read instead.
        found: String,
    },
    /// A punctuation character (`:`, `<`, `-`, `=`, `0`) was not found after
    /// skipping whitespace.
    MissingSeparator {
        /// The required character.
        expected: char,
        /// The character found instead.
        found: char,
    },
    /// A variable token does not match the strict `X1...1` grammar.
    InvalidVariableSyntax(String),
    /// A literal keyword token (`goto`, `else`, `1`) was not found.
    MalformedKeyword {
        /// The required keyword.
        expected: &'static str,
        /// The token found instead.
        found: String,
    },
    /// Assignment right-hand side is neither the target variable nor a
    /// non-negative integer.
    InvalidConstant(String),
    /// The token after a same-register right-hand side is not `+` or `-`.
    UnexpectedOperator(String),
    /// A branch label is not an integer, or is below 1.
    InvalidJumpLabel(String),
    /// A branch names a label past the `stop` record.
    OutOfRangeJump {
        /// The label jumped to.
        label: usize,
        /// The label of the `stop` record.
        stop_label: usize,
    },
    /// The text ended in the middle of a record or before `stop`.
    UnexpectedEndOfInput,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instruction {}: {}", self.label, self.kind)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelMismatch { expected, found } => {
                write!(f, "expected label {expected}, found '{found}'")
            }
            Self::MissingSeparator { expected, found } => {
                write!(f, "expected '{expected}', found '{found}'")
            }
            Self::InvalidVariableSyntax(token) => write!(
                f,
                "invalid variable '{token}' (expected 'X' followed by one or more '1's)"
            ),
            Self::MalformedKeyword { expected, found } => {
                write!(f, "expected '{expected}', found '{found}'")
            }
            Self::InvalidConstant(token) => write!(f, "invalid variable or constant '{token}'"),
            Self::UnexpectedOperator(token) => {
                write!(f, "expected '+' or '-', found '{token}'")
            }
            Self::InvalidJumpLabel(token) => {
                write!(f, "invalid jump label '{token}' (labels start at 1)")
            }
            Self::OutOfRangeJump { label, stop_label } => write!(
                f,
                "jump to label {label} exceeds the stop instruction at label {stop_label}"
            ),
            Self::UnexpectedEndOfInput => write!(f, "unexpected end of input (missing 'stop'?)"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Non-fatal findings reported alongside a successfully parsed program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseWarning {
    /// Text after the `stop` record, which is never read.
    TrailingInput {
        /// Start of the ignored text.
        location: SourceLocation,
    },
}

impl ParseWarning {
    /// Position the warning refers to.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        match self {
            Self::TrailingInput { location } => *location,
        }
    }

    pub(crate) fn with_location(self, location: SourceLocation) -> Self {
        match self {
            Self::TrailingInput { .. } => Self::TrailingInput { location },
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrailingInput { location } => {
                write!(f, "{location}: text after 'stop' is ignored")
            }
        }
    }
}
