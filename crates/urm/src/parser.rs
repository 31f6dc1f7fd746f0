//! Record parser for program text.
//!
//! A program is a sequence of records `<label>: <body>`, labels counting up
//! from 1, ending with a `stop` record:
//!
//! ```text
//! 1: X1 <- 3
//! 2: if X1 = 0 goto 5 else goto 3
//! 3: X1 <- X1 - 1
//! 4: if X11 = 0 goto 2 else goto 2
//! 5: stop
//! ```
//!
//! Each record is checked strictly in order and the first failure aborts the
//! whole parse.

use urm_core::{Instruction, Natural, Program, RegisterId};

use crate::errors::{ParseError, ParseErrorKind, ParseWarning, SourceLocation};
use crate::naturalize::{VariableMode, VariableTable};
use crate::scanner::{IntegerRead, Scanner};
use crate::validate::{validate_program, JumpReference, JumpTracker};

/// Front-end settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Which tokens may name variables.
    pub variable_mode: VariableMode,
}

/// Outcome of reading one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedRecord {
    /// An executable instruction.
    Instruction(Instruction),
    /// The `stop` record; no further records are read.
    EndOfProgram,
}

/// A validated program with its variable names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProgram {
    /// The executable instruction sequence.
    pub program: Program,
    /// Variable names in first-seen order.
    pub variables: VariableTable,
    /// Non-fatal findings.
    pub warnings: Vec<ParseWarning>,
}

/// Parses and validates a complete program.
///
/// # Errors
///
/// Returns the first syntax error, or [`ParseErrorKind::OutOfRangeJump`] if
/// a branch jumps past the `stop` record.
pub fn parse_program(text: &str, options: &ParseOptions) -> Result<ParsedProgram, ParseError> {
    let mut scanner = Scanner::new(text);
    let mut variables = VariableTable::new();
    let mut jumps = JumpTracker::new();
    let mut instructions = Vec::new();

    loop {
        let label = instructions.len() + 1;
        match parse_record(&mut scanner, label, &mut variables, &mut jumps, options)? {
            ParsedRecord::Instruction(instruction) => instructions.push(instruction),
            ParsedRecord::EndOfProgram => break,
        }
    }

    let mut warnings = Vec::new();
    if !scanner.is_exhausted() {
        warnings.push(ParseWarning::TrailingInput {
            location: scanner.location(),
        });
    }

    let program = validate_program(instructions, &jumps)?;
    Ok(ParsedProgram {
        program,
        variables,
        warnings,
    })
}

/// Reads one record whose label must be `expected_label`.
///
/// Variables are naturalized into `variables` as they are read, and branch
/// labels are recorded in `jumps` for [`validate_program`].
///
/// # Errors
///
/// Returns a [`ParseError`] tagged with `expected_label` on any deviation
/// from the record grammar.
pub fn parse_record(
    scanner: &mut Scanner<'_>,
    expected_label: usize,
    variables: &mut VariableTable,
    jumps: &mut JumpTracker,
    options: &ParseOptions,
) -> Result<ParsedRecord, ParseError> {
    let mut record = RecordParser {
        scanner,
        variables,
        label: expected_label,
        mode: options.variable_mode,
    };

    record.expect_label()?;
    record.expect_separator(':')?;

    let (location, keyword) = record.token()?;
    match keyword {
        "stop" => Ok(ParsedRecord::EndOfProgram),
        "if" => record.branch(jumps).map(ParsedRecord::Instruction),
        target => record
            .assignment(target, location)
            .map(ParsedRecord::Instruction),
    }
}

struct RecordParser<'r, 'a> {
    scanner: &'r mut Scanner<'a>,
    variables: &'r mut VariableTable,
    label: usize,
    mode: VariableMode,
}

impl<'a> RecordParser<'_, 'a> {
    const fn error(&self, location: SourceLocation, kind: ParseErrorKind) -> ParseError {
        ParseError {
            label: self.label,
            location,
            kind,
        }
    }

    fn end_of_input(&mut self) -> ParseError {
        let location = self.scanner.location();
        self.error(location, ParseErrorKind::UnexpectedEndOfInput)
    }

    fn token(&mut self) -> Result<(SourceLocation, &'a str), ParseError> {
        let location = self.scanner.mark();
        match self.scanner.read_token() {
            Some(token) => Ok((location, token)),
            None => Err(self.end_of_input()),
        }
    }

    fn expect_label(&mut self) -> Result<(), ParseError> {
        let location = self.scanner.mark();
        let found = match self.scanner.read_integer() {
            IntegerRead::Value(label) if usize::try_from(label) == Ok(self.label) => return Ok(()),
            IntegerRead::Value(label) => label.to_string(),
            IntegerRead::Malformed(text) => text,
            IntegerRead::End => return Err(self.end_of_input()),
        };
        Err(self.error(
            location,
            ParseErrorKind::LabelMismatch {
                expected: self.label,
                found,
            },
        ))
    }

    fn expect_separator(&mut self, expected: char) -> Result<(), ParseError> {
        let location = self.scanner.mark();
        match self.scanner.expect_char(expected) {
            Ok(()) => Ok(()),
            Err(Some(found)) => Err(self.error(
                location,
                ParseErrorKind::MissingSeparator { expected, found },
            )),
            Err(None) => Err(self.end_of_input()),
        }
    }

    fn expect_keyword(&mut self, expected: &'static str) -> Result<(), ParseError> {
        let (location, found) = self.token()?;
        if found == expected {
            Ok(())
        } else {
            Err(self.error(
                location,
                ParseErrorKind::MalformedKeyword {
                    expected,
                    found: found.to_string(),
                },
            ))
        }
    }

    fn variable(&mut self, token: &str, location: SourceLocation) -> Result<RegisterId, ParseError> {
        self.variables.naturalize(token, self.mode).ok_or_else(|| {
            self.error(
                location,
                ParseErrorKind::InvalidVariableSyntax(token.to_string()),
            )
        })
    }

    fn jump_label(&mut self) -> Result<JumpReference, ParseError> {
        let location = self.scanner.mark();
        let text = match self.scanner.read_integer() {
            IntegerRead::Value(label) => match usize::try_from(label) {
                Ok(label) if label >= 1 => {
                    return Ok(JumpReference {
                        label,
                        at_label: self.label,
                        location,
                    })
                }
                _ => label.to_string(),
            },
            IntegerRead::Malformed(text) => text,
            IntegerRead::End => return Err(self.end_of_input()),
        };
        Err(self.error(location, ParseErrorKind::InvalidJumpLabel(text)))
    }

    /// `if <var> = 0 goto <label> else goto <label>`, after the `if`.
    fn branch(&mut self, jumps: &mut JumpTracker) -> Result<Instruction, ParseError> {
        let (location, token) = self.token()?;
        let register = self.variable(token, location)?;

        self.expect_separator('=')?;
        self.expect_separator('0')?;
        self.expect_keyword("goto")?;
        let if_zero = self.jump_label()?;
        self.expect_keyword("else")?;
        self.expect_keyword("goto")?;
        let if_nonzero = self.jump_label()?;

        jumps.record(if_zero);
        jumps.record(if_nonzero);

        Ok(Instruction::Branch {
            register,
            if_zero: if_zero.label - 1,
            if_nonzero: if_nonzero.label - 1,
        })
    }

    /// `<var> <- <var> + 1`, `<var> <- <var> - 1` or `<var> <- <constant>`.
    fn assignment(
        &mut self,
        target: &str,
        location: SourceLocation,
    ) -> Result<Instruction, ParseError> {
        let register = self.variable(target, location)?;

        self.expect_separator('<')?;
        self.expect_separator('-')?;

        let (location, source) = self.token()?;
        if self.variables.lookup(source) == Some(register) {
            let (location, operator) = self.token()?;
            let instruction = match operator {
                "+" => Instruction::Increment(register),
                "-" => Instruction::Decrement(register),
                other => {
                    return Err(self.error(
                        location,
                        ParseErrorKind::UnexpectedOperator(other.to_string()),
                    ))
                }
            };
            self.expect_keyword("1")?;
            return Ok(instruction);
        }

        source
            .parse::<Natural>()
            .map(|value| Instruction::Assign(register, value))
            .map_err(|_| {
                self.error(
                    location,
                    ParseErrorKind::InvalidConstant(source.to_string()),
                )
            })
    }
}
