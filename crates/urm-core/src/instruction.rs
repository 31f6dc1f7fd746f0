//! Closed instruction set of the register machine.
//!
//! Source text addresses instructions with 1-based labels; everything in
//! this module is 0-based. [`Instruction`]'s `Display` impl converts back to
//! labels so traces read like the program that produced them.

use std::fmt;

/// Value held by a single register.
pub type Natural = u64;

/// Dense zero-based register identifier assigned in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterId(pub usize);

impl RegisterId {
    /// Returns the register-file index for this identifier.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// One executable instruction.
///
/// The `stop` record is not an instruction: it only marks where the parsed
/// sequence ends, and reaching that index is how execution halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instruction {
    /// `x <- x + 1`, saturating at the configured cap.
    Increment(RegisterId),
    /// `x <- x - 1`, floored at zero.
    Decrement(RegisterId),
    /// `x <- k`.
    Assign(RegisterId, Natural),
    /// `if x = 0 goto X else goto Y`.
    Branch {
        /// Register tested against zero.
        register: RegisterId,
        /// 0-based instruction index taken when the register is zero.
        if_zero: usize,
        /// 0-based instruction index taken otherwise.
        if_nonzero: usize,
    },
}

impl Instruction {
    /// Returns the register this instruction reads or writes.
    #[must_use]
    pub const fn register(&self) -> RegisterId {
        match *self {
            Self::Increment(register)
            | Self::Decrement(register)
            | Self::Assign(register, _)
            | Self::Branch { register, .. } => register,
        }
    }

    /// Returns `(if_zero, if_nonzero)` for branches.
    #[must_use]
    pub const fn branch_targets(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Branch {
                if_zero,
                if_nonzero,
                ..
            } => Some((if_zero, if_nonzero)),
            Self::Increment(_) | Self::Decrement(_) | Self::Assign(..) => None,
        }
    }
}

impl Instruction {
    /// Renders the instruction with registers named by `name`.
    ///
    /// `Display` on [`Instruction`] itself uses [`RegisterId`]'s `r<n>` form.
    #[must_use]
    pub const fn display_with<F>(&self, name: F) -> InstructionDisplay<'_, F> {
        InstructionDisplay {
            instruction: self,
            name,
        }
    }

    fn write_with<D: fmt::Display>(
        &self,
        f: &mut fmt::Formatter<'_>,
        name: impl Fn(RegisterId) -> D,
    ) -> fmt::Result {
        match *self {
            Self::Increment(r) => write!(f, "{0} <- {0} + 1", name(r)),
            Self::Decrement(r) => write!(f, "{0} <- {0} - 1", name(r)),
            Self::Assign(r, value) => write!(f, "{} <- {value}", name(r)),
            Self::Branch {
                register,
                if_zero,
                if_nonzero,
            } => write!(
                f,
                "if {} = 0 goto {} else goto {}",
                name(register),
                if_zero.saturating_add(1),
                if_nonzero.saturating_add(1)
            ),
        }
    }
}

/// Source-style rendering returned by [`Instruction::display_with`].
pub struct InstructionDisplay<'a, F> {
    instruction: &'a Instruction,
    name: F,
}

impl<F, D> fmt::Display for InstructionDisplay<'_, F>
where
    F: Fn(RegisterId) -> D,
    D: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.instruction.write_with(f, &self.name)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |r| r)
    }
}
