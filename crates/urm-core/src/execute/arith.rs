use crate::Natural;

/// Adds one unless `value` has already reached `cap`.
///
/// A value above the cap (only reachable through assignment) is left as is.
#[must_use]
pub const fn saturating_increment(value: Natural, cap: Natural) -> Natural {
    if value < cap {
        value + 1
    } else {
        value
    }
}

/// Subtracts one, flooring at zero.
#[must_use]
pub const fn floored_decrement(value: Natural) -> Natural {
    value.saturating_sub(1)
}
