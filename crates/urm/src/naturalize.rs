//! Variable naturalization: symbolic register names to dense ids.
//!
//! Ids are handed out in first-seen order starting at 0, so the k-th distinct
//! name in a program always becomes `RegisterId(k - 1)`. The same order is
//! used for the final register report.

use std::collections::HashMap;

use urm_core::RegisterId;

/// First character of every strict-mode variable name.
pub const VARIABLE_SIGIL: char = 'X';

/// Character repeated after the sigil to encode the register's ordinal.
pub const VARIABLE_MARKER: char = '1';

/// Which tokens may name a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariableMode {
    /// `X` followed by one or more `1`s, nothing else.
    #[default]
    Strict,
    /// Any token, taken verbatim.
    Permissive,
}

impl VariableMode {
    /// Returns true if `token` is an acceptable variable name in this mode.
    #[must_use]
    pub fn accepts(self, token: &str) -> bool {
        match self {
            Self::Strict => is_strict_variable(token),
            Self::Permissive => true,
        }
    }
}

/// Checks the sigil/marker grammar (`X1`, `X11`, `X111`, ...).
#[must_use]
pub fn is_strict_variable(token: &str) -> bool {
    token
        .strip_prefix(VARIABLE_SIGIL)
        .is_some_and(|markers| {
            !markers.is_empty() && markers.chars().all(|c| c == VARIABLE_MARKER)
        })
}

/// Mapping from variable name to [`RegisterId`], in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    names: Vec<String>,
    ids: HashMap<String, RegisterId>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `token`, assigning the next unused id if the name
    /// is new.
    ///
    /// Returns `None` without touching the table when `mode` rejects the
    /// token.
    pub fn naturalize(&mut self, token: &str, mode: VariableMode) -> Option<RegisterId> {
        if !mode.accepts(token) {
            return None;
        }
        if let Some(&id) = self.ids.get(token) {
            return Some(id);
        }

        let id = RegisterId(self.names.len());
        self.names.push(token.to_string());
        self.ids.insert(token.to_string(), id);
        Some(id)
    }

    /// Returns the id already assigned to `token`, without inserting.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<RegisterId> {
        self.ids.get(token).copied()
    }

    /// Name that was assigned `id`.
    #[must_use]
    pub fn name(&self, id: RegisterId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Number of distinct variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true when no variable has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(name, id)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RegisterId)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.as_str(), RegisterId(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_grammar_requires_sigil_and_markers() {
        assert!(is_strict_variable("X1"));
        assert!(is_strict_variable("X1111"));
        assert!(!is_strict_variable("X"));
        assert!(!is_strict_variable("X12"));
        assert!(!is_strict_variable("x1"));
        assert!(!is_strict_variable("Y1"));
        assert!(!is_strict_variable("X1a"));
        assert!(!is_strict_variable(""));
    }

    #[test]
    fn ids_follow_first_seen_order() {
        let mut table = VariableTable::new();
        assert_eq!(table.naturalize("X111", VariableMode::Strict), Some(RegisterId(0)));
        assert_eq!(table.naturalize("X1", VariableMode::Strict), Some(RegisterId(1)));
        assert_eq!(table.naturalize("X111", VariableMode::Strict), Some(RegisterId(0)));
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![("X111", RegisterId(0)), ("X1", RegisterId(1))]
        );
    }

    #[test]
    fn strict_rejection_leaves_table_untouched() {
        let mut table = VariableTable::new();
        assert_eq!(table.naturalize("X2", VariableMode::Strict), None);
        assert!(table.is_empty());
    }

    #[test]
    fn permissive_mode_accepts_any_token_verbatim() {
        let mut table = VariableTable::new();
        assert_eq!(
            table.naturalize("counter", VariableMode::Permissive),
            Some(RegisterId(0))
        );
        assert_eq!(table.naturalize("X2", VariableMode::Permissive), Some(RegisterId(1)));
        assert_eq!(table.name(RegisterId(0)), Some("counter"));
    }

    #[test]
    fn lookup_never_inserts() {
        let mut table = VariableTable::new();
        table.naturalize("X1", VariableMode::Strict);
        assert_eq!(table.lookup("X1"), Some(RegisterId(0)));
        assert_eq!(table.lookup("X11"), None);
        assert_eq!(table.len(), 1);
    }
}
