//! Text printed around a run.

use urm_core::MachineState;

use crate::naturalize::VariableTable;

/// Printed once a program has parsed and validated.
pub const SUCCESS_BANNER: &str = "Looks like this is a syntactically correct URM!";

/// First line of the final register report.
pub const REPORT_HEADER: &str = "Values of variables after running program:";

/// Renders [`REPORT_HEADER`] and one `name: value` line per variable, in
/// first-seen order.
#[must_use]
pub fn format_report(variables: &VariableTable, state: &MachineState) -> String {
    let mut lines = vec![REPORT_HEADER.to_string()];
    lines.extend(
        variables
            .iter()
            .map(|(name, id)| format!("{name}: {}", state.register(id))),
    );
    lines.push(String::new());
    lines.join("\n")
}
