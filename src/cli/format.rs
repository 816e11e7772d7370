//! Output formatting for CLI display.

use orgchart::{ActionRecord, Employee, EmployeeId, History, OrgApp, OrgNode};

use super::OutputFormat;

/// Render a tree in the requested format.
pub(super) fn render_tree(root: &OrgNode, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(format_tree(root)),
        OutputFormat::Json => serde_json::to_string_pretty(root)
            .map_err(|e| format!("failed to serialize tree: {e}")),
    }
}

/// Indented `name (#id)` lines, two spaces per level.
pub(super) fn format_tree(root: &OrgNode) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!(
            "{:indent$}{} ({})",
            "",
            node.name,
            node.id,
            indent = depth * 2
        ));
        stack.extend(node.subordinates.iter().rev().map(|child| (child, depth + 1)));
    }
    out
}

pub(super) fn format_employee(employee: &Employee) -> String {
    format!("{} ({})", employee.name, employee.id)
}

fn display_name(app: &OrgApp, id: EmployeeId) -> String {
    app.employee(id)
        .map_or_else(|_| id.to_string(), format_employee)
}

/// One line describing an applied move.
pub(super) fn describe_move(app: &OrgApp, record: &ActionRecord) -> String {
    let plan = &record.plan;
    let mut line = format!(
        "moved {} from {} to {}",
        display_name(app, plan.employee),
        display_name(app, plan.from),
        display_name(app, plan.to),
    );
    match plan.promoted.len() {
        0 => {}
        1 => line.push_str("; 1 report moved up"),
        n => line.push_str(&format!("; {n} reports moved up")),
    }
    line
}

/// History entries, oldest first, with the cursor marked by `>`.
pub(super) fn format_history(history: &History) -> String {
    history
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let marker = if index == history.cursor() { '>' } else { ' ' };
            format!(
                "{marker} {index:>3}  {:<12} {}",
                entry.label.to_string(),
                entry.recorded_at
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
