//! Operations and the line-oriented session loop.

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use orgchart::{EmployeeId, OrgApp};

use super::{
    OutputFormat,
    format::{describe_move, format_employee, format_history, render_tree},
};

/// A state transition requested from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Move {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },
    Undo,
    Redo,
}

impl FromStr for Op {
    type Err = String;

    /// Accepts `move:8:5`, `move 8 5`, `undo` and `redo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ':' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        match parts.as_slice() {
            ["undo"] => Ok(Self::Undo),
            ["redo"] => Ok(Self::Redo),
            ["move", employee, supervisor] => Ok(Self::Move {
                employee: parse_id(employee)?,
                supervisor: parse_id(supervisor)?,
            }),
            ["move", ..] => Err("usage: move <employee-id> <supervisor-id>".to_string()),
            _ => Err(format!("unknown operation '{}'", s.trim())),
        }
    }
}

fn parse_id(raw: &str) -> Result<EmployeeId, String> {
    raw.parse()
        .map_err(|_| format!("'{raw}' is not an employee id"))
}

/// Apply one operation, returning a one-line description of what happened.
pub(super) fn apply(app: &mut OrgApp, op: Op) -> Result<String, String> {
    match op {
        Op::Move {
            employee,
            supervisor,
        } => {
            let record = app
                .move_employee(employee, supervisor)
                .map_err(|e| e.to_string())?;
            Ok(describe_move(app, &record))
        }
        Op::Undo => {
            let changed = app.undo().map_err(|e| e.to_string())?;
            Ok(if changed { "undid last move" } else { "nothing to undo" }.to_string())
        }
        Op::Redo => {
            let changed = app.redo().map_err(|e| e.to_string())?;
            Ok(if changed { "redid move" } else { "nothing to redo" }.to_string())
        }
    }
}

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Op(Op),
    Show,
    History,
    Find(String),
    Help,
    Quit,
}

const SESSION_HELP: &str = "commands: move <employee> <supervisor>, undo, redo, show, history, \
    find <name>, help, quit";

/// Parse a session line. Blank lines and `#` comments yield `None`.
fn parse_line(line: &str) -> Result<Option<Line>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let parsed = match command {
        "show" => Line::Show,
        "history" => Line::History,
        "help" => Line::Help,
        "quit" | "exit" => Line::Quit,
        "find" => {
            let name = rest.trim();
            if name.is_empty() {
                return Err("usage: find <name>".to_string());
            }
            Line::Find(name.to_string())
        }
        _ => Line::Op(line.parse()?),
    };
    Ok(Some(parsed))
}

fn execute(app: &mut OrgApp, line: Line, format: OutputFormat) -> Result<String, String> {
    match line {
        Line::Op(op) => apply(app, op),
        Line::Show => render_tree(&app.current_tree(), format),
        Line::History => Ok(format_history(app.history())),
        Line::Find(name) => {
            let employee = app.find_by_name(&name).map_err(|e| e.to_string())?;
            Ok(format_employee(employee))
        }
        Line::Help => Ok(SESSION_HELP.to_string()),
        Line::Quit => Ok(String::new()),
    }
}

/// Run a session: one command per input line, one reply per command.
///
/// Command errors are written to `out` as `error: ...` and the session goes
/// on. Only I/O failures end it early.
pub(super) fn run(
    app: &mut OrgApp,
    format: OutputFormat,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<(), String> {
    for line in input.lines() {
        let line = line.map_err(|e| format!("failed to read input: {e}"))?;
        let reply = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(Line::Quit)) => break,
            Ok(Some(command)) => execute(app, command, format),
            Err(e) => Err(e),
        };
        let written = match reply {
            Ok(text) => writeln!(out, "{text}"),
            Err(e) => writeln!(out, "error: {e}"),
        };
        written.map_err(|e| format!("failed to write output: {e}"))?;
    }
    Ok(())
}
