//! CSV rendering of the goal list.
//!
//! Every data field is double-quoted and embedded quotes are doubled, so
//! commas, quotes and newlines in goal text survive a spreadsheet import.

use super::goal::Goal;

pub const CSV_HEADER: &str = "Goal,Status";

pub fn goals_to_csv(goals: &[Goal]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + goals.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for goal in goals {
        let status = if goal.done { "Done" } else { "Pending" };
        out.push_str(&quote(&goal.text));
        out.push(',');
        out.push_str(&quote(status));
        out.push('\n');
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
