use comfy_table::{Cell, Color};

use crate::app::{Outcome, PlannedEntry, RunSummary};
use crate::output::format::{
    create_styled_table, header_cell, outcome_label, record_label, styled_cell, summary_line,
};

/// Per-entry results followed by the summary line.
///
/// Skipped entries are left out of the table; they are only counted.
pub(crate) fn print_run_table(summary: &RunSummary, use_color: bool) {
    let rows: Vec<_> = summary
        .entries
        .iter()
        .filter(|e| !matches!(e.outcome, Outcome::Skipped))
        .collect();

    if !rows.is_empty() {
        let mut table = create_styled_table();
        table.set_header(vec![
            header_cell("Persona", use_color),
            header_cell("File", use_color),
            header_cell("Result", use_color),
            header_cell("Details", use_color),
        ]);
        for entry in rows {
            let (label, color) = outcome_label(&entry.outcome);
            table.add_row(vec![
                Cell::new(entry.name),
                Cell::new(&entry.file),
                styled_cell(label, use_color.then_some(color), false),
                Cell::new(record_label(&entry.outcome)),
            ]);
        }
        println!("{table}");
    }

    println!("\n{}", summary_line(summary));
    if summary.record_errors > 0 {
        println!(
            "{} persona record(s) could not be updated",
            summary.record_errors
        );
    }
}

/// Roster listing for `--list`
pub(crate) fn print_roster_table(plan: &[PlannedEntry], use_color: bool) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", use_color),
        header_cell("Persona", use_color),
        header_cell("Wikipedia title", use_color),
        header_cell("Token", use_color),
        header_cell("File", use_color),
        header_cell("Exists", use_color),
    ]);
    for (i, planned) in plan.iter().enumerate() {
        let exists_color = if planned.exists { Color::Green } else { Color::DarkGrey };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(planned.entry.name),
            Cell::new(planned.entry.title),
            Cell::new(&planned.token),
            Cell::new(planned.file_name()),
            styled_cell(
                if planned.exists { "yes" } else { "no" },
                use_color.then_some(exists_color),
                false,
            ),
        ]);
    }
    println!("{table}");
    println!("\n{} personas", plan.len());
}
