use comfy_table::{
    Attribute, Cell, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::app::{Outcome, RunSummary};
use crate::record::RecordStatus;

/// Short status text and color for an entry outcome
pub(super) fn outcome_label(outcome: &Outcome) -> (&'static str, Color) {
    match outcome {
        Outcome::Processed { .. } => ("saved", Color::Green),
        Outcome::Skipped => ("skipped", Color::DarkGrey),
        Outcome::Failed(_) => ("failed", Color::Red),
    }
}

pub(super) fn record_label(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Processed {
            record: RecordStatus::Updated { .. },
        } => "updated".to_string(),
        Outcome::Processed {
            record: RecordStatus::Missing,
        } => "no record".to_string(),
        Outcome::Processed {
            record: RecordStatus::Failed(message),
        } => format!("error: {message}"),
        Outcome::Skipped => String::new(),
        Outcome::Failed(reason) => reason.to_string(),
    }
}

/// The closing line printed after every run
pub(super) fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Done! Processed: {}, Skipped: {}, Failed: {}",
        summary.processed, summary.skipped, summary.failed
    )
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}
