mod format;
mod json;
mod table;

pub(crate) use json::{output_roster_json, output_summary_json};
pub(crate) use table::{print_roster_table, print_run_table};
