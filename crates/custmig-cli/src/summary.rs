use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use custmig_model::MigrationSummary;

/// Printed when the source produced no candidates.
pub const NO_CUSTOMERS_MESSAGE: &str = "There are no customers in the csv file";

/// Printed after a completed run.
pub const FINISHED_MESSAGE: &str = "Customers migration was finished";

pub fn print_summary(summary: &MigrationSummary) {
    println!("{}", summary_table(summary));
    if let Some(path) = &summary.report_path {
        println!("Error report: {}", path.display());
    }
    if let Some(table) = reason_table(summary) {
        println!();
        println!("Failures:");
        println!("{table}");
    }
}

/// Row counts per outcome.
pub fn summary_table(summary: &MigrationSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Stored"),
        count_cell(summary.stored, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Skipped (duplicate email)"),
        count_cell(summary.skipped, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Failed"),
        count_cell(summary.failed(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.candidates).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Failure counts grouped by reason; `None` when nothing failed.
pub fn reason_table(summary: &MigrationSummary) -> Option<Table> {
    if summary.failures.is_empty() {
        return None;
    }
    let mut reasons: BTreeMap<&str, usize> = BTreeMap::new();
    for failure in &summary.failures {
        *reasons.entry(failure.message.as_str()).or_default() += 1;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Reason"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (reason, count) in reasons {
        table.add_row(vec![Cell::new(reason), count_cell(count, Color::Red)]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
