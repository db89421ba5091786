use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sconv_core::{MappingReport, MappingWarning};

/// One registered rule set, for `sconv rules`.
pub struct RuleSummary {
    pub source: String,
    pub target: String,
    pub rules: usize,
}

pub fn print_warnings(report: &MappingReport) {
    if report.is_clean() {
        eprintln!("All fields mapped.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Field"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    for warning in report.warnings() {
        table.add_row(vec![
            kind_cell(warning),
            Cell::new(warning.field().unwrap_or("-")),
            Cell::new(warning.to_string()),
        ]);
    }
    eprintln!("Warnings:");
    eprintln!("{table}");
}

pub fn print_rules(summaries: &[RuleSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Rules"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut total = 0usize;
    for summary in summaries {
        total += summary.rules;
        table.add_row(vec![
            Cell::new(&summary.source).fg(Color::Blue),
            Cell::new(&summary.target).fg(Color::Blue),
            Cell::new(summary.rules),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_cell(warning: &MappingWarning) -> Cell {
    match warning {
        MappingWarning::NoMapping { .. } => Cell::new("UNMAPPED").fg(Color::Yellow),
        MappingWarning::IncompatibleTypes { .. } => Cell::new("INCOMPATIBLE")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        MappingWarning::ZeroValueArgument { .. } => Cell::new("DEFAULT ARG").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
