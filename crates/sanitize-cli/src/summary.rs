use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use sanitize_model::MapRecord;
use sanitize_transform::{BuiltinTransform, ModelConfig, TransformSpec};

use crate::batch::BatchOutcome;

/// One row of the chain table: attribute, position, transform, resolved kind.
pub fn chain_rows(config: &ModelConfig<MapRecord>) -> Vec<[String; 4]> {
    let mut rows = Vec::new();
    for attribute in config.attributes() {
        for (position, step) in attribute.transforms().iter().enumerate() {
            rows.push([
                attribute.attribute().to_string(),
                (position + 1).to_string(),
                step.name.clone(),
                describe(&step.spec),
            ]);
        }
    }
    if let Some(whole) = config.record_transform() {
        rows.push([
            "(record)".to_string(),
            "-".to_string(),
            whole.name.clone(),
            "record transform".to_string(),
        ]);
    }
    rows
}

fn describe(spec: &TransformSpec<MapRecord>) -> String {
    match spec {
        TransformSpec::Builtin(BuiltinTransform::Case(style)) => format!("case {}", style.name()),
        TransformSpec::Builtin(builtin) => format!("built-in {}", builtin.kind()),
        TransformSpec::Custom(_) => "custom".to_string(),
    }
}

pub fn chain_table(config: &ModelConfig<MapRecord>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute"),
        header_cell("#"),
        header_cell("Transform"),
        header_cell("Resolved"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in chain_rows(config) {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    table
}

pub fn print_chains(config: &ModelConfig<MapRecord>) {
    println!("Model: {}", config.model_name());
    println!("Trigger: {}", config.trigger());
    if !config.is_provisioned() {
        println!("Storage not provisioned: configuration skipped");
    }
    println!("{}", chain_table(config));
}

pub fn summary_table(outcome: &BatchOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Attributes"),
        header_cell("Changed"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut reports = outcome.reports.iter();
    let mut failures = outcome.failures.iter().peekable();
    for index in 0..outcome.records.len() {
        if let Some(failure) = failures.next_if(|failure| failure.index == index) {
            table.add_row(vec![
                Cell::new(index),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new(format!("failed ({})", failure.stage))
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
            ]);
            continue;
        }
        let Some(report) = reports.next() else {
            break;
        };
        let status = if report.skipped {
            dim_cell("skipped")
        } else {
            Cell::new("ok").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(index),
            Cell::new(report.attributes.len()),
            count_cell(report.changed_count()),
            status,
        ]);
    }
    table
}

pub fn print_summary(outcome: &BatchOutcome) {
    println!("Model: {}", outcome.model);
    println!("{}", summary_table(outcome));
    println!(
        "{} records, {} changed, {} failed",
        outcome.records.len(),
        outcome.changed_records(),
        outcome.failures.len()
    );
    if outcome.has_failures() {
        eprintln!("Errors:");
        for failure in &outcome.failures {
            eprintln!("- record {}: {}", failure.index, failure.message);
        }
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
