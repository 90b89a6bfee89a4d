use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fips_census::ShapeSummary;
use fips_cli::commands::FetchedTable;
use fips_reconcile::ReconcileReport;

/// Missing identifiers shown per table row.
const FIPS_PER_ROW: usize = 10;

pub fn print_fetch_summary(tables: &[FetchedTable]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("File"),
        header_cell("Variables"),
        header_cell("Fetched"),
        header_cell("Counties"),
        header_cell("Removed"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for fetched in tables {
        table.add_row(vec![
            Cell::new(&fetched.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(fetched.output.path.display()),
            Cell::new(fetched.output.imported_variables.join(", ")),
            Cell::new(fetched.output.rows),
            Cell::new(fetched.shape.rows),
            count_cell(fetched.shape.removed_rows, Color::DarkGrey),
        ]);
    }
    println!("{table}");
}

pub fn print_shape_summary(summary: &ShapeSummary) {
    println!("Shaped: {}", summary.path.display());
    println!(
        "Counties: {} ({} rows removed)",
        summary.rows, summary.removed_rows
    );
}

pub fn print_reconcile_summary(source: &str, report: &ReconcileReport, output: Option<&Path>) {
    println!("Source: {source}");
    if let Some(path) = output {
        println!("Output: {}", path.display());
    }
    println!(
        "Canonical counties: {}, missing from source: {}",
        report.canonical_rows,
        report.missing_count()
    );

    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Nulls")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (column, nulls) in &report.null_counts {
        table.add_row(vec![Cell::new(column), count_cell(*nulls, Color::Yellow)]);
    }
    println!("{table}");

    if report.has_missing() {
        print_missing_table(&report.missing_fips);
    }
}

fn print_missing_table(missing: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Missing FIPS codes")]);
    apply_summary_table_style(&mut table);
    for chunk in missing.chunks(FIPS_PER_ROW) {
        table.add_row(vec![Cell::new(chunk.join(" ")).fg(Color::Red)]);
    }
    println!();
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
