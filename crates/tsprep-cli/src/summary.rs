//! Terminal summaries of a run report and of a persisted transform state.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tsprep_model::{FileOutcome, RunReport};
use tsprep_persistence::StateFile;

pub fn print_summary(report: &RunReport, dry_run: bool) {
    println!("Input: {}", report.input_dir.display());
    if dry_run {
        println!("Output: (dry run, nothing written)");
    } else {
        println!("Output: {}", report.output_dir.display());
    }
    println!("Features: {}", report.global_features.len());
    if let Some(path) = &report.scaler_fitted_on {
        println!("Scaler fitted on: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Rows in"),
        header_cell("Dropped"),
        header_cell("Rows out"),
        header_cell("Classes"),
        header_cell("Detail"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    for outcome in &report.files {
        let name = outcome
            .source()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match outcome {
            FileOutcome::Written(written) => {
                total_in += written.rows_in;
                total_out += written.rows_out;
                let detail = written
                    .output
                    .as_ref()
                    .and_then(|path| path.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new("written")
                        .fg(Color::Green)
                        .add_attribute(Attribute::Bold),
                    Cell::new(written.rows_in),
                    count_cell(written.rows_dropped, Color::Yellow),
                    Cell::new(written.rows_out),
                    Cell::new(written.class_counts.len()),
                    dim_cell(detail),
                ]);
            }
            FileOutcome::Skipped { stage, reason, .. } => {
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(format!("skipped ({stage})"))
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new(reason),
                ]);
            }
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} written, {} skipped",
            report.written_count(),
            report.skipped_count()
        ))
        .add_attribute(Attribute::Bold),
        Cell::new(total_in).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_out).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    if !report.unreadable.is_empty() {
        eprintln!("Excluded from the feature set (unreadable):");
        for path in &report.unreadable {
            eprintln!("- {}", path.display());
        }
    }
}

pub fn print_state(state: &StateFile) {
    println!("Created: {}", state.created_at);
    println!(
        "Policies: scaler {:?}, encoder {:?}",
        state.policies.scaler, state.policies.encoder
    );
    if let Some(source) = &state.scaler_fitted_on {
        println!(
            "Scaler fitted on: {} ({} bytes, sha256 {})",
            source.file_name, source.file_size, source.sha256
        );
    }

    let mut scaler_table = Table::new();
    scaler_table.set_header(vec![
        header_cell("Feature"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut scaler_table);
    align_column(&mut scaler_table, 1, CellAlignment::Right);
    align_column(&mut scaler_table, 2, CellAlignment::Right);
    match &state.scaler {
        Some(scaler) => {
            for ((feature, min), max) in scaler
                .features
                .iter()
                .zip(&scaler.data_min)
                .zip(&scaler.data_max)
            {
                scaler_table.add_row(vec![
                    Cell::new(feature),
                    Cell::new(min),
                    Cell::new(max),
                ]);
            }
        }
        None => {
            scaler_table.add_row(vec![dim_cell("(not fitted)"), dim_cell("-"), dim_cell("-")]);
        }
    }
    println!();
    println!("Scaler:");
    println!("{scaler_table}");

    let mut encoder_table = Table::new();
    encoder_table.set_header(vec![
        header_cell("Column"),
        header_cell("Code"),
        header_cell("Class"),
    ]);
    apply_table_style(&mut encoder_table);
    align_column(&mut encoder_table, 1, CellAlignment::Right);
    for (column, encoder) in &state.encoders {
        for (code, class) in encoder.classes.iter().enumerate() {
            let class_cell = if class.is_empty() {
                dim_cell("(empty)")
            } else {
                Cell::new(class)
            };
            encoder_table.add_row(vec![Cell::new(column), Cell::new(code), class_cell]);
        }
    }
    println!();
    println!("Encoders:");
    println!("{encoder_table}");
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
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
