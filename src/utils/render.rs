use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::object::Segment;
use tabled::settings::{Modify, Style, Width};
use tabled::{Table, Tabled};

/// Status color for stack summaries: failures beat rollbacks beat
/// in-progress, everything else counts as healthy.
pub fn color_stack_status(status: &str) -> String {
    if status.contains("FAILED") {
        status.red().to_string()
    } else if status.contains("ROLLBACK") {
        status.yellow().to_string()
    } else if status.contains("IN_PROGRESS") {
        status.blue().to_string()
    } else {
        status.green().to_string()
    }
}

/// Status color for per-resource events.
pub fn color_resource_status(status: &str) -> String {
    if status.contains("PROGRESS") {
        status.blue().to_string()
    } else if status.contains("FAIL") {
        status.red().to_string()
    } else {
        status.green().to_string()
    }
}

pub fn print_table<T: Tabled>(title: &str, rows: Vec<T>, wrap: usize) {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    if wrap > 0 {
        table.with(Modify::new(Segment::all()).with(Width::wrap(wrap)));
    }
    println!("{}", title);
    println!("{}", table);
}

/// Headerless two-column table, used for the stack detail view.
pub fn print_pairs(title: &str, rows: Vec<(String, String)>, wrap: usize) {
    let mut builder = Builder::default();
    for (key, value) in rows {
        builder.push_record([key.bold().to_string(), value]);
    }
    let mut table = builder.build();
    table.with(Style::modern());
    if wrap > 0 {
        table.with(Modify::new(Segment::all()).with(Width::wrap(wrap)));
    }
    println!("{}", title);
    println!("{}", table);
}
