//! Terminal presenter.

use std::fmt::Write;

use super::{Card, Dashboard, Section, TABLE_TITLE, Table, sections};

fn underline(title: &str) -> String {
    "─".repeat(title.chars().count())
}

fn write_section(output: &mut String, section: &Section) {
    let title = section.title.to_uppercase();
    writeln!(output).unwrap();
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", underline(&title)).unwrap();

    if section.cards.is_empty() {
        writeln!(output, "(no activities)").unwrap();
        return;
    }

    for card in &section.cards {
        match card {
            Card::Activity(card) => {
                let label = card.label();
                writeln!(output, "{:<8} {}", card.code, card.activity).unwrap();
                let status_line = format!("         {:<18}{label}", card.countdown);
                writeln!(output, "{}", status_line.trim_end()).unwrap();
                writeln!(
                    output,
                    "         plan {} → {}  actual start {}",
                    card.plan_start, card.plan_end, card.actual_start
                )
                .unwrap();
            }
            Card::Error { message } => {
                writeln!(output, "Error: {message}").unwrap();
            }
        }
    }
}

/// Formats the three card sections for the terminal.
pub fn format_dashboard(dashboard: &Dashboard<'_>) -> String {
    let mut output = String::new();

    let title = dashboard.title.to_uppercase();
    writeln!(output, "{title}").unwrap();
    writeln!(output, "Updated {}", dashboard.generated_at_text()).unwrap();
    if let Some(notice) = &dashboard.notice {
        writeln!(output, "! {notice}").unwrap();
    }

    for section in &sections(&dashboard.buckets) {
        write_section(&mut output, section);
    }

    output
}

/// Formats every activity as an aligned table.
pub fn format_table(table: &Table) -> String {
    let mut output = String::new();
    writeln!(output, "{}", TABLE_TITLE.to_uppercase()).unwrap();

    if table.rows.is_empty() {
        writeln!(output, "(no activities)").unwrap();
        return output;
    }

    let number_width = table.rows.len().to_string().len();
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .map(|(_, cells)| cells[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut line = format!("{:number_width$}", "");
    for (header, width) in table.headers.iter().zip(&widths) {
        write!(line, "  {header:<width$}").unwrap();
    }
    writeln!(output, "{}", line.trim_end()).unwrap();

    for (number, cells) in &table.rows {
        let mut line = format!("{number:>number_width$}");
        for (cell, width) in cells.iter().zip(&widths) {
            write!(line, "  {cell:<width$}").unwrap();
        }
        writeln!(output, "{}", line.trim_end()).unwrap();
    }

    output
}
