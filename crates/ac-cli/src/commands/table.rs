//! Table command: every activity, one row each.

use std::io::Write;

use ac_sheets::RowSource;
use anyhow::Result;

use crate::commands::util::fetch_once;
use crate::render::Table;
use crate::render::text::format_table;

/// Runs the table command.
pub fn run<W: Write>(writer: &mut W, source: &dyn RowSource) -> Result<()> {
    let snapshot = fetch_once(source)?;
    let table = Table::from_records(&snapshot.records);
    write!(writer, "{}", format_table(&table))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{ScriptedSource, row};

    #[test]
    fn table_includes_unclassified_rows() {
        let source = ScriptedSource::new(vec![Ok(vec![
            row(&[("Key", "Main"), ("Code", "A1"), ("Actual End", "01/01/2025 10:00:00")]),
            row(&[("Key", "Briefing"), ("Code", "Z9"), ("Actual End", "")]),
        ])]);

        let mut output = Vec::new();
        run(&mut output, &source).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("1  Main      A1"));
        assert!(output.contains("2  Briefing  Z9"));
        assert!(!output.contains("Actual End"));
    }
}
