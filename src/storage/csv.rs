use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::storage::table::{Table, SCHEMA};

/// Writes the table as CSV: a header of the surviving columns, then one row
/// per listing in processing order. Null cells become empty fields.
pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<()> {
    let columns = table.surviving_columns();
    if columns.is_empty() {
        // Nothing survived pruning; leave the file empty rather than
        // emitting a zero-field record.
        return Ok(());
    }

    let mut w = csv::Writer::from_writer(writer);
    w.write_record(columns.iter().map(|&i| SCHEMA[i]))?;

    for row in 0..table.rows() {
        w.write_record(columns.iter().map(|&i| {
            table
                .cell(i, row)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }))?;
    }

    w.flush()?;
    Ok(())
}

pub fn export_table(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_table(table, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::models::FieldPair;

    fn render(table: &Table) -> String {
        let mut buf = Vec::new();
        write_table(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn all_null_columns_are_pruned() {
        let mut table = Table::new();
        table.append(&[
            FieldPair::text("Name", "Wohnung A"),
            FieldPair::number("Preis", 250000.0),
        ]);
        table.append(&[FieldPair::text("Name", "Wohnung B")]);

        assert_eq!(
            render(&table),
            "Name,Preis\nWohnung A,250000\nWohnung B,\n"
        );
    }

    #[test]
    fn empty_table_writes_an_empty_file() {
        let table = Table::new();
        assert_eq!(render(&table), "");
    }

    #[test]
    fn row_order_matches_processing_order() {
        let mut table = Table::new();
        for name in ["erste", "zweite", "dritte"] {
            table.append(&[FieldPair::text("Name", name)]);
        }

        assert_eq!(render(&table), "Name\nerste\nzweite\ndritte\n");
    }
}
