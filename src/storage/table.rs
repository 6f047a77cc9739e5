use crate::crawler::models::{FieldPair, FieldValue};

/// The site's known attribute vocabulary. Extraction can return arbitrary
/// label text; only these names become columns, everything else is dropped.
pub const SCHEMA: &[&str] = &[
    "Name",
    "Link",
    "Preis",
    "Fläche(m²)",
    "Zimmer",
    "Straße",
    "Ort",
    "Baujahr",
    "Bezug",
    "Geschoss",
    "Energieausweis",
    "Heizungsart",
    "Energieträger",
    "Haustyp",
    "Aufzug",
    "Küche",
    "Böden",
    "Klima/Belüftung",
    "Stellplatz",
    "möbliert",
    "Wellness",
    "TV",
    "Balkon/Terrasse",
    "Serviceleistungen",
    "Sicherheitstechnik",
    "Ausblick",
    "Wohnungslage",
    "derzeitige Nutzung",
    "Zustand",
    "Fenster",
    "Kommunikation",
    "Sonstiges/Wohnen",
    "Sanitär",
    "Versorgung",
    "Gebäudetyp",
    "Endenergiebedarf",
    "Wesentliche Energieträger",
    "Gültigkeit",
    "Effizienzklasse",
    "Energieausweistyp",
    "Baujahr laut Energieausweis",
    "Endenergieverbrauch",
    "Derzeitige Nutzung",
    "Kategorie",
    "Endenergiebedarf (Wärme)",
    "Endenergieverbrauch (Wärme)",
    "Endenergieverbrauch (Strom)",
    "Endenergiebedarf (Strom)",
    "Geschosse",
    "Warmmiete",
    "Heizkosten",
    "Nebenkosten",
    "Hausgeld",
    "1 Stellplatz",
];

/// Append-only wide table over the fixed schema. Every column holds exactly
/// one slot per appended listing, null where the listing had no such field.
pub struct Table {
    columns: Vec<Vec<Option<FieldValue>>>,
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self {
            columns: vec![Vec::new(); SCHEMA.len()],
            rows: 0,
        }
    }

    /// Appends one listing. For a name duplicated across extraction passes
    /// the last pair wins; names outside the schema are ignored.
    pub fn append(&mut self, pairs: &[FieldPair]) {
        for (column, name) in self.columns.iter_mut().zip(SCHEMA) {
            let value = pairs
                .iter()
                .rev()
                .find(|p| p.name == *name)
                .map(|p| p.value.clone());
            column.push(value);
        }
        self.rows += 1;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&FieldValue> {
        self.columns[column][row].as_ref()
    }

    /// Indices of the columns that hold at least one value, i.e. the ones
    /// that survive export pruning.
    pub fn surviving_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&i| self.columns[i].iter().any(Option::is_some))
            .collect()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_column_grows_by_one_per_append() {
        let mut table = Table::new();
        table.append(&[FieldPair::text("Name", "A")]);
        table.append(&[FieldPair::text("Preis", "x")]);
        table.append(&[]);

        assert_eq!(table.rows(), 3);
        for i in 0..SCHEMA.len() {
            assert_eq!(table.columns[i].len(), 3);
        }
    }

    #[test]
    fn unknown_field_names_are_dropped() {
        let mut table = Table::new();
        table.append(&[
            FieldPair::text("Name", "A"),
            FieldPair::text("Totally unknown label", "x"),
        ]);

        assert_eq!(table.rows(), 1);
        assert_eq!(table.surviving_columns().len(), 1);
    }

    #[test]
    fn last_write_wins_for_duplicate_names() {
        let mut table = Table::new();
        table.append(&[
            FieldPair::text("Baujahr", "1990"),
            FieldPair::text("Baujahr", "1995"),
        ]);

        let col = SCHEMA.iter().position(|n| *n == "Baujahr").unwrap();
        assert_eq!(
            table.cell(col, 0),
            Some(&FieldValue::Text("1995".into()))
        );
    }

    #[test]
    fn missing_fields_become_null() {
        let mut table = Table::new();
        table.append(&[FieldPair::text("Name", "A")]);

        let col = SCHEMA.iter().position(|n| *n == "Ort").unwrap();
        assert_eq!(table.cell(col, 0), None);
    }

    #[test]
    fn surviving_columns_requires_any_value() {
        let mut table = Table::new();
        table.append(&[FieldPair::text("Name", "A")]);
        table.append(&[FieldPair::number("Preis", 1.0)]);

        let survivors: Vec<&str> = table
            .surviving_columns()
            .into_iter()
            .map(|i| SCHEMA[i])
            .collect();
        assert_eq!(survivors, ["Name", "Preis"]);
    }
}
