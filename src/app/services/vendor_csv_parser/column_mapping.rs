//! Column naming and typing for vendor headers
//!
//! Header cells become field names, and each column gets a type tag deciding
//! whether its cells are kept as text or coerced to numbers.

use crate::constants::{BLAST_TEXT_COLUMN_COUNT, HITTRAX_TEXT_COLUMNS};

/// How a column's cells are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
}

/// Field name plus type tag for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// Column specs in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub fields: Vec<FieldSpec>,
}

impl ColumnMapping {
    /// Blast layout: parentheses stripped from names, first four columns are text
    pub fn blast(header: &[String]) -> Self {
        let fields = header
            .iter()
            .enumerate()
            .map(|(index, cell)| FieldSpec {
                name: clean_header(cell),
                kind: if index < BLAST_TEXT_COLUMN_COUNT {
                    FieldKind::Text
                } else {
                    FieldKind::Numeric
                },
            })
            .collect();

        Self { fields }
    }

    /// HitTrax layout: trimmed names, Date/Time/Tag are text
    pub fn hittrax(header: &[String]) -> Self {
        let fields = header
            .iter()
            .map(|cell| {
                let name = cell.trim().to_string();
                let kind = if HITTRAX_TEXT_COLUMNS.contains(&name.as_str()) {
                    FieldKind::Text
                } else {
                    FieldKind::Numeric
                };
                FieldSpec { name, kind }
            })
            .collect();

        Self { fields }
    }

    /// Get the index for a given field name
    pub fn get_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Check if a field exists in the mapping
    pub fn has_column(&self, name: &str) -> bool {
        self.get_index(name).is_some()
    }

    /// (total, text, numeric) column counts
    pub fn stats(&self) -> (usize, usize, usize) {
        let text = self
            .fields
            .iter()
            .filter(|field| field.kind == FieldKind::Text)
            .count();
        (self.fields.len(), text, self.fields.len() - text)
    }
}

/// Remove every parenthesis and trim: `"Bat Speed (mph)"` -> `"Bat Speed mph"`
pub fn clean_header(raw: &str) -> String {
    raw.replace(['(', ')'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header("Bat Speed (mph)"), "Bat Speed mph");
        assert_eq!(clean_header(" Time to Contact (sec) "), "Time to Contact sec");
        assert_eq!(clean_header("(deg)"), "deg");
        assert_eq!(clean_header("Plane Score"), "Plane Score");
    }

    #[test]
    fn test_blast_mapping_types_by_position() {
        let mapping = ColumnMapping::blast(&header(&[
            "Date",
            "Equipment",
            "Handedness",
            "Swing Details",
            "Bat Speed (mph)",
            "Power (kW)",
        ]));

        assert_eq!(mapping.fields[3].kind, FieldKind::Text);
        assert_eq!(mapping.fields[4].name, "Bat Speed mph");
        assert_eq!(mapping.fields[4].kind, FieldKind::Numeric);
        assert_eq!(mapping.stats(), (6, 4, 2));
    }

    #[test]
    fn test_hittrax_mapping_types_by_name() {
        let mapping = ColumnMapping::hittrax(&header(&[" Date ", "Time", "AvgV", "Tag", "LD %"]));

        assert_eq!(mapping.fields[0].name, "Date");
        assert_eq!(mapping.fields[0].kind, FieldKind::Text);
        assert_eq!(mapping.fields[2].kind, FieldKind::Numeric);
        assert_eq!(mapping.fields[3].kind, FieldKind::Text);
        assert_eq!(mapping.get_index("LD %"), Some(4));
        assert!(!mapping.has_column("MaxV"));
    }
}
