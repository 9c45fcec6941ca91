//! Row record model

use indexmap::IndexMap;

/// One spreadsheet row: column header -> raw cell text.
///
/// Columns keep the order of the sheet header. Cells missing from a short
/// row are stored as empty strings, so "absent" and "empty" read the same
/// through [`RowRecord::non_empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    cells: IndexMap<String, String>,
}

impl RowRecord {
    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Decode a `values` matrix whose first row is the header.
    ///
    /// Fewer than two rows means there is no data. Cells past the header
    /// width are ignored.
    pub fn from_values(values: Vec<Vec<String>>) -> Vec<RowRecord> {
        if values.len() < 2 {
            return Vec::new();
        }

        let mut rows = values.into_iter();
        let header = rows.next().unwrap_or_default();

        rows.map(|row| {
            let mut cells = row.into_iter();
            let record = header
                .iter()
                .map(|column| (column.clone(), cells.next().unwrap_or_default()))
                .collect();
            RowRecord { cells: record }
        })
        .collect()
    }

    /// Raw cell value, `None` when the column does not exist
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Trimmed cell value, `None` when the column is absent or blank
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}
