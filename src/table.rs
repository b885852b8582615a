use crate::error::{GalleryError, Result};
use calamine::{Data, Reader, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;

/// Name of the column that must hold the image URLs.
pub const LINK_COLUMN: &str = "link";

/// A parsed worksheet: a header row plus the data rows beneath it.
///
/// Rows keep the order they had in the file. Every row has exactly one value
/// per header; short rows are padded with empty strings.
#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    link_column: usize,
}

impl Table {
    /// Build a table from a header and rows of values.
    ///
    /// Fails with [`GalleryError::MissingLinkColumn`] when no header is
    /// literally named `link`.
    ///
    /// # Examples
    /// ```
    /// use sheet_gallery::table::Table;
    ///
    /// let table = Table::new(
    ///     vec!["name".to_string(), "link".to_string()],
    ///     vec![vec!["cat".to_string(), "http://example.com/cat.png".to_string()]],
    /// )
    /// .unwrap();
    /// assert_eq!(table.link(0), Some("http://example.com/cat.png"));
    /// ```
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let link_column = columns
            .iter()
            .position(|name| name == LINK_COLUMN)
            .ok_or(GalleryError::MissingLinkColumn)?;

        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Ok(Table {
            columns,
            rows,
            link_column,
        })
    }

    /// Load the first worksheet of an in-memory `.xlsx` file.
    ///
    /// The first row is treated as the header; everything after it is data.
    ///
    /// # Arguments
    /// * `bytes` - Raw contents of the uploaded workbook
    ///
    /// # Returns
    /// * `Result<Table>` - The parsed table, or why it could not be built
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(GalleryError::EmptyWorkbook)?;

        let range = workbook.worksheet_range(&sheet_name)?;
        let mut rows = range.rows();

        // An empty sheet has no header at all, so it cannot have a link column
        let columns: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(cell_to_string).collect(),
            None => return Err(GalleryError::MissingLinkColumn),
        };

        let data = rows
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        Table::new(columns, data)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The URL stored in the `link` column of row `index` (0-based).
    pub fn link(&self, index: usize) -> Option<&str> {
        self.rows
            .get(index)
            .map(|row| row[self.link_column].as_str())
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row[self.link_column].as_str())
    }

    /// Value of `column` in row `index`, if both exist.
    pub fn value(&self, index: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|name| name == column)?;
        self.rows.get(index).map(|row| row[col].as_str())
    }

    /// Row `index` as a column-name to value mapping.
    pub fn row(&self, index: usize) -> Option<HashMap<&str, &str>> {
        self.rows.get(index).map(|row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect()
        })
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
