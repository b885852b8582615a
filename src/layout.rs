/// Number of columns in the rendered grid.
pub const GRID_COLUMNS: usize = 10;

/// How many images the sequential policy stacks in one column.
pub const IMAGES_PER_COLUMN: usize = 100;

/// Upper bound on images shown by the sequential policy.
pub const MAX_SEQUENTIAL_IMAGES: usize = GRID_COLUMNS * IMAGES_PER_COLUMN;

/// One grid cell: which column it lands in and which table row feeds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub column: usize,
    pub index: usize,
}

impl Placement {
    /// Caption shown under the image (1-based row number).
    pub fn caption(&self) -> String {
        format!("Image {}", self.index + 1)
    }
}

/// Which layout policy produced a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Fill the grid positionally from the start of the table.
    Sequential,
    /// Banded lookup driven by user-selected rows (0-based).
    RowSelection(Vec<usize>),
}

/// Ordered placements for one render pass.
///
/// The order is the order images are fetched in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderPlan {
    pub placements: Vec<Placement>,
}

impl RenderPlan {
    pub fn build(policy: &Policy, table_len: usize) -> Self {
        match policy {
            Policy::Sequential => sequential(table_len),
            Policy::RowSelection(rows) => row_selection(table_len, rows),
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements grouped by column, preserving plan order inside each.
    pub fn columns(&self) -> Vec<Vec<Placement>> {
        let mut columns = vec![Vec::new(); GRID_COLUMNS];
        for placement in &self.placements {
            columns[placement.column].push(*placement);
        }
        columns
    }
}

/// Lay out up to 1000 rows column by column: column `i`, slot `j` shows
/// row `i * 100 + j`. Rows past the end of the table are skipped.
///
/// # Examples
/// ```
/// use sheet_gallery::layout::sequential;
///
/// let plan = sequential(150);
/// assert_eq!(plan.len(), 150);
/// assert_eq!(plan.placements[100].column, 1);
/// ```
pub fn sequential(table_len: usize) -> RenderPlan {
    let mut placements = Vec::with_capacity(table_len.min(MAX_SEQUENTIAL_IMAGES));

    for i in 0..GRID_COLUMNS {
        for j in 0..IMAGES_PER_COLUMN {
            let index = i * IMAGES_PER_COLUMN + j;
            if index < table_len {
                placements.push(Placement { column: i, index });
            }
        }
    }

    RenderPlan { placements }
}

/// For every selected row `r` and column `c`, show row `r + c * band` where
/// `band = table_len / 10`.
///
/// The table is treated as ten equal bands and each column shows the
/// matching offset in its band. Indices at or past `table_len` are skipped.
/// With fewer than ten rows the band is zero and every column repeats `r`.
pub fn row_selection(table_len: usize, rows: &[usize]) -> RenderPlan {
    let band = table_len / GRID_COLUMNS;
    let mut placements = Vec::new();

    for &r in rows {
        for c in 0..GRID_COLUMNS {
            let index = r + c * band;
            if index < table_len {
                placements.push(Placement { column: c, index });
            }
        }
    }

    RenderPlan { placements }
}
