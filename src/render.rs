use crate::layout::{GRID_COLUMNS, Placement};
use serde::Serialize;

/// What ended up in one grid cell.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellOutcome {
    /// A thumbnail is available at `/thumbnail/{index}`.
    Image { width: u32, height: u32 },
    /// Fetching or decoding failed; the message is shown instead.
    Failed { message: String },
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct GridCell {
    pub index: usize,
    pub caption: String,
    pub outcome: CellOutcome,
}

impl GridCell {
    pub fn is_image(&self) -> bool {
        matches!(self.outcome, CellOutcome::Image { .. })
    }
}

/// The ten columns of a finished render pass.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RenderedGrid {
    pub columns: Vec<Vec<GridCell>>,
}

impl Default for RenderedGrid {
    fn default() -> Self {
        Self {
            columns: vec![Vec::new(); GRID_COLUMNS],
        }
    }
}

impl RenderedGrid {
    pub fn push(&mut self, placement: Placement, outcome: CellOutcome) {
        self.columns[placement.column].push(GridCell {
            index: placement.index,
            caption: placement.caption(),
            outcome,
        });
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.columns.iter().flatten()
    }

    /// Number of cells that show an image.
    pub fn image_count(&self) -> usize {
        self.cells().filter(|cell| cell.is_image()).count()
    }

    /// Per-image error messages in column order.
    pub fn errors(&self) -> Vec<&str> {
        self.cells()
            .filter_map(|cell| match &cell.outcome {
                CellOutcome::Failed { message } => Some(message.as_str()),
                CellOutcome::Image { .. } => None,
            })
            .collect()
    }
}

/// Walk `plan` in order, fetching each image through the session cache.
///
/// Images are fetched one at a time. A failure only affects its own cell.
#[cfg(feature = "web")]
pub async fn render_pass(
    table: &crate::table::Table,
    plan: &crate::layout::RenderPlan,
    fetcher: &crate::fetch::ImageFetcher,
    cache: &mut crate::cache::ImageCache,
    max_size: u32,
) -> RenderedGrid {
    let mut grid = RenderedGrid::default();

    for placement in &plan.placements {
        // Plans never index past the table, but a stale plan might
        let Some(url) = table.link(placement.index) else {
            continue;
        };

        let outcome = match cache.get_or_fetch(url, fetcher, max_size).await {
            Ok(thumb) => CellOutcome::Image {
                width: thumb.width,
                height: thumb.height,
            },
            Err(message) => {
                log::warn!("{}", message);
                CellOutcome::Failed { message }
            }
        };

        grid.push(*placement, outcome);
    }

    log::info!(
        "Rendered {} of {} planned images ({} cached URLs)",
        grid.image_count(),
        plan.len(),
        cache.len()
    );

    grid
}
