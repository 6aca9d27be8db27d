//! Grid item placement algorithm.
//!
//! Spec: §8 Placing Grid Items
//! <https://www.w3.org/TR/css-grid-2/#placement>

mod auto;
mod lines;

use serde::{Deserialize, Serialize};

use crate::types::{GridAutoFlow, GridAxis, GridItemStyle};

use auto::{PendingItem, place_items};
pub use lines::{MAX_GRID_LINE, UntranslatedSpan, resolve_placement};

/// Half-open range of track indices `[start, end)` in the final grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSpan {
    /// First track
    pub start: usize,
    /// One past the last track
    pub end: usize,
}

impl GridSpan {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "a grid span covers at least one track");
        Self { start, end }
    }

    /// Span of `size` tracks starting at `start`.
    pub fn with_size(start: usize, size: usize) -> Self {
        Self::new(start, start + size)
    }

    /// Number of tracks covered.
    pub fn span_size(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Area occupied by a grid item (row/column span).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridArea {
    pub columns: GridSpan,
    pub rows: GridSpan,
}

impl GridArea {
    /// Create a new grid area.
    pub fn new(columns: GridSpan, rows: GridSpan) -> Self {
        Self { columns, rows }
    }

    /// The span on `axis`.
    pub fn span(&self, axis: GridAxis) -> GridSpan {
        match axis {
            GridAxis::Column => self.columns,
            GridAxis::Row => self.rows,
        }
    }
}

/// Output of the item span resolver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementResult {
    /// One area per input item, in input order
    pub areas: Vec<GridArea>,
    /// Implicit columns before the explicit grid
    pub column_start_offset: usize,
    /// Implicit rows before the explicit grid
    pub row_start_offset: usize,
    /// Total columns (implicit and explicit)
    pub column_count: usize,
    /// Total rows (implicit and explicit)
    pub row_count: usize,
}

impl PlacementResult {
    /// Implicit tracks before the explicit grid on `axis`.
    pub fn start_offset(&self, axis: GridAxis) -> usize {
        match axis {
            GridAxis::Column => self.column_start_offset,
            GridAxis::Row => self.row_start_offset,
        }
    }

    /// Total tracks on `axis`.
    pub fn track_count(&self, axis: GridAxis) -> usize {
        match axis {
            GridAxis::Column => self.column_count,
            GridAxis::Row => self.row_count,
        }
    }
}

/// Per-axis data gathered before auto placement.
struct AxisSpans {
    spans: Vec<UntranslatedSpan>,
    start_offset: usize,
}

impl AxisSpans {
    fn resolve(styles: &[GridItemStyle], axis: GridAxis, explicit_track_count: usize) -> Self {
        let spans: Vec<_> = styles
            .iter()
            .map(|style| resolve_placement(style.placement(axis), explicit_track_count))
            .collect();
        let min_start = spans
            .iter()
            .filter_map(UntranslatedSpan::start)
            .min()
            .unwrap_or(0);
        Self {
            spans,
            start_offset: min_start.min(0).unsigned_abs() as usize,
        }
    }

    fn translated(&self, index: usize) -> Option<GridSpan> {
        match self.spans[index] {
            UntranslatedSpan::Definite { start, end } => {
                let offset = self.start_offset as i64;
                Some(GridSpan::new(
                    (i64::from(start) + offset) as usize,
                    (i64::from(end) + offset) as usize,
                ))
            }
            UntranslatedSpan::Indefinite { .. } => None,
        }
    }

    /// Tracks needed to hold the explicit grid and every definite span.
    fn definite_track_count(&self, explicit_track_count: usize) -> usize {
        (0..self.spans.len())
            .filter_map(|index| self.translated(index))
            .map(|span| span.end)
            .fold(explicit_track_count + self.start_offset, usize::max)
    }
}

/// Resolve every in-flow item's grid area.
///
/// Items are placed in order-modified document order: a stable sort on
/// `order`, ties kept in input order. Areas are returned in input order.
pub fn resolve_item_spans(
    styles: &[GridItemStyle],
    explicit_column_count: usize,
    explicit_row_count: usize,
    auto_flow: GridAutoFlow,
) -> PlacementResult {
    let columns = AxisSpans::resolve(styles, GridAxis::Column, explicit_column_count);
    let rows = AxisSpans::resolve(styles, GridAxis::Row, explicit_row_count);

    let major_axis = auto_flow.major_axis();
    let (major, minor, explicit_major, explicit_minor) = match major_axis {
        GridAxis::Row => (&rows, &columns, explicit_row_count, explicit_column_count),
        GridAxis::Column => (&columns, &rows, explicit_column_count, explicit_row_count),
    };

    let mut pending: Vec<PendingItem> = (0..styles.len())
        .map(|index| PendingItem {
            major: major.translated(index),
            minor: minor.translated(index),
            major_size: major.spans[index].span_size(),
            minor_size: minor.spans[index].span_size(),
        })
        .collect();

    let largest_auto_minor_span = pending
        .iter()
        .filter(|item| item.minor.is_none())
        .map(|item| item.minor_size)
        .max()
        .unwrap_or(0);
    let minor_count = minor
        .definite_track_count(explicit_minor)
        .max(largest_auto_minor_span);

    let mut order: Vec<usize> = (0..styles.len()).collect();
    order.sort_by_key(|&index| styles[index].order);

    let minor_count = place_items(&mut pending, &order, minor_count, auto_flow.is_dense());

    let major_count = pending
        .iter()
        .filter_map(|item| item.major)
        .map(|span| span.end)
        .fold(explicit_major + major.start_offset, usize::max);

    let areas = pending
        .iter()
        .map(|item| {
            let major_span = item.major.unwrap_or_default();
            let minor_span = item.minor.unwrap_or_default();
            match major_axis {
                GridAxis::Row => GridArea::new(minor_span, major_span),
                GridAxis::Column => GridArea::new(major_span, minor_span),
            }
        })
        .collect();

    let (column_count, row_count) = match major_axis {
        GridAxis::Row => (minor_count, major_count),
        GridAxis::Column => (major_count, minor_count),
    };

    log::debug!(
        target: "css::grid::placement",
        "placed {} items into {column_count}x{row_count} (offsets {}/{})",
        styles.len(),
        columns.start_offset,
        rows.start_offset
    );

    PlacementResult {
        areas,
        column_start_offset: columns.start_offset,
        row_start_offset: rows.start_offset,
        column_count,
        row_count,
    }
}
