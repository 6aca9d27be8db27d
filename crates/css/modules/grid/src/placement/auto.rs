//! Auto placement over an occupancy grid.
//!
//! Spec: §8.5 Grid Item Placement Algorithm
//!
//! Works in flow-relative terms: the *major* axis is the one the cursor
//! advances along when it wraps (rows for `grid-auto-flow: row`), the *minor*
//! axis is the one it scans within a major line.

use super::GridSpan;

/// Item position in flow-relative terms, filled in by [`place_items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingItem {
    pub major: Option<GridSpan>,
    pub minor: Option<GridSpan>,
    pub major_size: usize,
    pub minor_size: usize,
}

/// Cells taken by already placed items, indexed `[major][minor]`.
#[derive(Debug, Default)]
struct OccupancyGrid {
    lines: Vec<Vec<bool>>,
}

impl OccupancyGrid {
    fn is_free(&self, major: GridSpan, minor: GridSpan) -> bool {
        (major.start..major.end).all(|major_line| {
            self.lines.get(major_line).is_none_or(|cells| {
                (minor.start..minor.end)
                    .all(|minor_line| !cells.get(minor_line).copied().unwrap_or(false))
            })
        })
    }

    fn occupy(&mut self, major: GridSpan, minor: GridSpan) {
        if self.lines.len() < major.end {
            self.lines.resize_with(major.end, Vec::new);
        }
        for cells in &mut self.lines[major.start..major.end] {
            if cells.len() < minor.end {
                cells.resize(minor.end, false);
            }
            cells[minor.start..minor.end].fill(true);
        }
    }
}

/// Place every item with an indefinite span.
///
/// `order` lists item indices in order-modified document order. `minor_count`
/// already covers the explicit grid, definite minor spans and the largest
/// indefinite minor span. Returns the final minor track count.
pub fn place_items(
    items: &mut [PendingItem],
    order: &[usize],
    minor_count: usize,
    dense: bool,
) -> usize {
    let mut grid = OccupancyGrid::default();
    let mut minor_count = minor_count;

    // Step 1: anything not auto-positioned.
    for &index in order {
        if let (Some(major), Some(minor)) = (items[index].major, items[index].minor) {
            grid.occupy(major, minor);
        }
    }

    // Step 2: items locked to a major line.
    let mut lock_cursors: Vec<usize> = Vec::new();
    for &index in order {
        let item = items[index];
        let (Some(major), None) = (item.major, item.minor) else {
            continue;
        };
        let mut start = if dense {
            0
        } else {
            lock_cursors.get(major.start).copied().unwrap_or(0)
        };
        while !grid.is_free(major, GridSpan::with_size(start, item.minor_size)) {
            start += 1;
        }
        let minor = GridSpan::with_size(start, item.minor_size);
        grid.occupy(major, minor);
        items[index].minor = Some(minor);
        minor_count = minor_count.max(minor.end);
        if !dense {
            if lock_cursors.len() <= major.start {
                lock_cursors.resize(major.start + 1, 0);
            }
            lock_cursors[major.start] = minor.end;
        }
        log::trace!(target: "css::grid::placement", "locked item {index} -> minor {minor:?}");
    }

    // Step 4: everything else, walking the cursor.
    let mut cursor_major = 0_usize;
    let mut cursor_minor = 0_usize;
    for &index in order {
        let item = items[index];
        if item.major.is_some() {
            continue;
        }

        let (major, minor) = if let Some(minor) = item.minor {
            if dense {
                cursor_major = 0;
            } else if minor.start < cursor_minor {
                cursor_major += 1;
            }
            while !grid.is_free(GridSpan::with_size(cursor_major, item.major_size), minor) {
                cursor_major += 1;
            }
            (GridSpan::with_size(cursor_major, item.major_size), minor)
        } else {
            if dense {
                cursor_major = 0;
                cursor_minor = 0;
            }
            debug_assert!(item.minor_size <= minor_count, "minor count covers every span");
            loop {
                let major = GridSpan::with_size(cursor_major, item.major_size);
                let found = (cursor_minor..=minor_count.saturating_sub(item.minor_size))
                    .map(|start| GridSpan::with_size(start, item.minor_size))
                    .find(|minor| grid.is_free(major, *minor));
                if let Some(minor) = found {
                    break (major, minor);
                }
                cursor_major += 1;
                cursor_minor = 0;
            }
        };

        grid.occupy(major, minor);
        cursor_minor = minor.end;
        items[index].major = Some(major);
        items[index].minor = Some(minor);
        log::trace!(
            target: "css::grid::placement",
            "auto item {index} -> major {major:?}, minor {minor:?}"
        );
    }

    minor_count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto_item(major_size: usize, minor_size: usize) -> PendingItem {
        PendingItem {
            major: None,
            minor: None,
            major_size,
            minor_size,
        }
    }

    fn placed(items: &[PendingItem], index: usize) -> (GridSpan, GridSpan) {
        let item = items[index];
        (
            item.major.unwrap_or_default(),
            item.minor.unwrap_or_default(),
        )
    }

    /// # Panics
    /// Panics if sparse placement back-fills a hole.
    #[test]
    fn test_sparse_leaves_holes() {
        let mut items = [auto_item(1, 1), auto_item(1, 2), auto_item(1, 1)];
        place_items(&mut items, &[0, 1, 2], 2, false);
        assert_eq!(placed(&items, 0), (GridSpan::new(0, 1), GridSpan::new(0, 1)));
        assert_eq!(placed(&items, 1), (GridSpan::new(1, 2), GridSpan::new(0, 2)));
        assert_eq!(placed(&items, 2), (GridSpan::new(2, 3), GridSpan::new(0, 1)));
    }

    /// # Panics
    /// Panics if dense placement does not back-fill a hole.
    #[test]
    fn test_dense_fills_holes() {
        let mut items = [auto_item(1, 1), auto_item(1, 2), auto_item(1, 1)];
        place_items(&mut items, &[0, 1, 2], 2, true);
        assert_eq!(placed(&items, 2), (GridSpan::new(0, 1), GridSpan::new(1, 2)));
    }

    /// # Panics
    /// Panics if a locked item overlaps a definite item.
    #[test]
    fn test_locked_items_skip_occupied_cells() {
        let mut items = [
            PendingItem {
                major: Some(GridSpan::new(0, 1)),
                minor: Some(GridSpan::new(0, 1)),
                major_size: 1,
                minor_size: 1,
            },
            PendingItem {
                major: Some(GridSpan::new(0, 1)),
                minor: None,
                major_size: 1,
                minor_size: 1,
            },
        ];
        let minor_count = place_items(&mut items, &[0, 1], 1, false);
        assert_eq!(items[1].minor, Some(GridSpan::new(1, 2)));
        assert_eq!(minor_count, 2);
    }
}
