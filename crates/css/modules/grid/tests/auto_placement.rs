//! Placement behaviour seen through the public API.

#[cfg(test)]
mod tests {
    use css_grid_engine::{
        GridArea, GridAutoFlow, GridAxisTracks, GridContainerInputs, GridItem, GridItemStyle,
        GridLine, GridPlacement, GridSpan, GridTrackSize, MinMaxSizes, StaticNode, layout_grid,
        resolve_item_spans,
    };

    const EPSILON: f32 = 1e-4;

    fn init_logging() {
        if env_logger::builder().is_test(true).try_init().is_err() {
            log::trace!("logger already initialised");
        }
    }

    fn area(columns: (usize, usize), rows: (usize, usize)) -> GridArea {
        GridArea::new(
            GridSpan::new(columns.0, columns.1),
            GridSpan::new(rows.0, rows.1),
        )
    }

    fn spanning(columns: u32) -> GridItemStyle {
        GridItemStyle {
            column: GridPlacement::span(columns),
            ..GridItemStyle::default()
        }
    }

    /// Sparse packing never moves the cursor backwards; dense packing
    /// back-fills holes.
    ///
    /// # Panics
    /// Panics if either packing mode places the small item wrongly.
    #[test]
    fn test_sparse_and_dense_packing() {
        init_logging();
        let styles = [spanning(2), spanning(2), spanning(1)];

        let sparse = resolve_item_spans(&styles, 3, 0, GridAutoFlow::Row);
        assert_eq!(sparse.areas[0], area((0, 2), (0, 1)));
        assert_eq!(sparse.areas[1], area((0, 2), (1, 2)));
        assert_eq!(sparse.areas[2], area((2, 3), (1, 2)));

        let dense = resolve_item_spans(&styles, 3, 0, GridAutoFlow::RowDense);
        assert_eq!(dense.areas[1], area((0, 2), (1, 2)));
        assert_eq!(dense.areas[2], area((2, 3), (0, 1)));
        assert_eq!(dense.row_count, 2);
    }

    /// Items locked to a row are placed before the cursor walks.
    ///
    /// # Panics
    /// Panics if a locked item is displaced by an auto item.
    #[test]
    fn test_locked_items_first() {
        init_logging();
        let locked = GridItemStyle {
            row: GridPlacement::lines(1, 2),
            ..GridItemStyle::default()
        };
        let styles = [GridItemStyle::default(), locked, locked];
        let result = resolve_item_spans(&styles, 2, 0, GridAutoFlow::Row);

        assert_eq!(result.areas[1], area((0, 1), (0, 1)));
        assert_eq!(result.areas[2], area((1, 2), (0, 1)));
        assert_eq!(result.areas[0], area((0, 1), (1, 2)));
    }

    /// Column flow fills columns top to bottom.
    ///
    /// # Panics
    /// Panics if the major axis is not the column axis.
    #[test]
    fn test_column_flow_with_definite_row() {
        init_logging();
        let in_second_row = GridItemStyle {
            row: GridPlacement::lines(2, 3),
            ..GridItemStyle::default()
        };
        let styles = [GridItemStyle::default(), in_second_row, GridItemStyle::default()];
        let result = resolve_item_spans(&styles, 0, 2, GridAutoFlow::Column);

        assert_eq!(result.areas[0], area((0, 1), (0, 1)));
        assert_eq!(result.areas[1], area((0, 1), (1, 2)));
        assert_eq!(result.areas[2], area((1, 2), (0, 1)));
        assert_eq!(result.column_count, 2);
    }

    /// `span` on both sides keeps the start span; reversed lines swap.
    ///
    /// # Panics
    /// Panics if conflicting placements are resolved differently.
    #[test]
    fn test_conflicting_placements() {
        init_logging();
        let styles = [
            GridItemStyle {
                column: GridPlacement::new(GridLine::Span(2), GridLine::Span(5)),
                ..GridItemStyle::default()
            },
            GridItemStyle {
                column: GridPlacement::lines(3, 1),
                row: GridPlacement::lines(2, 2),
                ..GridItemStyle::default()
            },
        ];
        let result = resolve_item_spans(&styles, 2, 2, GridAutoFlow::Row);

        assert_eq!(result.areas[0].columns.span_size(), 2);
        assert_eq!(result.areas[1], area((0, 2), (1, 2)));
    }

    /// Implicit tracks cycle `grid-auto-columns` backwards before the
    /// explicit grid and forwards after it.
    ///
    /// # Panics
    /// Panics if implicit track sizes do not follow the pattern.
    #[test]
    fn test_implicit_track_pattern() {
        init_logging();
        let columns = GridAxisTracks::from_sizes([GridTrackSize::length(50.0)], 0.0)
            .with_auto_tracks(vec![GridTrackSize::length(10.0), GridTrackSize::length(20.0)]);
        let inputs = GridContainerInputs::new(columns, GridAxisTracks::default(), None, None);
        let node = StaticNode::new(MinMaxSizes::new(1.0, 1.0), MinMaxSizes::new(1.0, 1.0));
        let items = [
            GridItem::new(
                node,
                GridItemStyle {
                    column: GridPlacement::new(GridLine::Line(-4), GridLine::Auto),
                    ..GridItemStyle::default()
                },
            ),
            GridItem::new(
                node,
                GridItemStyle {
                    column: GridPlacement::lines(2, 4),
                    ..GridItemStyle::default()
                },
            ),
        ];

        let result = layout_grid(&items, &inputs).ok().unwrap_or_default();
        assert_eq!(result.columns.track_sizes, vec![10.0, 20.0, 50.0, 10.0, 20.0]);
        assert_eq!(result.items[0].area.columns, GridSpan::new(0, 1));
        assert_eq!(result.items[1].area.columns, GridSpan::new(3, 5));
        assert!((result.items[1].x - 80.0).abs() < EPSILON);
        assert!((result.items[1].width - 30.0).abs() < EPSILON);
    }
}
