//! Grids described as JSON, laid out and compared against expected rects.

#[cfg(test)]
mod tests {
    use anyhow::{Context as _, Result};
    use css_grid_engine::{GridContainerInputs, GridItem, GridItemStyle, StaticNode, layout_grid};
    use serde::Deserialize;

    const EPSILON: f32 = 1e-3;

    #[derive(Debug, Deserialize)]
    struct FixtureItem {
        node: StaticNode,
        #[serde(default)]
        style: GridItemStyle,
    }

    #[derive(Debug, Deserialize)]
    struct Expected {
        columns: Vec<f32>,
        rows: Vec<f32>,
        rects: Vec<[f32; 4]>,
        intrinsic: [f32; 2],
    }

    #[derive(Debug, Deserialize)]
    struct Fixture {
        container: GridContainerInputs,
        items: Vec<FixtureItem>,
        expected: Expected,
    }

    fn close(actual: &[f32], expected: &[f32]) -> bool {
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(expected)
                .all(|(lhs, rhs)| (lhs - rhs).abs() < EPSILON)
    }

    fn run_fixture(name: &str, source: &str) -> Result<()> {
        if env_logger::builder().is_test(true).try_init().is_err() {
            log::trace!("logger already initialised");
        }
        let fixture: Fixture =
            serde_json::from_str(source).with_context(|| format!("parsing fixture {name}"))?;
        let items: Vec<_> = fixture
            .items
            .into_iter()
            .map(|item| GridItem::new(item.node, item.style))
            .collect();
        let result = layout_grid(&items, &fixture.container)?;
        let expected = fixture.expected;

        assert!(
            close(&result.columns.track_sizes, &expected.columns),
            "{name}: columns {:?}",
            result.columns.track_sizes
        );
        assert!(
            close(&result.rows.track_sizes, &expected.rows),
            "{name}: rows {:?}",
            result.rows.track_sizes
        );
        assert_eq!(result.items.len(), expected.rects.len(), "{name}: item count");
        for (placed, rect) in result.items.iter().zip(&expected.rects) {
            let actual = [placed.x, placed.y, placed.width, placed.height];
            assert!(close(&actual, rect), "{name}: item {} at {actual:?}", placed.item_index);
        }
        assert!(
            close(
                &[result.intrinsic_inline_size, result.intrinsic_block_size],
                &expected.intrinsic
            ),
            "{name}: intrinsic {}x{}",
            result.intrinsic_inline_size,
            result.intrinsic_block_size
        );
        Ok(())
    }

    /// # Errors
    /// Returns an error if the fixture does not parse or lay out.
    #[test]
    fn test_fixed_and_auto_fixture() -> Result<()> {
        run_fixture(
            "fixed_and_auto",
            include_str!("fixtures/fixed_and_auto.json"),
        )
    }

    /// # Errors
    /// Returns an error if the fixture does not parse or lay out.
    #[test]
    fn test_auto_fill_dense_fixture() -> Result<()> {
        run_fixture(
            "auto_fill_dense",
            include_str!("fixtures/auto_fill_dense.json"),
        )
    }

    /// # Errors
    /// Returns an error if the fixture does not parse or lay out.
    #[test]
    fn test_fit_content_alignment_fixture() -> Result<()> {
        run_fixture(
            "fit_content_alignment",
            include_str!("fixtures/fit_content_alignment.json"),
        )
    }
}
