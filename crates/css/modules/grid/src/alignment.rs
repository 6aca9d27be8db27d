//! Self-alignment of grid items within their grid areas.
//!
//! Spec: CSS Box Alignment §6.1 Self-Alignment
//! <https://www.w3.org/TR/css-align-3/#justify-self-property>

use crate::types::{AxisEdge, Direction, GridAxis, GridItemStyle, ItemPosition};

/// How an item sits in its grid area along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisAlignment {
    /// Edge the item is aligned to
    pub edge: AxisEdge,
    /// Fill the area when the item's own size is indefinite
    pub is_stretched: bool,
}

impl AxisAlignment {
    const fn new(edge: AxisEdge, is_stretched: bool) -> Self {
        Self { edge, is_stretched }
    }
}

/// The used `*-self` value: `auto` defers to the container's `*-items`,
/// `normal` behaves as `stretch`, or `start` for replaced elements.
fn used_position(
    self_alignment: ItemPosition,
    container_default: ItemPosition,
    is_replaced: bool,
) -> ItemPosition {
    let specified = if self_alignment == ItemPosition::Auto {
        container_default
    } else {
        self_alignment
    };
    match specified {
        ItemPosition::Auto | ItemPosition::Normal if is_replaced => ItemPosition::Start,
        ItemPosition::Auto | ItemPosition::Normal => ItemPosition::Stretch,
        other => other,
    }
}

/// Resolve the alignment of one item on `axis`.
///
/// Auto margins take precedence over any alignment property: two auto
/// margins center the item, a single one pushes it to the opposite edge.
pub fn resolve_axis_alignment(
    style: &GridItemStyle,
    axis: GridAxis,
    container_default: ItemPosition,
    direction: Direction,
) -> AxisAlignment {
    let (margin_start, margin_end) = style.margins.for_axis(axis);
    match (margin_start.is_auto(), margin_end.is_auto()) {
        (true, true) => return AxisAlignment::new(AxisEdge::Center, false),
        (true, false) => return AxisAlignment::new(AxisEdge::End, false),
        (false, true) => return AxisAlignment::new(AxisEdge::Start, false),
        (false, false) => {}
    }

    let position = used_position(
        style.self_alignment(axis),
        container_default,
        style.is_replaced,
    );
    let edge = match position {
        ItemPosition::Stretch => return AxisAlignment::new(AxisEdge::Start, true),
        ItemPosition::Center => AxisEdge::Center,
        ItemPosition::End | ItemPosition::FlexEnd | ItemPosition::SelfEnd => AxisEdge::End,
        ItemPosition::Baseline | ItemPosition::LastBaseline => AxisEdge::Baseline,
        ItemPosition::Left if axis.is_inline() && direction == Direction::Rtl => AxisEdge::End,
        ItemPosition::Right if axis.is_inline() && direction == Direction::Ltr => AxisEdge::End,
        // `left`/`right` on the block axis behave as `start`.
        ItemPosition::Start
        | ItemPosition::FlexStart
        | ItemPosition::SelfStart
        | ItemPosition::Left
        | ItemPosition::Right
        | ItemPosition::Auto
        | ItemPosition::Normal => AxisEdge::Start,
    };
    AxisAlignment::new(edge, false)
}

/// Offset of an item's border box from the start of its grid area.
///
/// Overflowing items are not clamped (unsafe alignment). Baseline
/// alignment falls back to start alignment.
pub fn alignment_offset(
    container_size: f32,
    size: f32,
    margin_start: f32,
    margin_end: f32,
    edge: AxisEdge,
) -> f32 {
    match edge {
        AxisEdge::Start | AxisEdge::Baseline => margin_start,
        // The start margin is part of the offset; half the free space is
        // measured between the margins.
        AxisEdge::Center => margin_start + (container_size - size - margin_start - margin_end) / 2.0,
        AxisEdge::End => container_size - margin_end - size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemMargins, MarginValue};

    const EPSILON: f32 = 1e-4;

    fn style(justify_self: ItemPosition) -> GridItemStyle {
        GridItemStyle {
            justify_self,
            ..GridItemStyle::default()
        }
    }

    /// # Panics
    /// Panics if `auto`/`normal` resolve to the wrong behaviour.
    #[test]
    fn test_normal_stretches_unless_replaced() {
        let normal = resolve_axis_alignment(
            &style(ItemPosition::Auto),
            GridAxis::Column,
            ItemPosition::Normal,
            Direction::Ltr,
        );
        assert_eq!(normal, AxisAlignment::new(AxisEdge::Start, true));

        let replaced = GridItemStyle {
            is_replaced: true,
            ..style(ItemPosition::Normal)
        };
        let resolved =
            resolve_axis_alignment(&replaced, GridAxis::Column, ItemPosition::Normal, Direction::Ltr);
        assert_eq!(resolved, AxisAlignment::new(AxisEdge::Start, false));

        let inherited = resolve_axis_alignment(
            &style(ItemPosition::Auto),
            GridAxis::Column,
            ItemPosition::Center,
            Direction::Ltr,
        );
        assert_eq!(inherited.edge, AxisEdge::Center);
    }

    /// # Panics
    /// Panics if `left`/`right` ignore the container direction.
    #[test]
    fn test_left_right_follow_direction() {
        let left = style(ItemPosition::Left);
        let right = style(ItemPosition::Right);
        let edge = |item: &GridItemStyle, axis: GridAxis, direction: Direction| {
            resolve_axis_alignment(item, axis, ItemPosition::Normal, direction).edge
        };
        assert_eq!(edge(&left, GridAxis::Column, Direction::Ltr), AxisEdge::Start);
        assert_eq!(edge(&left, GridAxis::Column, Direction::Rtl), AxisEdge::End);
        assert_eq!(edge(&right, GridAxis::Column, Direction::Ltr), AxisEdge::End);
        assert_eq!(edge(&right, GridAxis::Column, Direction::Rtl), AxisEdge::Start);
    }

    /// # Panics
    /// Panics if auto margins do not override the alignment property.
    #[test]
    fn test_auto_margins_take_precedence() {
        let mut item = style(ItemPosition::Stretch);
        item.margins = ItemMargins {
            inline_start: MarginValue::Auto,
            inline_end: MarginValue::Auto,
            ..ItemMargins::default()
        };
        let both = resolve_axis_alignment(&item, GridAxis::Column, ItemPosition::Normal, Direction::Ltr);
        assert_eq!(both, AxisAlignment::new(AxisEdge::Center, false));

        item.margins.inline_end = MarginValue::Length(0.0);
        let start_auto =
            resolve_axis_alignment(&item, GridAxis::Column, ItemPosition::Normal, Direction::Ltr);
        assert_eq!(start_auto.edge, AxisEdge::End);

        // Block-axis margins are untouched, so the row axis stretches.
        let block = resolve_axis_alignment(&item, GridAxis::Row, ItemPosition::Normal, Direction::Ltr);
        assert!(block.is_stretched);
    }

    /// # Panics
    /// Panics if an offset ignores margins.
    #[test]
    fn test_alignment_offset() {
        assert!((alignment_offset(100.0, 40.0, 5.0, 15.0, AxisEdge::Start) - 5.0).abs() < EPSILON);
        assert!((alignment_offset(100.0, 40.0, 5.0, 15.0, AxisEdge::Baseline) - 5.0).abs() < EPSILON);
        assert!((alignment_offset(100.0, 40.0, 5.0, 15.0, AxisEdge::Center) - 25.0).abs() < EPSILON);
        assert!((alignment_offset(100.0, 40.0, 5.0, 15.0, AxisEdge::End) - 45.0).abs() < EPSILON);
        // Overflow is not clamped.
        assert!((alignment_offset(20.0, 40.0, 0.0, 0.0, AxisEdge::End) + 20.0).abs() < EPSILON);
    }
}
