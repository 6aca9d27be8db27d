//! Grid layout algorithm.
//!
//! Spec: §12 Grid Sizing
//! <https://www.w3.org/TR/css-grid-2/#layout-algorithm>

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::alignment::{AxisAlignment, alignment_offset, resolve_axis_alignment};
use crate::node::{GridItemNode, ItemConstraints, MeasureInput};
use crate::placement::{GridArea, PlacementResult, resolve_item_spans};
use crate::track_sizing::{
    AxisCollection, ResolvedTrackSizes, SetIndices, SizingItem, TrackSizingParams, auto_repetitions,
    expand_track_list, explicit_tracks, resolve_track_sizes,
};
use crate::types::{
    Direction, EdgeInsets, GridAutoFlow, GridAxis, GridAxisTracks, GridItemStyle, ItemPosition,
};
use crate::units::{saturating_add, saturating_mul};

/// Input parameters for grid layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridContainerInputs {
    /// Column tracks definition
    pub columns: GridAxisTracks,
    /// Row tracks definition
    pub rows: GridAxisTracks,
    /// Auto-flow direction
    pub auto_flow: GridAutoFlow,
    /// Definite content-box inline size, if any
    pub available_inline_size: Option<f32>,
    /// Definite content-box block size, if any
    pub available_block_size: Option<f32>,
    /// Border and padding of the container
    pub border_padding: EdgeInsets,
    /// `justify-items`
    pub justify_items: ItemPosition,
    /// `align-items`
    pub align_items: ItemPosition,
    pub direction: Direction,
}

impl GridContainerInputs {
    /// Create a new grid container inputs with default values.
    pub fn new(
        columns: GridAxisTracks,
        rows: GridAxisTracks,
        available_inline_size: Option<f32>,
        available_block_size: Option<f32>,
    ) -> Self {
        Self {
            columns,
            rows,
            available_inline_size,
            available_block_size,
            ..Self::default()
        }
    }

    fn axis_tracks(&self, axis: GridAxis) -> &GridAxisTracks {
        match axis {
            GridAxis::Column => &self.columns,
            GridAxis::Row => &self.rows,
        }
    }

    fn available_size(&self, axis: GridAxis) -> Option<f32> {
        match axis {
            GridAxis::Column => self.available_inline_size,
            GridAxis::Row => self.available_block_size,
        }
    }

    fn items_alignment(&self, axis: GridAxis) -> ItemPosition {
        match axis {
            GridAxis::Column => self.justify_items,
            GridAxis::Row => self.align_items,
        }
    }
}

/// A child of the grid container.
#[derive(Debug, Clone)]
pub struct GridItem<N> {
    /// Host node measured and laid out through [`GridItemNode`]
    pub node: N,
    pub style: GridItemStyle,
}

impl<N> GridItem<N> {
    pub fn new(node: N, style: GridItemStyle) -> Self {
        Self { node, style }
    }
}

/// A grid item with its final position and size.
///
/// Offsets are logical: `x` runs along the inline axis and `y` along the
/// block axis, both from the container's border-box origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlacedItem {
    /// Index of the item in the input slice
    pub item_index: usize,
    /// Final x position (border-box)
    pub x: f32,
    /// Final y position (border-box)
    pub y: f32,
    /// Final width (border-box)
    pub width: f32,
    /// Final height (border-box)
    pub height: f32,
    /// Grid area occupied
    pub area: GridArea,
}

/// An out-of-flow child, reported at its static position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOutOfFlowItem {
    pub item_index: usize,
    pub static_x: f32,
    pub static_y: f32,
}

/// Final track geometry of one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridAxisGeometry {
    /// Resolved set sizes
    pub sizes: ResolvedTrackSizes,
    /// Fenceposts: set `i` starts at `set_offsets[i]`, one entry per set
    /// plus the end of the last one
    pub set_offsets: Vec<f32>,
    /// Size of every track
    pub track_sizes: Vec<f32>,
    /// Start offset of every track
    pub track_offsets: Vec<f32>,
    /// Used gutter size
    pub gap: f32,
    /// Implicit tracks before the explicit grid
    pub explicit_start: usize,
}

impl GridAxisGeometry {
    /// Accumulate set offsets from `start`, one gutter per track; collapsed
    /// sets take no gutter.
    fn new(collection: &AxisCollection, sizes: ResolvedTrackSizes, start: f32, gap: f32) -> Self {
        let mut set_offsets = Vec::with_capacity(collection.set_count() + 1);
        let mut track_offsets = Vec::with_capacity(collection.track_count());
        let mut offset = start;
        set_offsets.push(offset);

        for set in collection.sets() {
            let per_track = set.track_base_size();
            let track_gap = if set.is_collapsed { 0.0 } else { gap };
            let mut track_offset = offset;
            for _ in 0..set.track_count {
                track_offsets.push(track_offset);
                track_offset = saturating_add(track_offset, per_track + track_gap);
            }
            offset = saturating_add(
                offset,
                saturating_add(set.base_size, saturating_mul(track_gap, set.track_count)),
            );
            set_offsets.push(offset);
        }

        let track_sizes = sizes.track_sizes();
        Self {
            sizes,
            set_offsets,
            track_sizes,
            track_offsets,
            gap,
            explicit_start: collection.explicit_start(),
        }
    }

    /// Start offset and size of the area covering `indices`, without the
    /// trailing gutter.
    pub fn area(&self, indices: SetIndices) -> (f32, f32) {
        let start = self.set_offsets[indices.begin];
        let end = self.set_offsets[indices.end] - self.gap;
        (start, (end - start).max(0.0))
    }

    /// Intrinsic size: last fencepost, minus the trailing gutter when any
    /// track takes space, plus the end inset.
    fn intrinsic_size(&self, has_tracks: bool, end_inset: f32) -> f32 {
        let last = self.set_offsets.last().copied().unwrap_or(0.0);
        let content_end = if has_tracks { last - self.gap } else { last };
        saturating_add(content_end, end_inset)
    }
}

/// Result of grid layout computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayoutResult {
    /// In-flow items with their positions, in input order
    pub items: Vec<GridPlacedItem>,
    pub out_of_flow: Vec<GridOutOfFlowItem>,
    /// Column geometry
    pub columns: GridAxisGeometry,
    /// Row geometry
    pub rows: GridAxisGeometry,
    /// Border-box inline size the grid needs
    pub intrinsic_inline_size: f32,
    /// Border-box block size the grid needs
    pub intrinsic_block_size: f32,
}

/// Everything one axis needs between placement and positioning.
struct AxisState {
    axis: GridAxis,
    collection: AxisCollection,
    /// Set indices of each in-flow item
    item_indices: Vec<SetIndices>,
}

impl AxisState {
    fn build(axis: GridAxis, inputs: &GridContainerInputs, placement: &PlacementResult) -> Self {
        let axis_tracks = inputs.axis_tracks(axis);
        let available = inputs.available_size(axis);
        let repetitions = auto_repetitions(axis_tracks, available);
        let explicit = explicit_tracks(&axis_tracks.template, repetitions);
        let expanded = expand_track_list(
            axis_tracks,
            explicit,
            placement.start_offset(axis),
            placement.track_count(axis),
        );
        let spans: Vec<_> = placement.areas.iter().map(|area| area.span(axis)).collect();
        let collection = AxisCollection::build(axis, &expanded, &spans, available);
        let item_indices = spans
            .iter()
            .map(|&span| collection.cache_item_set_indices(span))
            .collect();
        Self {
            axis,
            collection,
            item_indices,
        }
    }

    /// Run track sizing and position the sets.
    ///
    /// A percentage gutter against an indefinite size is zero while sizing
    /// and is then resolved against the resulting content size.
    fn resolve(
        &mut self,
        items: &[SizingItem],
        inputs: &GridContainerInputs,
    ) -> (GridAxisGeometry, f32) {
        let available = inputs.available_size(self.axis);
        let gap_size = inputs.axis_tracks(self.axis).gap;
        let gap = gap_size.resolve(available);
        let params = TrackSizingParams {
            gap,
            available_size: available,
            percentage_basis: available,
        };
        let sizes = resolve_track_sizes(&mut self.collection, items, &params);

        let start_inset = inputs.border_padding.start(self.axis);
        let end_inset = inputs.border_padding.end(self.axis);
        let has_tracks = self.collection.non_collapsed_track_count() > 0;
        let geometry = GridAxisGeometry::new(&self.collection, sizes, start_inset, gap);
        let intrinsic_size = geometry.intrinsic_size(has_tracks, end_inset);

        if !gap_size.is_unresolvable(available) {
            return (geometry, intrinsic_size);
        }
        let content_size = (intrinsic_size - start_inset - end_inset).max(0.0);
        let used_gap = gap_size.resolve(Some(content_size));
        tracing::debug!(
            "layout_grid: axis={:?}, percentage gap resolved to {} against {}",
            self.axis,
            used_gap,
            content_size
        );
        let geometry = GridAxisGeometry::new(&self.collection, geometry.sizes, start_inset, used_gap);
        (geometry, intrinsic_size)
    }
}

fn sizing_items<N: GridItemNode>(
    items: &[&GridItem<N>],
    state: &AxisState,
    input_for: impl Fn(usize) -> MeasureInput,
    placement: &PlacementResult,
) -> Vec<SizingItem> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| SizingItem {
            set_indices: state.item_indices[index],
            span_size: placement.areas[index].span(state.axis).span_size(),
            sizes: item.node.measure_min_max(state.axis, &input_for(index)),
            margin_sum: item.style.margins.sum(state.axis),
        })
        .collect()
}

/// Run the grid layout algorithm.
///
/// Spec: §12 Grid Sizing Algorithm
/// <https://www.w3.org/TR/css-grid-2/#layout-algorithm>
///
/// 1. Places in-flow items using the auto-placement algorithm
/// 2. Resolves column sizes, then row sizes with column areas known
/// 3. Lays out each item in its grid area and aligns it
///
/// Flexible tracks keep their intrinsic base size.
///
/// # Errors
/// Returns an error if a child fails to lay out.
pub fn layout_grid<N: GridItemNode>(
    items: &[GridItem<N>],
    inputs: &GridContainerInputs,
) -> Result<GridLayoutResult> {
    let (in_flow, out_of_flow): (Vec<_>, Vec<_>) = items
        .iter()
        .enumerate()
        .partition(|(_, item)| !item.style.is_out_of_flow);
    let in_flow_indices: Vec<usize> = in_flow.iter().map(|&(index, _)| index).collect();
    let in_flow_items: Vec<&GridItem<N>> = in_flow.iter().map(|&(_, item)| item).collect();

    // Step 1: Place grid items
    let explicit_column_count = explicit_tracks(
        &inputs.columns.template,
        auto_repetitions(&inputs.columns, inputs.available_inline_size),
    )
    .len();
    let explicit_row_count = explicit_tracks(
        &inputs.rows.template,
        auto_repetitions(&inputs.rows, inputs.available_block_size),
    )
    .len();
    let styles: Vec<GridItemStyle> = in_flow_items.iter().map(|item| item.style).collect();
    let placement = resolve_item_spans(
        &styles,
        explicit_column_count,
        explicit_row_count,
        inputs.auto_flow,
    );

    let mut column_state = AxisState::build(GridAxis::Column, inputs, &placement);
    let mut row_state = AxisState::build(GridAxis::Row, inputs, &placement);

    // Step 2: Resolve column track sizes
    let column_items = sizing_items(
        &in_flow_items,
        &column_state,
        |_| MeasureInput {
            percentage_resolution_size: inputs.available_inline_size,
            available_cross_size: None,
        },
        &placement,
    );
    let (columns, intrinsic_inline_size) = column_state.resolve(&column_items, inputs);

    // Step 3: Resolve row track sizes against the column areas
    let row_items = sizing_items(
        &in_flow_items,
        &row_state,
        |index| MeasureInput {
            percentage_resolution_size: inputs.available_block_size,
            available_cross_size: Some(columns.area(column_state.item_indices[index]).1),
        },
        &placement,
    );
    let (rows, intrinsic_block_size) = row_state.resolve(&row_items, inputs);

    // Step 4: Position items in their grid areas
    let mut placed_items = Vec::with_capacity(in_flow_items.len());
    for (index, item) in in_flow_items.iter().enumerate() {
        let item_index = in_flow_indices[index];
        let (area_x, area_width) = columns.area(column_state.item_indices[index]);
        let (area_y, area_height) = rows.area(row_state.item_indices[index]);

        let inline_alignment = resolve_axis_alignment(
            &item.style,
            GridAxis::Column,
            inputs.items_alignment(GridAxis::Column),
            inputs.direction,
        );
        let block_alignment = resolve_axis_alignment(
            &item.style,
            GridAxis::Row,
            inputs.items_alignment(GridAxis::Row),
            inputs.direction,
        );

        let constraints = ItemConstraints {
            available_inline_size: area_width,
            available_block_size: area_height,
            inline_margin_sum: item.style.margins.sum(GridAxis::Column),
            block_margin_sum: item.style.margins.sum(GridAxis::Row),
            stretch_inline: inline_alignment.is_stretched,
            stretch_block: block_alignment.is_stretched,
        };
        let fragment = item
            .node
            .layout(&constraints)
            .with_context(|| format!("laying out grid item {item_index}"))?;

        let x = area_x
            + axis_offset(
                &item.style,
                GridAxis::Column,
                area_width,
                fragment.inline_size,
                inline_alignment,
            );
        let y = area_y
            + axis_offset(
                &item.style,
                GridAxis::Row,
                area_height,
                fragment.block_size,
                block_alignment,
            );

        tracing::trace!(
            "layout_grid: item={}, area={:?}, rect=({}, {}, {}, {})",
            item_index,
            placement.areas[index],
            x,
            y,
            fragment.inline_size,
            fragment.block_size
        );

        placed_items.push(GridPlacedItem {
            item_index,
            x,
            y,
            width: fragment.inline_size,
            height: fragment.block_size,
            area: placement.areas[index],
        });
    }

    let out_of_flow = out_of_flow
        .iter()
        .map(|&(item_index, _)| GridOutOfFlowItem {
            item_index,
            static_x: inputs.border_padding.inline_start,
            static_y: inputs.border_padding.block_start,
        })
        .collect();

    tracing::debug!(
        "layout_grid: {} items, intrinsic size {}x{}",
        placed_items.len(),
        intrinsic_inline_size,
        intrinsic_block_size
    );

    Ok(GridLayoutResult {
        items: placed_items,
        out_of_flow,
        columns,
        rows,
        intrinsic_inline_size,
        intrinsic_block_size,
    })
}

fn axis_offset(
    style: &GridItemStyle,
    axis: GridAxis,
    area_size: f32,
    size: f32,
    alignment: AxisAlignment,
) -> f32 {
    let (margin_start, margin_end) = style.margins.for_axis(axis);
    alignment_offset(
        area_size,
        size,
        margin_start.resolved(),
        margin_end.resolved(),
        alignment.edge,
    )
}
