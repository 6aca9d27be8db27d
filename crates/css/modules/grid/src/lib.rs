//! CSS Grid Layout Module Level 2
//! Spec: <https://www.w3.org/TR/css-grid-2/>
//!
//! This crate implements the grid track sizing engine: it expands track
//! templates, places items, sizes content-based tracks from the items
//! spanning them and positions every item in its grid area. Children are
//! only seen through the [`GridItemNode`] capability trait.

// Saturating layout arithmetic
pub mod units;

// Grid container and item types
pub mod types;
pub use types::{
    AxisEdge, Direction, EdgeInsets, GapSize, GridAutoFlow, GridAxis, GridAxisTracks, GridItemStyle,
    GridLine, GridPlacement, GridTrack, GridTrackSize, ItemMargins, ItemPosition, MarginValue,
    TrackBreadth, TrackList, TrackListEntry, TrackListType, TrackRepeat,
};

// Child measurement and layout interface
pub mod node;
pub use node::{GridItemNode, ItemConstraints, ItemFragment, MeasureInput, MinMaxSizes, StaticNode};

// Grid placement algorithm
pub mod placement;
pub use placement::{GridArea, GridSpan, PlacementResult, resolve_item_spans};

// Track sizing algorithm
pub mod track_sizing;
pub use track_sizing::{
    AxisCollection, ContributionType, ExpandedTracks, GridSet, ResolvedTrackSizes, SizingItem,
    TrackRange, TrackSizingParams, distribute_extra_space, expand_track_list, resolve_track_sizes,
};

// Self-alignment
mod alignment;
pub use alignment::{AxisAlignment, alignment_offset, resolve_axis_alignment};

// Grid layout algorithm
mod layout;
pub use layout::{
    GridAxisGeometry, GridContainerInputs, GridItem, GridLayoutResult, GridOutOfFlowItem,
    GridPlacedItem, layout_grid,
};
