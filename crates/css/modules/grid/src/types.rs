//! Grid container and item type definitions.
//!
//! Spec: CSS Grid Layout Module Level 2
//! <https://www.w3.org/TR/css-grid-2/>

use serde::{Deserialize, Serialize};

/// Axis identifier (row or column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridAxis {
    /// Column axis: tracks are columns, sized along the inline dimension.
    Column,
    /// Row axis: tracks are rows, sized along the block dimension.
    Row,
}

impl GridAxis {
    /// Whether this axis runs along the inline dimension.
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Column)
    }
}

/// Represents a track breadth in the grid.
///
/// Spec: §7.2.1 Track Sizing Functions
/// <https://www.w3.org/TR/css-grid-2/#track-sizing>
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackBreadth {
    /// Length in pixels
    Length(f32),
    /// Fraction of the grid container's content size (`0.5` is `50%`)
    Percentage(f32),
    /// Flex factor (fr units)
    Flex(f32),
    /// Minimum content size
    MinContent,
    /// Maximum content size
    MaxContent,
    /// Automatic sizing
    Auto,
}

impl TrackBreadth {
    /// Check if this breadth is intrinsic (depends on content).
    pub fn is_intrinsic(&self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent | Self::Auto)
    }

    /// Check if this breadth is flexible (uses fr units).
    pub fn is_flexible(&self) -> bool {
        matches!(self, Self::Flex(_))
    }

    /// Check if this breadth resolves to a length without looking at content.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Length(_) | Self::Percentage(_))
    }

    /// Resolve a fixed breadth against a percentage basis.
    ///
    /// Returns `None` for intrinsic and flexible breadths, and for percentages
    /// when the basis is indefinite.
    pub fn resolve(&self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(len) => Some(len.max(0.0)),
            Self::Percentage(pct) => basis.map(|size| (size * pct).max(0.0)),
            _ => None,
        }
    }
}

/// Track sizing function.
///
/// Spec: §7.2.1 Track Sizing Functions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridTrackSize {
    /// Single breadth used as both minimum and maximum
    Breadth(TrackBreadth),
    /// minmax(min, max)
    MinMax(TrackBreadth, TrackBreadth),
    /// fit-content(limit)
    FitContent(TrackBreadth),
}

impl Default for GridTrackSize {
    fn default() -> Self {
        Self::Breadth(TrackBreadth::Auto)
    }
}

impl GridTrackSize {
    /// Shorthand for a fixed pixel track.
    pub fn length(px: f32) -> Self {
        Self::Breadth(TrackBreadth::Length(px))
    }

    /// Shorthand for an `auto` track.
    pub fn auto() -> Self {
        Self::Breadth(TrackBreadth::Auto)
    }

    /// Shorthand for an `Nfr` track.
    pub fn flex(factor: f32) -> Self {
        Self::Breadth(TrackBreadth::Flex(factor))
    }

    /// Get the minimum breadth for this track size.
    ///
    /// A flexible minimum is invalid and behaves as `auto`; `fit-content()`
    /// has an `auto` minimum.
    pub fn min_breadth(&self) -> TrackBreadth {
        match self {
            Self::Breadth(breadth) | Self::MinMax(breadth, _) => {
                if breadth.is_flexible() {
                    TrackBreadth::Auto
                } else {
                    *breadth
                }
            }
            Self::FitContent(_) => TrackBreadth::Auto,
        }
    }

    /// Get the maximum breadth for this track size.
    ///
    /// `fit-content()` behaves as `max-content` clamped by its limit.
    pub fn max_breadth(&self) -> TrackBreadth {
        match self {
            Self::Breadth(breadth) | Self::MinMax(_, breadth) => *breadth,
            Self::FitContent(_) => TrackBreadth::MaxContent,
        }
    }

    /// The `fit-content()` limit, resolved against the percentage basis.
    pub fn fit_content_limit(&self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::FitContent(limit) => limit.resolve(basis),
            _ => None,
        }
    }

    /// Whether the minimum breadth is a length or percentage.
    pub fn has_fixed_min_track_breadth(&self) -> bool {
        self.min_breadth().is_fixed()
    }

    /// Whether the maximum breadth is a length or percentage.
    pub fn has_fixed_max_track_breadth(&self) -> bool {
        self.max_breadth().is_fixed()
    }

    pub fn has_intrinsic_min_track_breadth(&self) -> bool {
        self.min_breadth().is_intrinsic()
    }

    pub fn has_min_or_max_content_min_track_breadth(&self) -> bool {
        matches!(
            self.min_breadth(),
            TrackBreadth::MinContent | TrackBreadth::MaxContent
        )
    }

    pub fn has_max_content_min_track_breadth(&self) -> bool {
        matches!(self.min_breadth(), TrackBreadth::MaxContent)
    }

    pub fn has_auto_min_track_breadth(&self) -> bool {
        matches!(self.min_breadth(), TrackBreadth::Auto)
    }

    pub fn has_intrinsic_max_track_breadth(&self) -> bool {
        self.max_breadth().is_intrinsic()
    }

    pub fn has_max_content_max_track_breadth(&self) -> bool {
        matches!(self.max_breadth(), TrackBreadth::MaxContent)
    }

    pub fn has_max_content_or_auto_max_track_breadth(&self) -> bool {
        matches!(
            self.max_breadth(),
            TrackBreadth::MaxContent | TrackBreadth::Auto
        )
    }

    pub fn has_flex_max_track_breadth(&self) -> bool {
        self.max_breadth().is_flexible()
    }

    /// Whether either breadth depends on content.
    pub fn is_intrinsic(&self) -> bool {
        self.has_intrinsic_min_track_breadth() || self.has_intrinsic_max_track_breadth()
    }

    /// Replace percentage breadths with `auto`.
    ///
    /// Percentages resolved against an indefinite size are treated as `auto`.
    /// The `fit-content()` argument is kept; it resolves to no limit instead.
    #[must_use]
    pub fn with_indefinite_percentages_as_auto(self) -> Self {
        let fix = |breadth: TrackBreadth| match breadth {
            TrackBreadth::Percentage(_) => TrackBreadth::Auto,
            other => other,
        };
        match self {
            Self::Breadth(breadth) => Self::Breadth(fix(breadth)),
            Self::MinMax(min, max) => Self::MinMax(fix(min), fix(max)),
            Self::FitContent(limit) => Self::FitContent(limit),
        }
    }
}

/// Repeat pattern for track lists.
///
/// Spec: §7.2.3 Repeating Rows and Columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackRepeat {
    /// repeat(count, track-list); a count of zero produces no tracks
    Count(usize, Vec<GridTrackSize>),
    /// repeat(auto-fill, track-list)
    AutoFill(Vec<GridTrackSize>),
    /// repeat(auto-fit, track-list)
    AutoFit(Vec<GridTrackSize>),
}

impl TrackRepeat {
    /// Check if the repetition count depends on the available space.
    pub fn is_automatic(&self) -> bool {
        matches!(self, Self::AutoFill(_) | Self::AutoFit(_))
    }

    /// The repeated track sizes.
    pub fn sizes(&self) -> &[GridTrackSize] {
        match self {
            Self::Count(_, sizes) | Self::AutoFill(sizes) | Self::AutoFit(sizes) => sizes,
        }
    }
}

/// One entry of a `grid-template-rows/columns` track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackListEntry {
    /// A single track
    Single(GridTrackSize),
    /// A repeated group of tracks
    Repeat(TrackRepeat),
}

/// Explicit track template for one axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackList {
    /// Entries in template order
    pub entries: Vec<TrackListEntry>,
}

impl TrackList {
    /// Create a track list from explicit entries.
    pub fn new(entries: Vec<TrackListEntry>) -> Self {
        Self { entries }
    }

    /// Create a track list of single tracks.
    pub fn from_sizes(sizes: impl IntoIterator<Item = GridTrackSize>) -> Self {
        Self {
            entries: sizes.into_iter().map(TrackListEntry::Single).collect(),
        }
    }

    /// The automatic (`auto-fill`/`auto-fit`) repeater, if any.
    ///
    /// Only the first automatic repeater is honoured.
    pub fn auto_repeat(&self) -> Option<&TrackRepeat> {
        self.entries.iter().find_map(|entry| match entry {
            TrackListEntry::Repeat(repeat) if repeat.is_automatic() => Some(repeat),
            _ => None,
        })
    }

    /// Number of explicit tracks given `auto_repetitions` of the automatic repeater.
    pub fn track_count(&self, auto_repetitions: usize) -> usize {
        let mut seen_auto = false;
        self.entries
            .iter()
            .map(|entry| match entry {
                TrackListEntry::Single(_) => 1,
                TrackListEntry::Repeat(TrackRepeat::Count(count, sizes)) => {
                    count.saturating_mul(sizes.len())
                }
                TrackListEntry::Repeat(repeat) => {
                    if seen_auto {
                        0
                    } else {
                        seen_auto = true;
                        auto_repetitions.saturating_mul(repeat.sizes().len())
                    }
                }
            })
            .fold(0_usize, usize::saturating_add)
    }
}

/// Type of track list (explicit or implicit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackListType {
    /// Explicit tracks from grid-template-*
    Explicit,
    /// Implicit tracks from grid-auto-*
    Implicit,
}

/// A single track slot produced by expanding a template.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTrack {
    /// Track sizing function
    pub size: GridTrackSize,
    /// Track type
    pub track_type: TrackListType,
    /// Whether this track came from an `auto-fit` repeater (collapses if empty)
    pub is_auto_fit: bool,
}

impl GridTrack {
    /// An explicit track.
    pub fn explicit(size: GridTrackSize) -> Self {
        Self {
            size,
            track_type: TrackListType::Explicit,
            is_auto_fit: false,
        }
    }

    /// An implicit track.
    pub fn implicit(size: GridTrackSize) -> Self {
        Self {
            size,
            track_type: TrackListType::Implicit,
            is_auto_fit: false,
        }
    }
}

/// Gutter between adjacent tracks.
///
/// Spec: CSS Box Alignment §8 Gaps Between Boxes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapSize {
    /// `normal`, which is zero for grid containers
    #[default]
    Normal,
    /// Length in pixels
    Length(f32),
    /// Fraction of the container's content size on that axis
    Percentage(f32),
}

impl GapSize {
    /// Resolve the gutter; an unresolvable percentage becomes zero.
    pub fn resolve(self, basis: Option<f32>) -> f32 {
        match self {
            Self::Normal => 0.0,
            Self::Length(len) => len.max(0.0),
            Self::Percentage(pct) => basis.map_or(0.0, |size| (size * pct).max(0.0)),
        }
    }

    /// Whether this gutter cannot be resolved against `basis`.
    pub fn is_unresolvable(self, basis: Option<f32>) -> bool {
        matches!(self, Self::Percentage(_)) && basis.is_none()
    }
}

/// Track definitions for one axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridAxisTracks {
    /// Explicit template (`grid-template-columns/rows`)
    pub template: TrackList,
    /// Implicit track sizes (`grid-auto-columns/rows`); empty means `auto`
    #[serde(default)]
    pub auto_tracks: Vec<GridTrackSize>,
    /// Gutter between tracks
    #[serde(default)]
    pub gap: GapSize,
}

impl GridAxisTracks {
    /// Create a new axis tracks definition.
    pub fn new(template: TrackList, gap: GapSize) -> Self {
        Self {
            template,
            auto_tracks: Vec::new(),
            gap,
        }
    }

    /// Create an axis of single tracks with a pixel gutter.
    pub fn from_sizes(sizes: impl IntoIterator<Item = GridTrackSize>, gap: f32) -> Self {
        Self::new(TrackList::from_sizes(sizes), GapSize::Length(gap))
    }

    /// Set the implicit track sizes.
    #[must_use]
    pub fn with_auto_tracks(mut self, auto_tracks: Vec<GridTrackSize>) -> Self {
        self.auto_tracks = auto_tracks;
        self
    }
}

/// Auto-placement algorithm direction.
///
/// Spec: §8.5 Grid Item Placement Algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridAutoFlow {
    /// Place items row by row
    #[default]
    Row,
    /// Place items column by column
    Column,
    /// Pack items densely (try to fill holes)
    RowDense,
    /// Pack items densely in columns
    ColumnDense,
}

impl GridAutoFlow {
    /// The axis whose lines the auto-placement cursor walks along.
    pub fn major_axis(self) -> GridAxis {
        match self {
            Self::Row | Self::RowDense => GridAxis::Row,
            Self::Column | Self::ColumnDense => GridAxis::Column,
        }
    }

    /// Check if this uses dense packing.
    pub fn is_dense(self) -> bool {
        matches!(self, Self::RowDense | Self::ColumnDense)
    }
}

/// One side of an item's placement on an axis.
///
/// Spec: §8.3 Line-based Placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridLine {
    /// Auto placement
    #[default]
    Auto,
    /// Line number (1-based, negative counts from the explicit end line)
    Line(i32),
    /// Span a number of tracks
    Span(u32),
}

/// An item's start/end placement on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridPlacement {
    /// `grid-*-start`
    #[serde(default)]
    pub start: GridLine,
    /// `grid-*-end`
    #[serde(default)]
    pub end: GridLine,
}

impl GridPlacement {
    /// Create a placement from both sides.
    pub fn new(start: GridLine, end: GridLine) -> Self {
        Self { start, end }
    }

    /// `start / end` with line numbers.
    pub fn lines(start: i32, end: i32) -> Self {
        Self::new(GridLine::Line(start), GridLine::Line(end))
    }

    /// `span N` with an automatic start.
    pub fn span(count: u32) -> Self {
        Self::new(GridLine::Span(count), GridLine::Auto)
    }
}

/// Self-alignment keyword (`justify-self`, `align-self`, `*-items`).
///
/// Spec: CSS Box Alignment §6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemPosition {
    /// Defer to the container's `*-items` value
    #[default]
    Auto,
    Normal,
    Start,
    End,
    Center,
    Stretch,
    Baseline,
    LastBaseline,
    SelfStart,
    SelfEnd,
    FlexStart,
    FlexEnd,
    Left,
    Right,
}

/// The edge an item is aligned to within its grid area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisEdge {
    #[default]
    Start,
    Center,
    End,
    /// Approximated as start alignment
    Baseline,
}

/// Inline base direction of the grid container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// A margin that may be `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarginValue {
    /// Length in pixels
    Length(f32),
    /// `auto`
    Auto,
}

impl Default for MarginValue {
    fn default() -> Self {
        Self::Length(0.0)
    }
}

impl MarginValue {
    /// Used value; `auto` margins resolve to zero in grid layout.
    pub fn resolved(self) -> f32 {
        match self {
            Self::Length(len) => len,
            Self::Auto => 0.0,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Logical margins of a grid item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMargins {
    pub inline_start: MarginValue,
    pub inline_end: MarginValue,
    pub block_start: MarginValue,
    pub block_end: MarginValue,
}

impl ItemMargins {
    /// Margins of equal length on every side.
    pub fn uniform(len: f32) -> Self {
        let margin = MarginValue::Length(len);
        Self {
            inline_start: margin,
            inline_end: margin,
            block_start: margin,
            block_end: margin,
        }
    }

    /// Start and end margins along `axis`.
    pub fn for_axis(&self, axis: GridAxis) -> (MarginValue, MarginValue) {
        match axis {
            GridAxis::Column => (self.inline_start, self.inline_end),
            GridAxis::Row => (self.block_start, self.block_end),
        }
    }

    /// Sum of resolved start and end margins along `axis`.
    pub fn sum(&self, axis: GridAxis) -> f32 {
        let (start, end) = self.for_axis(axis);
        start.resolved() + end.resolved()
    }
}

/// Logical border + padding insets of the grid container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub inline_start: f32,
    pub inline_end: f32,
    pub block_start: f32,
    pub block_end: f32,
}

impl EdgeInsets {
    /// Start inset along `axis`.
    pub fn start(&self, axis: GridAxis) -> f32 {
        match axis {
            GridAxis::Column => self.inline_start,
            GridAxis::Row => self.block_start,
        }
    }

    /// End inset along `axis`.
    pub fn end(&self, axis: GridAxis) -> f32 {
        match axis {
            GridAxis::Column => self.inline_end,
            GridAxis::Row => self.block_end,
        }
    }
}

/// Grid-related style of one grid item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridItemStyle {
    /// `grid-column-start` / `grid-column-end`
    pub column: GridPlacement,
    /// `grid-row-start` / `grid-row-end`
    pub row: GridPlacement,
    /// `justify-self`
    pub justify_self: ItemPosition,
    /// `align-self`
    pub align_self: ItemPosition,
    pub margins: ItemMargins,
    /// `order`
    pub order: i32,
    /// Absolutely positioned children skip placement and sizing.
    pub is_out_of_flow: bool,
    /// Replaced elements default to start alignment instead of stretch.
    pub is_replaced: bool,
}

impl GridItemStyle {
    /// Placement on `axis`.
    pub fn placement(&self, axis: GridAxis) -> GridPlacement {
        match axis {
            GridAxis::Column => self.column,
            GridAxis::Row => self.row,
        }
    }

    /// Self-alignment on `axis`.
    pub fn self_alignment(&self, axis: GridAxis) -> ItemPosition {
        match axis {
            GridAxis::Column => self.justify_self,
            GridAxis::Row => self.align_self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if the breadth predicates disagree with the track size.
    #[test]
    fn test_track_size_predicates() {
        let fit = GridTrackSize::FitContent(TrackBreadth::Length(80.0));
        assert!(fit.has_auto_min_track_breadth());
        assert!(fit.has_max_content_or_auto_max_track_breadth());
        assert_eq!(fit.fit_content_limit(None), Some(80.0));

        let flex = GridTrackSize::flex(2.0);
        assert_eq!(flex.min_breadth(), TrackBreadth::Auto);
        assert!(flex.has_flex_max_track_breadth());
        assert!(!flex.has_intrinsic_max_track_breadth());

        let fixed = GridTrackSize::MinMax(TrackBreadth::Length(10.0), TrackBreadth::Percentage(0.5));
        assert!(fixed.has_fixed_min_track_breadth());
        assert!(fixed.has_fixed_max_track_breadth());
        assert!(!fixed.is_intrinsic());
    }

    /// # Panics
    /// Panics if indefinite percentages are not replaced with `auto`.
    #[test]
    fn test_indefinite_percentages_become_auto() {
        let size = GridTrackSize::MinMax(TrackBreadth::Percentage(0.2), TrackBreadth::Length(50.0));
        assert_eq!(
            size.with_indefinite_percentages_as_auto(),
            GridTrackSize::MinMax(TrackBreadth::Auto, TrackBreadth::Length(50.0))
        );
        assert_eq!(TrackBreadth::Percentage(0.5).resolve(None), None);
        assert_eq!(TrackBreadth::Percentage(0.5).resolve(Some(200.0)), Some(100.0));
    }

    /// # Panics
    /// Panics if the explicit track count is wrong.
    #[test]
    fn test_track_list_count() {
        let list = TrackList::new(vec![
            TrackListEntry::Single(GridTrackSize::length(10.0)),
            TrackListEntry::Repeat(TrackRepeat::Count(0, vec![GridTrackSize::auto()])),
            TrackListEntry::Repeat(TrackRepeat::Count(3, vec![GridTrackSize::auto(); 2])),
            TrackListEntry::Repeat(TrackRepeat::AutoFill(vec![GridTrackSize::length(20.0)])),
        ]);
        assert_eq!(list.track_count(0), 7);
        assert_eq!(list.track_count(4), 11);
        assert!(list.auto_repeat().is_some());
    }

    /// # Panics
    /// Panics if gap resolution is wrong.
    #[test]
    fn test_gap_resolution() {
        assert!((GapSize::Percentage(0.1).resolve(Some(300.0)) - 30.0).abs() < 1e-4);
        assert!(GapSize::Percentage(0.1).resolve(None).abs() < f32::EPSILON);
        assert!(GapSize::Percentage(0.1).is_unresolvable(None));
        assert!(!GapSize::Length(4.0).is_unresolvable(None));
    }
}
