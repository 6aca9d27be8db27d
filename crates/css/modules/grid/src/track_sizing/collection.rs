//! Ranges and sets: the compressed track representation sized by the engine.
//!
//! A *range* is a run of consecutive tracks with one sizing function that no
//! item span starts or ends inside. Each range owns one *set*, which is sized
//! as a whole and split evenly between its tracks afterwards.

use crate::placement::GridSpan;
use crate::types::{GridAxis, GridTrackSize};
use crate::units::saturating_mul;

use super::expansion::ExpandedTracks;

/// A run of uniform tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRange {
    /// Index of the first track
    pub start_line: usize,
    /// Number of tracks in the range
    pub track_count: usize,
    /// Index of the set sizing this range
    pub set_index: usize,
    /// Empty `auto-fit` tracks
    pub is_collapsed: bool,
}

impl TrackRange {
    /// One past the last track.
    pub fn end_line(&self) -> usize {
        self.start_line + self.track_count
    }
}

/// Sizing state of one set of tracks. Sizes cover all tracks of the set.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSet {
    pub track_size: GridTrackSize,
    pub track_count: usize,
    pub base_size: f32,
    /// `None` is an infinite growth limit
    pub growth_limit: Option<f32>,
    /// Resolved `fit-content()` argument times the track count
    pub fit_content_limit: Option<f32>,
    pub planned_increase: f32,
    pub item_incurred_increase: f32,
    pub is_infinitely_growable: bool,
    pub is_collapsed: bool,
}

impl GridSet {
    /// Create a set with its sizes initialized against `percentage_basis`.
    pub fn new(
        track_size: GridTrackSize,
        track_count: usize,
        is_collapsed: bool,
        percentage_basis: Option<f32>,
    ) -> Self {
        let mut set = Self {
            track_size,
            track_count,
            base_size: 0.0,
            growth_limit: None,
            fit_content_limit: None,
            planned_increase: 0.0,
            item_incurred_increase: 0.0,
            is_infinitely_growable: false,
            is_collapsed,
        };
        set.initialize(percentage_basis);
        set
    }

    /// Reset sizes from the sizing function.
    ///
    /// Spec: §12.4 Initialize Track Sizes
    ///
    /// A fixed minimum becomes the base size, otherwise zero. A fixed maximum
    /// becomes the growth limit, floored by the base size, otherwise the
    /// limit is infinite. Collapsed tracks are fixed at zero.
    pub fn initialize(&mut self, percentage_basis: Option<f32>) {
        self.planned_increase = 0.0;
        self.item_incurred_increase = 0.0;
        self.is_infinitely_growable = false;

        if self.is_collapsed {
            self.base_size = 0.0;
            self.growth_limit = Some(0.0);
            self.fit_content_limit = None;
            return;
        }

        let count = self.track_count;
        self.base_size = self
            .track_size
            .min_breadth()
            .resolve(percentage_basis)
            .map_or(0.0, |min| saturating_mul(min, count));
        let base = self.base_size;
        self.growth_limit = self
            .track_size
            .max_breadth()
            .resolve(percentage_basis)
            .map(|max| saturating_mul(max, count).max(base));
        self.fit_content_limit = self
            .track_size
            .fit_content_limit(percentage_basis)
            .map(|limit| saturating_mul(limit, count));
    }

    /// Growth limit, or the base size while the limit is infinite.
    pub fn growth_limit_or_base(&self) -> f32 {
        self.growth_limit.unwrap_or(self.base_size)
    }

    pub fn is_flexible(&self) -> bool {
        self.track_size.has_flex_max_track_breadth()
    }

    /// Size of one track of this set.
    pub fn track_base_size(&self) -> f32 {
        if self.track_count == 0 {
            0.0
        } else {
            self.base_size / self.track_count as f32
        }
    }
}

/// Range of set indices `[begin, end)` an item spans on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetIndices {
    pub begin: usize,
    pub end: usize,
}

/// Ranges and sets of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisCollection {
    axis: GridAxis,
    ranges: Vec<TrackRange>,
    sets: Vec<GridSet>,
    explicit_start: usize,
    track_count: usize,
}

impl AxisCollection {
    /// Split `expanded` into ranges at every sizing-function change and at
    /// every item span boundary, and create one set per range.
    ///
    /// Percentage breadths are treated as `auto` when `percentage_basis` is
    /// indefinite. `auto-fit` tracks no span covers are collapsed.
    pub fn build(
        axis: GridAxis,
        expanded: &ExpandedTracks,
        spans: &[GridSpan],
        percentage_basis: Option<f32>,
    ) -> Self {
        let tracks = &expanded.tracks;
        let track_count = tracks.len();

        let mut coverage = vec![0_i64; track_count + 1];
        for span in spans {
            let end = span.end.min(track_count);
            if span.start < end {
                coverage[span.start] += 1;
                coverage[end] -= 1;
            }
        }
        let mut running = 0;
        let occupied: Vec<bool> = coverage[..track_count]
            .iter()
            .map(|delta| {
                running += delta;
                running > 0
            })
            .collect();
        let is_collapsed = |index: usize| tracks[index].is_auto_fit && !occupied[index];

        let mut boundaries = vec![0, track_count];
        boundaries.extend(
            spans
                .iter()
                .flat_map(|span| [span.start, span.end])
                .filter(|&line| line <= track_count),
        );
        boundaries.extend((1..track_count).filter(|&index| {
            let (previous, current) = (&tracks[index - 1], &tracks[index]);
            previous.size != current.size
                || previous.track_type != current.track_type
                || is_collapsed(index - 1) != is_collapsed(index)
        }));
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut ranges = Vec::with_capacity(boundaries.len());
        let mut sets = Vec::with_capacity(boundaries.len());
        for window in boundaries.windows(2) {
            let (start_line, end_line) = (window[0], window[1]);
            let first = &tracks[start_line];
            let collapsed = is_collapsed(start_line);
            let size = if percentage_basis.is_some() {
                first.size
            } else {
                first.size.with_indefinite_percentages_as_auto()
            };
            ranges.push(TrackRange {
                start_line,
                track_count: end_line - start_line,
                set_index: sets.len(),
                is_collapsed: collapsed,
            });
            sets.push(GridSet::new(
                size,
                end_line - start_line,
                collapsed,
                percentage_basis,
            ));
        }

        tracing::debug!(
            "AxisCollection::build: axis={:?}, tracks={}, ranges={}, spans={}",
            axis,
            track_count,
            ranges.len(),
            spans.len()
        );

        Self {
            axis,
            ranges,
            sets,
            explicit_start: expanded.explicit_start,
            track_count,
        }
    }

    pub fn axis(&self) -> GridAxis {
        self.axis
    }

    pub fn ranges(&self) -> &[TrackRange] {
        &self.ranges
    }

    pub fn sets(&self) -> &[GridSet] {
        &self.sets
    }

    pub fn sets_mut(&mut self) -> &mut [GridSet] {
        &mut self.sets
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Total number of tracks.
    pub fn track_count(&self) -> usize {
        self.track_count
    }

    /// Index of the first explicit track.
    pub fn explicit_start(&self) -> usize {
        self.explicit_start
    }

    /// Tracks that take space (not collapsed).
    pub fn non_collapsed_track_count(&self) -> usize {
        self.ranges
            .iter()
            .filter(|range| !range.is_collapsed)
            .map(|range| range.track_count)
            .sum()
    }

    /// Index of the range containing track `line`.
    pub fn range_index_for_line(&self, line: usize) -> usize {
        let index = self.ranges.partition_point(|range| range.end_line() <= line);
        debug_assert!(index < self.ranges.len(), "track {line} is outside the grid");
        index
    }

    /// Set indices covered by `span`.
    ///
    /// Both span ends are range boundaries by construction, so the span maps
    /// onto whole sets.
    pub fn cache_item_set_indices(&self, span: GridSpan) -> SetIndices {
        let begin = self.range_index_for_line(span.start);
        let end = self.range_index_for_line(span.end - 1) + 1;
        debug_assert_eq!(self.ranges[begin].start_line, span.start);
        debug_assert_eq!(self.ranges[end - 1].end_line(), span.end);
        SetIndices {
            begin: self.ranges[begin].set_index,
            end: self.ranges[end - 1].set_index + 1,
        }
    }
}
