//! Track definition resolution: repeat expansion and implicit tracks.
//!
//! Spec: §7.2.3 Repeating Rows and Columns, §7.6 Implicit Track Sizing

use crate::placement::MAX_GRID_LINE;
use crate::types::{
    GridAxisTracks, GridTrack, GridTrackSize, TrackList, TrackListEntry, TrackRepeat,
};
use crate::units::{saturating_add, saturating_mul, saturating_sum};

/// The full track list of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedTracks {
    /// Every track, implicit ones included, in line order
    pub tracks: Vec<GridTrack>,
    /// Index of the first explicit track
    pub explicit_start: usize,
    /// Number of explicit tracks
    pub explicit_count: usize,
}

/// Size used for one track when counting repetitions: the max sizing
/// function if definite, else the min, floored by the min when both are.
fn repetition_track_size(size: &GridTrackSize, basis: Option<f32>) -> f32 {
    let min = size.min_breadth().resolve(basis);
    let max = size.max_breadth().resolve(basis);
    match (min, max) {
        (Some(lower), Some(upper)) => lower.max(upper),
        (None, Some(fixed)) | (Some(fixed), None) => fixed,
        (None, None) => 0.0,
    }
}

/// Number of times the `auto-fill`/`auto-fit` repeater repeats.
///
/// Spec: §7.2.3.2 Repeat-to-fill: auto-fill and auto-fit repetitions
///
/// Returns 0 when there is no automatic repeater and 1 when the available
/// size is indefinite. Otherwise the largest count that does not overflow,
/// never less than one.
pub fn auto_repetitions(axis_tracks: &GridAxisTracks, available_size: Option<f32>) -> usize {
    let Some(repeat) = axis_tracks.template.auto_repeat() else {
        return 0;
    };
    let repeat_len = repeat.sizes().len();
    if repeat_len == 0 {
        return 0;
    }
    let Some(available) = available_size else {
        return 1;
    };

    let gap = axis_tracks.gap.resolve(available_size);
    let line_limit = MAX_GRID_LINE as usize;
    let mut other_size = 0.0;
    let mut other_count = 0_usize;
    for entry in &axis_tracks.template.entries {
        match entry {
            TrackListEntry::Single(size) => {
                let track = repetition_track_size(size, available_size);
                other_size = saturating_add(other_size, track);
                other_count = other_count.saturating_add(1);
            }
            TrackListEntry::Repeat(TrackRepeat::Count(count, sizes)) => {
                let one = saturating_sum(
                    sizes
                        .iter()
                        .map(|size| repetition_track_size(size, available_size)),
                );
                other_size = saturating_add(other_size, saturating_mul(one, *count));
                other_count = other_count.saturating_add(count.saturating_mul(sizes.len()));
            }
            TrackListEntry::Repeat(_) => {}
        }
    }
    let other_count = other_count.min(line_limit);

    let repeat_size: f32 = repeat
        .sizes()
        .iter()
        .map(|size| repetition_track_size(size, available_size))
        .sum();
    let per_repetition = gap.mul_add(repeat_len as f32, repeat_size);
    if per_repetition <= 0.0 {
        return 1;
    }

    // other + r * repeat + gap * (other_count + r * repeat_len - 1) <= available
    let free = gap.mul_add(1.0 - other_count as f32, available - other_size);
    let max_repetitions = (line_limit / repeat_len).max(1);
    let repetitions = (free / per_repetition).floor().max(1.0) as usize;
    tracing::debug!(
        "auto_repetitions: available={available}, per_repetition={per_repetition}, repetitions={repetitions}"
    );
    repetitions.min(max_repetitions)
}

fn push_repeated(tracks: &mut Vec<GridTrack>, sizes: &[GridTrackSize], times: usize, is_auto_fit: bool) {
    if sizes.is_empty() {
        return;
    }
    let limit = MAX_GRID_LINE as usize;
    for _ in 0..times {
        for size in sizes {
            if tracks.len() >= limit {
                return;
            }
            tracks.push(GridTrack {
                is_auto_fit,
                ..GridTrack::explicit(*size)
            });
        }
    }
}

/// Flatten a template into explicit tracks.
///
/// Only the first automatic repeater is expanded. The list is capped at the
/// maximum number of grid lines.
pub fn explicit_tracks(template: &TrackList, auto_repetitions: usize) -> Vec<GridTrack> {
    let mut tracks = Vec::new();
    let mut seen_auto = false;

    for entry in &template.entries {
        match entry {
            TrackListEntry::Single(size) => push_repeated(&mut tracks, &[*size], 1, false),
            TrackListEntry::Repeat(TrackRepeat::Count(count, sizes)) => {
                push_repeated(&mut tracks, sizes, *count, false);
            }
            TrackListEntry::Repeat(repeat) => {
                if seen_auto {
                    continue;
                }
                seen_auto = true;
                let is_auto_fit = matches!(repeat, TrackRepeat::AutoFit(_));
                push_repeated(&mut tracks, repeat.sizes(), auto_repetitions, is_auto_fit);
            }
        }
    }

    tracks
}

/// Surround the explicit tracks with implicit ones.
///
/// `start_offset` implicit tracks precede the explicit grid and the list is
/// padded to `total_count`. Implicit sizes cycle through `grid-auto-*`:
/// forward after the explicit grid, backward before it.
pub fn expand_track_list(
    axis_tracks: &GridAxisTracks,
    explicit: Vec<GridTrack>,
    start_offset: usize,
    total_count: usize,
) -> ExpandedTracks {
    let fallback = [GridTrackSize::auto()];
    let auto_sizes: &[GridTrackSize] = if axis_tracks.auto_tracks.is_empty() {
        &fallback
    } else {
        &axis_tracks.auto_tracks
    };
    let cycle = auto_sizes.len();

    let explicit_count = explicit.len();
    let total_count = total_count.max(start_offset + explicit_count);
    let mut tracks = Vec::with_capacity(total_count);

    tracks.extend((0..start_offset).map(|position| {
        let distance = start_offset - position;
        GridTrack::implicit(auto_sizes[(cycle - distance % cycle) % cycle])
    }));
    tracks.extend(explicit);
    let trailing = total_count - tracks.len();
    tracks.extend((0..trailing).map(|position| GridTrack::implicit(auto_sizes[position % cycle])));

    tracing::trace!(
        "expand_track_list: {start_offset} leading, {explicit_count} explicit, {trailing} trailing"
    );

    ExpandedTracks {
        tracks,
        explicit_start: start_offset,
        explicit_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GapSize, TrackBreadth, TrackListType};

    fn repeat_axis(repeat: TrackRepeat, gap: f32) -> GridAxisTracks {
        GridAxisTracks::new(
            TrackList::new(vec![TrackListEntry::Repeat(repeat)]),
            GapSize::Length(gap),
        )
    }

    /// Auto-fill with `minmax(200px, 1fr)` counts the min as the fixed size.
    ///
    /// # Panics
    /// Panics if the repetition count is wrong.
    #[test]
    fn test_auto_fill_repetitions() {
        let track = GridTrackSize::MinMax(TrackBreadth::Length(200.0), TrackBreadth::Flex(1.0));
        let axis = repeat_axis(TrackRepeat::AutoFill(vec![track]), 10.0);

        // 2 * 200 + 10 = 410 fits in 569, 3 * 200 + 20 = 620 needs 620.
        assert_eq!(auto_repetitions(&axis, Some(569.0)), 2);
        assert_eq!(auto_repetitions(&axis, Some(620.0)), 3);
        assert_eq!(auto_repetitions(&axis, Some(50.0)), 1);
        assert_eq!(auto_repetitions(&axis, None), 1);
    }

    /// Non-repeated tracks and their gutters are subtracted first.
    ///
    /// # Panics
    /// Panics if fixed tracks are not accounted for.
    #[test]
    fn test_auto_fill_with_fixed_tracks() {
        let axis = GridAxisTracks::new(
            TrackList::new(vec![
                TrackListEntry::Single(GridTrackSize::length(100.0)),
                TrackListEntry::Repeat(TrackRepeat::AutoFit(vec![GridTrackSize::length(50.0)])),
            ]),
            GapSize::Length(10.0),
        );
        // 100 + 10 + r * 60 <= 300 -> r = 3
        assert_eq!(auto_repetitions(&axis, Some(300.0)), 3);

        let tracks = explicit_tracks(&axis.template, 3);
        assert_eq!(tracks.len(), 4);
        assert!(!tracks[0].is_auto_fit);
        assert!(tracks[1..].iter().all(|track| track.is_auto_fit));
    }

    /// Implicit tracks cycle through the auto track list in both directions.
    ///
    /// # Panics
    /// Panics if implicit sizes are assigned in the wrong order.
    #[test]
    fn test_implicit_track_cycling() {
        let first = GridTrackSize::length(10.0);
        let second = GridTrackSize::length(20.0);
        let axis = GridAxisTracks::from_sizes([GridTrackSize::length(99.0)], 0.0)
            .with_auto_tracks(vec![first, second]);
        let explicit = explicit_tracks(&axis.template, 0);
        let expanded = expand_track_list(&axis, explicit, 3, 7);

        let sizes: Vec<_> = expanded.tracks.iter().map(|track| track.size).collect();
        assert_eq!(
            sizes,
            vec![second, first, second, GridTrackSize::length(99.0), first, second, first]
        );
        assert_eq!(expanded.explicit_start, 3);
        assert_eq!(expanded.explicit_count, 1);
        assert_eq!(expanded.tracks[3].track_type, TrackListType::Explicit);
        assert_eq!(expanded.tracks[0].track_type, TrackListType::Implicit);
    }

    /// A zero repeat count contributes no tracks.
    ///
    /// # Panics
    /// Panics if an empty repeat produces tracks.
    #[test]
    fn test_zero_repeat_count() {
        let template = TrackList::new(vec![TrackListEntry::Repeat(TrackRepeat::Count(
            0,
            vec![GridTrackSize::auto()],
        ))]);
        assert!(explicit_tracks(&template, 0).is_empty());
    }

    /// Huge repeat counts saturate instead of overflowing, and an empty
    /// repeat group is skipped without iterating its count.
    ///
    /// # Panics
    /// Panics if the counts overflow or the expansion does not terminate.
    #[test]
    fn test_huge_repeat_counts() {
        let axis = GridAxisTracks::new(
            TrackList::new(vec![
                TrackListEntry::Repeat(TrackRepeat::Count(
                    usize::MAX,
                    vec![GridTrackSize::auto(); 2],
                )),
                TrackListEntry::Repeat(TrackRepeat::AutoFill(vec![GridTrackSize::length(10.0)])),
            ]),
            GapSize::Length(1.0),
        );
        // The fixed tracks alone fill past the line limit, so one repetition.
        assert_eq!(auto_repetitions(&axis, Some(100.0)), 1);

        let tracks = explicit_tracks(&axis.template, 1);
        assert_eq!(tracks.len(), MAX_GRID_LINE as usize);

        let empty = TrackList::new(vec![
            TrackListEntry::Repeat(TrackRepeat::Count(usize::MAX, Vec::new())),
            TrackListEntry::Single(GridTrackSize::length(30.0)),
        ]);
        let tracks = explicit_tracks(&empty, 0);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].size, GridTrackSize::length(30.0));
    }
}
