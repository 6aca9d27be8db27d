//! Grid track sizing algorithm.
//!
//! Spec: §12 Grid Sizing
//! <https://www.w3.org/TR/css-grid-2/#algo-track-sizing>

mod collection;
mod distribution;
mod expansion;
mod helpers;
mod resolution;

use std::iter;

pub use collection::{AxisCollection, GridSet, SetIndices, TrackRange};
pub use distribution::distribute_extra_space;
pub use expansion::{ExpandedTracks, auto_repetitions, expand_track_list, explicit_tracks};
pub use helpers::{ContributionType, InfinitelyGrowableBehavior, growth_potential};
pub use resolution::SizingItem;

use resolution::{maximize_tracks, resolve_intrinsic_track_sizes};

/// Parameters for track sizing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackSizingParams {
    /// Gutter between tracks on this axis
    pub gap: f32,
    /// Definite content size of the container on this axis, if any
    pub available_size: Option<f32>,
    /// Basis for percentage track sizes
    pub percentage_basis: Option<f32>,
}

/// Resolved track sizes after running the track sizing algorithm.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedTrackSizes {
    /// Base size of each set
    pub base_sizes: Vec<f32>,
    /// Growth limit of each set; `None` only for flexible sets
    pub growth_limits: Vec<Option<f32>>,
    /// Number of tracks in each set
    pub track_counts: Vec<usize>,
}

impl ResolvedTrackSizes {
    /// Snapshot the sizes of `sets`.
    pub fn from_sets(sets: &[GridSet]) -> Self {
        Self {
            base_sizes: sets.iter().map(|set| set.base_size).collect(),
            growth_limits: sets.iter().map(|set| set.growth_limit).collect(),
            track_counts: sets.iter().map(|set| set.track_count).collect(),
        }
    }

    /// Get the final size for a set.
    pub fn final_size(&self, index: usize) -> f32 {
        self.base_sizes.get(index).copied().unwrap_or(0.0)
    }

    /// Size of every track, splitting each set evenly.
    pub fn track_sizes(&self) -> Vec<f32> {
        self.base_sizes
            .iter()
            .zip(&self.track_counts)
            .flat_map(|(&base, &count)| {
                let per_track = if count == 0 { 0.0 } else { base / count as f32 };
                iter::repeat_n(per_track, count)
            })
            .collect()
    }
}

/// Resolve track sizes according to the grid sizing algorithm.
///
/// Spec: §12.3 Track Sizing Algorithm
///
/// Initializes every set, resolves intrinsic sizes from `items` and, when
/// the axis has a definite available size, grows base sizes into the free
/// space up to their growth limits. Flexible sizing is not performed.
pub fn resolve_track_sizes(
    collection: &mut AxisCollection,
    items: &[SizingItem],
    params: &TrackSizingParams,
) -> ResolvedTrackSizes {
    tracing::debug!(
        "resolve_track_sizes: axis={:?}, sets={}, items={}, available={:?}",
        collection.axis(),
        collection.set_count(),
        items.len(),
        params.available_size
    );

    let sets = collection.sets_mut();
    for set in sets.iter_mut() {
        set.initialize(params.percentage_basis);
    }

    resolve_intrinsic_track_sizes(sets, items, params.gap);

    if let Some(available) = params.available_size {
        let left = maximize_tracks(sets, available, params.gap);
        tracing::debug!("resolve_track_sizes: free space left after maximize={}", left);
    }

    let resolved = ResolvedTrackSizes::from_sets(collection.sets());
    tracing::debug!(
        "resolve_track_sizes: axis={:?}, base_sizes={:?}",
        collection.axis(),
        resolved.base_sizes
    );
    resolved
}
