//! Extra space distribution across the sets an item spans.
//!
//! Spec: §12.5.1 Distributing Extra Space Across Spanned Tracks

use super::collection::GridSet;
use super::helpers::{ContributionType, InfinitelyGrowableBehavior, growth_potential};

/// `None` (unbounded) sorts after every finite potential.
fn potential_sort_key(potential: Option<f32>) -> f32 {
    potential.unwrap_or(f32::INFINITY)
}

/// Hand out `extra_space` to `sets_to_grow` up to each set's growth potential.
///
/// Sets are visited in ascending potential order and each one receives a
/// track-count weighted share of what is left, capped at its potential.
/// Shares land in `item_incurred_increase`. Returns the space left over.
fn distribute_up_to_limits(
    mut extra_space: f32,
    contribution_type: ContributionType,
    sets: &mut [GridSet],
    sets_to_grow: &mut [usize],
) -> f32 {
    let mut total_count: usize = sets_to_grow
        .iter()
        .map(|&index| &sets[index])
        .filter(|set| {
            growth_potential(set, contribution_type, InfinitelyGrowableBehavior::Enforce)
                != Some(0.0)
        })
        .map(|set| set.track_count)
        .sum();

    if total_count > 0 || contribution_type.is_for_growth_limits() {
        sets_to_grow.sort_by(|&lhs, &rhs| {
            let lhs_key = potential_sort_key(growth_potential(
                &sets[lhs],
                contribution_type,
                InfinitelyGrowableBehavior::Ignore,
            ));
            let rhs_key = potential_sort_key(growth_potential(
                &sets[rhs],
                contribution_type,
                InfinitelyGrowableBehavior::Ignore,
            ));
            lhs_key.total_cmp(&rhs_key)
        });
    }

    if total_count == 0 {
        return extra_space;
    }

    for &index in sets_to_grow.iter() {
        let set = &mut sets[index];
        let potential =
            growth_potential(set, contribution_type, InfinitelyGrowableBehavior::Enforce);
        if potential == Some(0.0) {
            continue;
        }
        let weighted = extra_space * set.track_count as f32 / total_count as f32;
        let share = potential.map_or(weighted, |cap| weighted.min(cap));
        set.item_incurred_increase = share;
        total_count -= set.track_count;
        extra_space -= share;
    }

    extra_space.max(0.0)
}

/// Spread what is left after every set hit its potential, without caps
/// except `fit-content()` limits on growth limits.
fn distribute_beyond_limits(
    mut extra_space: f32,
    contribution_type: ContributionType,
    sets: &mut [GridSet],
    sets_to_grow_beyond_limit: &[usize],
) {
    let mut total_count: usize = sets_to_grow_beyond_limit
        .iter()
        .map(|&index| sets[index].track_count)
        .sum();

    for &index in sets_to_grow_beyond_limit {
        if total_count == 0 {
            break;
        }
        let set = &mut sets[index];
        let weighted = extra_space * set.track_count as f32 / total_count as f32;
        let cap = if contribution_type.is_for_growth_limits() {
            growth_potential(set, contribution_type, InfinitelyGrowableBehavior::Ignore)
        } else {
            None
        };
        let share = cap.map_or(weighted, |limit| {
            weighted.min((limit - set.item_incurred_increase).max(0.0))
        });
        set.item_incurred_increase += share;
        total_count -= set.track_count;
        extra_space -= share;
    }
}

/// Distribute one item's extra space over the sets it grows.
///
/// `sets_to_grow` is reordered by growth potential. When
/// `sets_to_grow_beyond_limit` is `None` the beyond-limit phase reuses
/// `sets_to_grow`. Each set's `planned_increase` becomes the larger of its
/// previous plan and what this item incurred.
pub fn distribute_extra_space(
    extra_space: f32,
    contribution_type: ContributionType,
    sets: &mut [GridSet],
    sets_to_grow: &mut [usize],
    sets_to_grow_beyond_limit: Option<&[usize]>,
) {
    debug_assert!(
        extra_space >= 0.0,
        "extra space must be non-negative, got {extra_space}"
    );
    debug_assert!(!sets_to_grow.is_empty(), "no sets to grow");

    for &index in sets_to_grow.iter() {
        sets[index].item_incurred_increase = 0.0;
    }
    if extra_space <= 0.0 {
        return;
    }

    let remaining = distribute_up_to_limits(extra_space, contribution_type, sets, sets_to_grow);

    if remaining > 0.0 {
        match sets_to_grow_beyond_limit {
            Some(beyond) if !beyond.is_empty() => {
                distribute_beyond_limits(remaining, contribution_type, sets, beyond);
            }
            _ => distribute_beyond_limits(remaining, contribution_type, sets, sets_to_grow),
        }
    }

    for &index in sets_to_grow.iter() {
        let set = &mut sets[index];
        set.planned_increase = set.planned_increase.max(set.item_incurred_increase);
        tracing::trace!(
            "distribute_extra_space: set={}, incurred={}, planned={}",
            index,
            set.item_incurred_increase,
            set.planned_increase
        );
    }
}

/// Grow base sizes by `free_space`, freezing sets at their growth limits.
///
/// Spec: §12.6 Maximize Tracks
///
/// Returns the space that could not be used.
pub fn distribute_to_base_sizes(
    free_space: f32,
    sets: &mut [GridSet],
    sets_to_grow: &mut [usize],
) -> f32 {
    debug_assert!(free_space >= 0.0, "free space must be non-negative");
    for &index in sets_to_grow.iter() {
        sets[index].item_incurred_increase = 0.0;
    }
    let remaining = distribute_up_to_limits(
        free_space,
        ContributionType::IntrinsicMinimums,
        sets,
        sets_to_grow,
    );
    for &index in sets_to_grow.iter() {
        let set = &mut sets[index];
        set.base_size += set.item_incurred_increase;
        set.item_incurred_increase = 0.0;
    }
    remaining
}
