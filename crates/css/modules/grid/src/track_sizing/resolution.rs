//! Intrinsic track size resolution and free space maximization.
//!
//! Spec: §12.5 Resolve Intrinsic Track Sizes, §12.6 Maximize Tracks

use crate::node::MinMaxSizes;
use crate::units::{saturating_add, saturating_mul, saturating_sum};

use super::collection::{GridSet, SetIndices};
use super::distribution::{distribute_extra_space, distribute_to_base_sizes};
use super::helpers::{ContributionType, grow_affected_size};

/// One grid item as seen by the sizing engine on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizingItem {
    /// Sets the item spans
    pub set_indices: SetIndices,
    /// Tracks the item spans
    pub span_size: usize,
    /// Measured content sizes on this axis
    pub sizes: MinMaxSizes,
    /// Resolved start + end margins on this axis
    pub margin_sum: f32,
}

/// Whether an item spans content-sized and flexible sets.
#[derive(Debug, Clone, Copy, Default)]
struct SpanFlags {
    is_spanning_intrinsic: bool,
    is_spanning_flex: bool,
}

fn span_flags(sets: &[GridSet], item: &SizingItem) -> SpanFlags {
    sets[item.set_indices.begin..item.set_indices.end]
        .iter()
        .filter(|set| !set.is_collapsed)
        .fold(SpanFlags::default(), |flags, set| SpanFlags {
            is_spanning_intrinsic: flags.is_spanning_intrinsic || set.track_size.is_intrinsic(),
            is_spanning_flex: flags.is_spanning_flex || set.is_flexible(),
        })
}

/// Run one contribution step for one group of items.
fn increase_sizes_to_accommodate_items(
    sets: &mut [GridSet],
    items: &[SizingItem],
    group: &[usize],
    contribution_type: ContributionType,
    gap: f32,
) {
    for set in sets.iter_mut() {
        set.planned_increase = 0.0;
    }

    let mut is_affected = vec![false; sets.len()];
    let mut sets_to_grow = Vec::new();
    let mut sets_to_grow_beyond_limit = Vec::new();

    for &item_index in group {
        let item = &items[item_index];
        sets_to_grow.clear();
        sets_to_grow_beyond_limit.clear();

        let mut spanned_size = saturating_mul(gap, item.span_size.saturating_sub(1));
        for set_index in item.set_indices.begin..item.set_indices.end {
            let set = &sets[set_index];
            spanned_size = saturating_add(spanned_size, contribution_type.affected_size(set));
            if contribution_type.applies_to(set) {
                sets_to_grow.push(set_index);
                is_affected[set_index] = true;
                if contribution_type.grows_beyond_limit(set) {
                    sets_to_grow_beyond_limit.push(set_index);
                }
            }
        }
        if sets_to_grow.is_empty() {
            continue;
        }

        let contribution = contribution_type.item_contribution(&item.sizes, item.margin_sum);
        let extra_space = (contribution - spanned_size).max(0.0);
        let beyond_limit = if contribution_type.is_for_growth_limits() {
            None
        } else {
            Some(sets_to_grow_beyond_limit.as_slice())
        };
        distribute_extra_space(
            extra_space,
            contribution_type,
            sets,
            &mut sets_to_grow,
            beyond_limit,
        );
    }

    for (set, affected) in sets.iter_mut().zip(is_affected) {
        if !affected {
            continue;
        }
        let became_finite = grow_affected_size(set, contribution_type);
        if contribution_type == ContributionType::IntrinsicMaximums
            && became_finite
            && !set.track_size.has_fixed_max_track_breadth()
        {
            set.is_infinitely_growable = true;
        }
        set.planned_increase = 0.0;
    }

    if contribution_type == ContributionType::MaxContentMaximums {
        for set in sets.iter_mut() {
            set.is_infinitely_growable = false;
        }
    }
}

/// Size content-based sets from the items spanning them.
///
/// Items are processed in groups: non-flexible items by ascending span size,
/// then every item spanning a flexible set as one final group. Ties keep
/// input order. Each group runs all five contribution steps in order.
pub fn resolve_intrinsic_track_sizes(sets: &mut [GridSet], items: &[SizingItem], gap: f32) {
    let flags: Vec<SpanFlags> = items.iter().map(|item| span_flags(sets, item)).collect();
    let mut order: Vec<usize> = (0..items.len())
        .filter(|&index| flags[index].is_spanning_intrinsic)
        .collect();
    let group_key = |index: usize| {
        let is_flex = flags[index].is_spanning_flex;
        (is_flex, if is_flex { 0 } else { items[index].span_size })
    };
    order.sort_by_key(|&index| group_key(index));

    for group in order.chunk_by(|&lhs, &rhs| group_key(lhs) == group_key(rhs)) {
        tracing::trace!(
            "resolve_intrinsic_track_sizes: group of {} items, key={:?}",
            group.len(),
            group.first().map(|&index| group_key(index))
        );
        for contribution_type in ContributionType::ALL {
            increase_sizes_to_accommodate_items(sets, items, group, contribution_type, gap);
        }
    }

    for set in sets.iter_mut() {
        if set.growth_limit.is_none() && !set.is_flexible() {
            set.growth_limit = Some(set.base_size);
        }
    }
}

/// Distribute free space to base sizes up to growth limits.
///
/// Returns the free space left once every set reached its limit.
pub fn maximize_tracks(sets: &mut [GridSet], available_size: f32, gap: f32) -> f32 {
    let track_count: usize = sets
        .iter()
        .filter(|set| !set.is_collapsed)
        .map(|set| set.track_count)
        .sum();
    let gutters = saturating_mul(gap, track_count.saturating_sub(1));
    let used = saturating_add(saturating_sum(sets.iter().map(|set| set.base_size)), gutters);
    let free_space = available_size - used;
    if free_space <= 0.0 {
        return 0.0;
    }

    let mut sets_to_grow: Vec<usize> = sets
        .iter()
        .enumerate()
        .filter(|(_, set)| {
            !set.is_collapsed && set.growth_limit.is_some_and(|limit| limit > set.base_size)
        })
        .map(|(index, _)| index)
        .collect();
    if sets_to_grow.is_empty() {
        return free_space;
    }

    tracing::debug!(
        "maximize_tracks: free_space={}, sets={}",
        free_space,
        sets_to_grow.len()
    );
    distribute_to_base_sizes(free_space, sets, &mut sets_to_grow)
}
