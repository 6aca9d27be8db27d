//! Per-contribution-type rules used while resolving intrinsic track sizes.
//!
//! Spec: §12.5 Resolve Intrinsic Track Sizes

use crate::node::MinMaxSizes;
use crate::units::saturating_add;

use super::collection::GridSet;

/// Which sizes an intrinsic sizing step grows, and from which item sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContributionType {
    /// Grow base sizes of intrinsic minimums by minimum contributions.
    IntrinsicMinimums,
    /// Grow base sizes of min-/max-content minimums by min-content contributions.
    ContentBasedMinimums,
    /// Grow base sizes of max-content minimums by max-content contributions.
    MaxContentMinimums,
    /// Grow growth limits of intrinsic maximums by min-content contributions.
    IntrinsicMaximums,
    /// Grow growth limits of max-content maximums by max-content contributions.
    MaxContentMaximums,
}

/// Whether a set's infinitely-growable flag lifts its growth potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfinitelyGrowableBehavior {
    Enforce,
    Ignore,
}

impl ContributionType {
    /// The five steps, in the order they run for each item group.
    pub const ALL: [Self; 5] = [
        Self::IntrinsicMinimums,
        Self::ContentBasedMinimums,
        Self::MaxContentMinimums,
        Self::IntrinsicMaximums,
        Self::MaxContentMaximums,
    ];

    /// Whether this step grows growth limits rather than base sizes.
    pub fn is_for_growth_limits(self) -> bool {
        matches!(self, Self::IntrinsicMaximums | Self::MaxContentMaximums)
    }

    /// Whether `set` is grown by this step.
    pub fn applies_to(self, set: &GridSet) -> bool {
        if set.is_collapsed {
            return false;
        }
        let size = &set.track_size;
        match self {
            Self::IntrinsicMinimums => size.has_intrinsic_min_track_breadth(),
            Self::ContentBasedMinimums => size.has_min_or_max_content_min_track_breadth(),
            Self::MaxContentMinimums => size.has_max_content_min_track_breadth(),
            Self::IntrinsicMaximums => size.has_intrinsic_max_track_breadth(),
            Self::MaxContentMaximums => size.has_max_content_or_auto_max_track_breadth(),
        }
    }

    /// Whether `set` keeps growing once every set reached its limit.
    ///
    /// Growth-limit steps never select sets this way; the distributor then
    /// falls back to every set it grows.
    pub fn grows_beyond_limit(self, set: &GridSet) -> bool {
        let size = &set.track_size;
        match self {
            Self::IntrinsicMinimums | Self::ContentBasedMinimums => {
                size.has_intrinsic_max_track_breadth()
            }
            Self::MaxContentMinimums => size.has_max_content_max_track_breadth(),
            Self::IntrinsicMaximums | Self::MaxContentMaximums => false,
        }
    }

    /// The size of `set` this step accounts for and grows.
    pub fn affected_size(self, set: &GridSet) -> f32 {
        if self.is_for_growth_limits() {
            set.growth_limit_or_base()
        } else {
            set.base_size
        }
    }

    /// An item's contribution for this step, margins included.
    ///
    /// A definite preferred size replaces both content sizes.
    pub fn item_contribution(self, sizes: &MinMaxSizes, margin_sum: f32) -> f32 {
        let content = sizes.preferred.unwrap_or(match self {
            Self::IntrinsicMinimums | Self::ContentBasedMinimums | Self::IntrinsicMaximums => {
                sizes.min_content
            }
            Self::MaxContentMinimums | Self::MaxContentMaximums => sizes.max_content,
        });
        saturating_add(content.max(0.0), margin_sum)
    }
}

/// How much `set` may still grow in this step; `None` is unbounded.
pub fn growth_potential(
    set: &GridSet,
    contribution_type: ContributionType,
    behavior: InfinitelyGrowableBehavior,
) -> Option<f32> {
    if !contribution_type.is_for_growth_limits() {
        return set
            .growth_limit
            .map(|limit| (limit - set.base_size).max(0.0));
    }

    if behavior == InfinitelyGrowableBehavior::Enforce && !set.is_infinitely_growable {
        // Growth limits only grow past their value through the beyond-limit phase.
        return Some(0.0);
    }
    set.fit_content_limit
        .map(|limit| (limit - set.growth_limit_or_base()).max(0.0))
}

/// Apply the step's planned increase to `set`.
///
/// Returns whether an infinite growth limit became finite.
pub fn grow_affected_size(set: &mut GridSet, contribution_type: ContributionType) -> bool {
    if contribution_type.is_for_growth_limits() {
        let was_infinite = set.growth_limit.is_none();
        let grown = saturating_add(set.growth_limit_or_base(), set.planned_increase);
        set.growth_limit = Some(grown);
        was_infinite
    } else {
        set.base_size = saturating_add(set.base_size, set.planned_increase);
        if set.growth_limit.is_some_and(|limit| limit < set.base_size) {
            set.growth_limit = Some(set.base_size);
        }
        false
    }
}
