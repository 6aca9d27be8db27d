//! Capability interface between the grid algorithm and its children.
//!
//! The grid never inspects a child's content. It asks for intrinsic
//! contributions while sizing tracks and for a final fragment once grid
//! areas are known.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::types::GridAxis;

/// Intrinsic sizes of a child along one axis, excluding margins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MinMaxSizes {
    /// Smallest size without overflow
    pub min_content: f32,
    /// Size with no soft wrapping
    pub max_content: f32,
    /// Definite preferred size (`width`/`height`), which overrides content
    #[serde(default)]
    pub preferred: Option<f32>,
}

impl MinMaxSizes {
    /// Content-sized child.
    pub fn new(min_content: f32, max_content: f32) -> Self {
        Self {
            min_content,
            max_content: max_content.max(min_content),
            preferred: None,
        }
    }

    /// Child with a definite preferred size.
    pub fn fixed(size: f32) -> Self {
        Self {
            min_content: size,
            max_content: size,
            preferred: Some(size),
        }
    }
}

/// Context passed along with a min/max measurement request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureInput {
    /// Basis for the child's percentages on the measured axis
    pub percentage_resolution_size: Option<f32>,
    /// Size of the child's grid area on the other axis, once known
    pub available_cross_size: Option<f32>,
}

/// Final layout constraints for one child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemConstraints {
    /// Inline size of the grid area
    pub available_inline_size: f32,
    /// Block size of the grid area
    pub available_block_size: f32,
    /// Resolved inline margins (start + end)
    pub inline_margin_sum: f32,
    /// Resolved block margins (start + end)
    pub block_margin_sum: f32,
    /// Fill the area's inline size
    pub stretch_inline: bool,
    /// Fill the area's block size
    pub stretch_block: bool,
}

impl ItemConstraints {
    /// Margin-box-filling inline size.
    pub fn stretch_inline_size(&self) -> f32 {
        (self.available_inline_size - self.inline_margin_sum).max(0.0)
    }

    /// Margin-box-filling block size.
    pub fn stretch_block_size(&self) -> f32 {
        (self.available_block_size - self.block_margin_sum).max(0.0)
    }
}

/// Border-box size produced by laying out a child.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemFragment {
    pub inline_size: f32,
    pub block_size: f32,
}

/// A grid child as seen by the grid algorithm.
pub trait GridItemNode {
    /// Intrinsic sizes along `axis`.
    fn measure_min_max(&self, axis: GridAxis, input: &MeasureInput) -> MinMaxSizes;

    /// Lay the child out inside its grid area.
    ///
    /// # Errors
    /// Returns an error if the child cannot produce a fragment.
    fn layout(&self, constraints: &ItemConstraints) -> Result<ItemFragment>;
}

/// A child with precomputed intrinsic sizes.
///
/// Useful for hosts that measure content up front, and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticNode {
    /// Column-axis sizes
    pub inline: MinMaxSizes,
    /// Row-axis sizes
    pub block: MinMaxSizes,
}

impl StaticNode {
    pub fn new(inline: MinMaxSizes, block: MinMaxSizes) -> Self {
        Self { inline, block }
    }

    /// Resolve one axis: preferred size, else stretch, else fit-content.
    fn resolve_size(sizes: &MinMaxSizes, stretch: bool, stretch_size: f32) -> f32 {
        match sizes.preferred {
            Some(preferred) => preferred,
            None if stretch => stretch_size,
            None => stretch_size.max(sizes.min_content).min(sizes.max_content),
        }
    }
}

impl GridItemNode for StaticNode {
    fn measure_min_max(&self, axis: GridAxis, _input: &MeasureInput) -> MinMaxSizes {
        match axis {
            GridAxis::Column => self.inline,
            GridAxis::Row => self.block,
        }
    }

    fn layout(&self, constraints: &ItemConstraints) -> Result<ItemFragment> {
        Ok(ItemFragment {
            inline_size: Self::resolve_size(
                &self.inline,
                constraints.stretch_inline,
                constraints.stretch_inline_size(),
            ),
            block_size: Self::resolve_size(
                &self.block,
                constraints.stretch_block,
                constraints.stretch_block_size(),
            ),
        })
    }
}
