//! Settings for a rivet placement.

use crate::float_types::{DEFAULT_RIVET_COUNT, DEFAULT_SPACING, MAX_SPACING, Real};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How rivet counts are assigned to edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistributionMode {
    /// Every edge gets `rivet_count` rivets.
    #[default]
    Fixed,
    /// `rivet_count` is a total budget shared out in proportion to edge length.
    Auto,
}

/// Where the rivets of one edge sit along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Layout {
    /// Rivet `i` sits `i * spacing` from the edge start.
    #[default]
    FromStart,
    /// Rivets are indexed symmetrically about the edge midpoint.
    /// With an even count the midpoint itself is left empty.
    Centered,
}

/// Rounding of proportional counts in [`DistributionMode::Auto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CountRounding {
    /// `max(1, floor(quota))` per edge. The total may drift from the budget.
    #[default]
    Floor,
    /// Floor, then hand leftover rivets to the largest fractional remainders.
    LargestRemainder,
}

/// Parameters for a rivet placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementRequest {
    /// Upper bound on the distance between consecutive rivets, in `[0, MAX_SPACING]`.
    pub spacing: Real,

    /// Rivets per edge, or the total budget in auto mode. At least 1.
    pub rivet_count: usize,

    pub mode: DistributionMode,

    pub layout: Layout,

    /// Only consulted in auto mode.
    pub rounding: CountRounding,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            rivet_count: DEFAULT_RIVET_COUNT,
            mode: DistributionMode::Fixed,
            layout: Layout::FromStart,
            rounding: CountRounding::Floor,
        }
    }
}

/// Clamp a user spacing into `[0, MAX_SPACING]`. NaN becomes 0.
pub fn clamp_spacing(spacing: Real) -> Real {
    if spacing.is_nan() {
        0.0
    } else {
        spacing.clamp(0.0, MAX_SPACING)
    }
}

impl PlacementRequest {
    /// Fixed mode with `rivet_count` rivets on every edge.
    #[must_use]
    pub fn fixed(rivet_count: usize, spacing: Real) -> Self {
        Self::default()
            .with_rivet_count(rivet_count)
            .with_spacing(spacing)
    }

    /// Auto mode sharing `rivet_count` rivets across all edges.
    #[must_use]
    pub fn auto(rivet_count: usize, spacing: Real) -> Self {
        Self {
            mode: DistributionMode::Auto,
            ..Self::fixed(rivet_count, spacing)
        }
    }

    /// Set the spacing, clamped into `[0, MAX_SPACING]`.
    #[must_use]
    pub fn with_spacing(mut self, spacing: Real) -> Self {
        self.spacing = clamp_spacing(spacing);
        self
    }

    /// Set the rivet count. Zero is raised to 1.
    #[must_use]
    pub fn with_rivet_count(mut self, rivet_count: usize) -> Self {
        self.rivet_count = rivet_count.max(1);
        self
    }

    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub const fn with_rounding(mut self, rounding: CountRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// The request with its fields forced back into range, for requests
    /// built by struct literal or deserialized from host settings.
    #[must_use]
    pub fn normalized(&self) -> Self {
        self.clone()
            .with_spacing(self.spacing)
            .with_rivet_count(self.rivet_count)
    }
}
