//! Rivet placement along edges.
//!
//! The pipeline for one call:
//! 1. validate the template, the target and the selection
//! 2. resolve how many rivets each edge gets ([`resolve_counts`])
//! 3. lay each edge out in its own frame ([`layout_edge`])
//! 4. map every local position through the target's world transform
//!
//! Steps 1 and 2 abort the whole call on failure. An edge that fails step 3
//! is reported in [`PlacementResult::skipped`] and the rest carry on.

use crate::edge::Edge;
use crate::errors::{PlacementError, PlacementResultOf};
use crate::float_types::{Real, tolerance};
use crate::frame::rivet_frame;
use crate::placement::{EdgePlacement, Placement, PlacementResult, SkippedEdge};
use crate::request::{CountRounding, DistributionMode, Layout, PlacementRequest, clamp_spacing};
use crate::traits::{ObjectKind, RivetHost, RivetTarget, TemplateSource};
use nalgebra::{Matrix4, Point3, Rotation3, Translation3};
use std::fmt::Debug;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Rivet counts for a set of edges with the given `lengths`.
///
/// In [`DistributionMode::Fixed`] every edge gets `request.rivet_count`. In
/// [`DistributionMode::Auto`] the count is a budget shared in proportion to
/// length, and every edge gets at least one rivet:
///
/// * [`CountRounding::Floor`]: `max(1, floor(len * count / total))`, so the
///   sum can drift below or above the budget.
/// * [`CountRounding::LargestRemainder`]: one rivet per edge up front, then
///   the remaining `count - edges` are split by length with leftovers going
///   to the largest fractional remainders (lower index wins ties). The sum is
///   `max(count, edges)`.
///
/// # Errors
/// [`PlacementError::DegenerateGeometry`] in auto mode when the total length
/// is not above [`tolerance`].
pub fn resolve_counts(
    lengths: &[Real],
    request: &PlacementRequest,
) -> PlacementResultOf<Vec<usize>> {
    let rivet_count = request.rivet_count.max(1);

    if request.mode == DistributionMode::Fixed {
        return Ok(vec![rivet_count; lengths.len()]);
    }

    let total_length: Real = lengths.iter().sum();
    if total_length.is_nan() || total_length <= tolerance() {
        return Err(PlacementError::DegenerateGeometry { total_length });
    }

    let counts: Vec<usize> = match request.rounding {
        CountRounding::Floor => {
            let per_length = rivet_count as Real / total_length;
            lengths
                .iter()
                .map(|len| ((len * per_length).floor() as usize).max(1))
                .collect()
        },
        CountRounding::LargestRemainder => {
            let budget = rivet_count.saturating_sub(lengths.len());
            let quotas: Vec<Real> = lengths
                .iter()
                .map(|len| len * budget as Real / total_length)
                .collect();

            let mut counts: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();
            let assigned: usize = counts.iter().sum();

            let mut order: Vec<usize> = (0..lengths.len()).collect();
            order.sort_by(|&a, &b| {
                let ra = quotas[a] - quotas[a].floor();
                let rb = quotas[b] - quotas[b].floor();
                rb.total_cmp(&ra).then(a.cmp(&b))
            });
            for &i in order.iter().take(budget.saturating_sub(assigned)) {
                counts[i] += 1;
            }

            counts.iter().map(|c| c + 1).collect()
        },
    };

    Ok(counts)
}

/// Distance between consecutive rivets on an edge of `length` carrying
/// `count` rivets: the natural spacing `length / (count - 1)`, capped at the
/// user `spacing` after clamping it into `[0, MAX_SPACING]`. Zero for a
/// single rivet.
pub fn effective_spacing(length: Real, count: usize, spacing: Real) -> Real {
    if count > 1 {
        let natural = length / (count - 1) as Real;
        clamp_spacing(spacing).min(natural)
    } else {
        0.0
    }
}

/// Signed multiples of the spacing at which rivets sit, relative to the
/// layout origin (edge start for [`Layout::FromStart`], midpoint for
/// [`Layout::Centered`]).
pub fn layout_indices(count: usize, layout: Layout) -> Vec<isize> {
    match layout {
        Layout::FromStart => (0..count as isize).collect(),
        Layout::Centered => {
            let half = (count / 2) as isize;
            let even = count % 2 == 0;
            (-half..=half).filter(|&i| !(even && i == 0)).collect()
        },
    }
}

/// One edge laid out in its own local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLayout {
    pub frame: Rotation3<Real>,
    pub spacing: Real,
    /// Rivet positions in the target's local space, in layout order.
    pub positions: Vec<Point3<Real>>,
}

/// Lay out `count` rivets along `edge`.
///
/// # Errors
/// [`PlacementError::DegenerateEdge`] when the edge has no length or its
/// normal is parallel to it.
pub fn layout_edge(
    edge_index: usize,
    edge: &Edge,
    count: usize,
    spacing: Real,
    layout: Layout,
) -> PlacementResultOf<EdgeLayout> {
    let degenerate = |reason: &str| PlacementError::DegenerateEdge {
        edge_index,
        reason: reason.to_string(),
    };

    let tangent = edge.tangent().ok_or_else(|| degenerate("edge has no length"))?;
    let frame = rivet_frame(&tangent, &edge.frame_normal())
        .ok_or_else(|| degenerate("face normal is zero or parallel to the edge"))?;

    let spacing = effective_spacing(edge.length(), count, spacing);
    let origin = match layout {
        Layout::FromStart => edge.start,
        Layout::Centered => edge.midpoint(),
    };

    let positions = layout_indices(count, layout)
        .into_iter()
        .map(|i| origin + tangent * (i as Real * spacing))
        .collect();

    Ok(EdgeLayout {
        frame,
        spacing,
        positions,
    })
}

/// Validate `target` and `template`, then place rivets on every selected edge.
///
/// # Errors
/// In this order: [`PlacementError::MissingTemplate`],
/// [`PlacementError::InvalidTarget`], [`PlacementError::NoSelection`],
/// [`PlacementError::DegenerateGeometry`]. Edges that cannot be placed on
/// individually are skipped, not returned as errors.
///
/// # Example
/// ```
/// use edge_rivets::{EditMesh, PlacementRequest, RivetTemplate, place_rivets};
///
/// let mut plate = EditMesh::cube(1.0);
/// plate.select_edge(4, 5);
///
/// let rivet: RivetTemplate<()> = RivetTemplate::new("rivet", None);
/// let result = place_rivets(&plate, Some(&rivet), &PlacementRequest::fixed(5, 0.2)).unwrap();
/// assert_eq!(result.len(), 5);
/// ```
pub fn place_rivets<S, R, T>(
    target: &R,
    template: Option<&T>,
    request: &PlacementRequest,
) -> PlacementResultOf<PlacementResult<S>>
where
    S: Clone + Send + Sync + Debug,
    R: RivetTarget,
    T: TemplateSource<S>,
{
    let template = template.ok_or(PlacementError::MissingTemplate)?;

    if !target.is_edge_editable() {
        let reason = if target.kind() != ObjectKind::Mesh {
            "the target object must be a mesh"
        } else {
            "the target must be in edit mode with selected edges"
        };
        return Err(PlacementError::InvalidTarget(reason.to_string()));
    }

    place_edges(
        &target.selected_edges(),
        &target.world_transform(),
        Some(template),
        request,
    )
}

/// Place rivets on an explicit list of edges, for hosts that already
/// extracted their selection. `world` maps the edges' local space to world.
///
/// # Errors
/// [`PlacementError::MissingTemplate`], [`PlacementError::NoSelection`] or
/// [`PlacementError::DegenerateGeometry`].
pub fn place_edges<S, T>(
    edges: &[Edge],
    world: &Matrix4<Real>,
    template: Option<&T>,
    request: &PlacementRequest,
) -> PlacementResultOf<PlacementResult<S>>
where
    S: Clone + Send + Sync + Debug,
    T: TemplateSource<S>,
{
    let template = template.ok_or(PlacementError::MissingTemplate)?;
    if edges.is_empty() {
        return Err(PlacementError::NoSelection);
    }

    let request = request.normalized();
    let lengths: Vec<Real> = edges.iter().map(Edge::length).collect();
    let counts = resolve_counts(&lengths, &request)?;

    let scale = template.scale();
    let metadata = template.metadata();

    let laid_out = layout_all(edges, &counts, &request);

    let mut result = PlacementResult::new();
    for (edge_index, layout) in laid_out.into_iter().enumerate() {
        let layout = match layout {
            Ok(layout) => layout,
            Err(reason) => {
                warn!(edge_index, %reason, "skipping edge");
                result.skipped.push(SkippedEdge { edge_index, reason });
                continue;
            },
        };

        debug!(
            edge_index,
            count = layout.positions.len(),
            spacing = layout.spacing,
            "placing rivets on edge"
        );
        result.edges.push(EdgePlacement {
            edge_index,
            length: lengths[edge_index],
            count: layout.positions.len(),
            spacing: layout.spacing,
        });

        let rotation = layout.frame.to_homogeneous();
        for local_position in layout.positions {
            let matrix = world
                * Translation3::from(local_position.coords).to_homogeneous()
                * rotation;
            result.placements.push(Placement {
                edge_index,
                local_position,
                rotation: layout.frame,
                scale,
                matrix,
                metadata: metadata.clone(),
            });
        }
    }

    info!(
        edges = edges.len(),
        skipped = result.skipped.len(),
        placed = result.placements.len(),
        mode = ?request.mode,
        layout = ?request.layout,
        "rivet placement finished"
    );

    Ok(result)
}

#[cfg(not(feature = "parallel"))]
fn layout_all(
    edges: &[Edge],
    counts: &[usize],
    request: &PlacementRequest,
) -> Vec<PlacementResultOf<EdgeLayout>> {
    edges
        .iter()
        .zip(counts)
        .enumerate()
        .map(|(i, (edge, &count))| layout_edge(i, edge, count, request.spacing, request.layout))
        .collect()
}

#[cfg(feature = "parallel")]
fn layout_all(
    edges: &[Edge],
    counts: &[usize],
    request: &PlacementRequest,
) -> Vec<PlacementResultOf<EdgeLayout>> {
    edges
        .par_iter()
        .zip(counts.par_iter())
        .enumerate()
        .map(|(i, (edge, &count))| layout_edge(i, edge, count, request.spacing, request.layout))
        .collect()
}

/// Hand every placement in `result` to `host`, in order.
///
/// If the host fails part way, the instances it already created are passed
/// back to [`RivetHost::rollback`] and the error is returned, so the scene
/// is left as it was.
pub fn commit<S, T, H>(
    result: &PlacementResult<S>,
    template: &T,
    host: &mut H,
) -> PlacementResultOf<Vec<H::Handle>>
where
    S: Clone + Send + Sync + Debug,
    T: TemplateSource<S>,
    H: RivetHost<S>,
{
    let mut handles = Vec::with_capacity(result.placements.len());
    for placement in &result.placements {
        match host.instantiate(template, placement) {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                warn!(
                    created = handles.len(),
                    template = template.name(),
                    %err,
                    "host failed, rolling back"
                );
                host.rollback(handles);
                return Err(err);
            },
        }
    }
    Ok(handles)
}
