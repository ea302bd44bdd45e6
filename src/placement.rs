//! Output of a rivet placement: one descriptor per instance, plus per-edge reports.

use crate::errors::PlacementError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use std::{fmt::Debug, sync::OnceLock};

/// Where and how to put one copy of the template.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<S: Clone + Send + Sync + Debug> {
    /// Index of the edge (in selection order) this rivet sits on.
    pub edge_index: usize,
    /// Position on the edge, in the target's local space.
    pub local_position: Point3<Real>,
    /// Edge frame in the target's local space.
    pub rotation: Rotation3<Real>,
    /// The template's own scale.
    pub scale: Vector3<Real>,
    /// `world * Translation(local_position) * rotation`.
    pub matrix: Matrix4<Real>,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Placement<S> {
    /// Origin of the instance in world space.
    pub fn position(&self) -> Point3<Real> {
        Point3::from(self.matrix.fixed_view::<3, 1>(0, 3).into_owned())
    }

    /// Full object-to-world matrix of the instance, template scale included.
    pub fn to_homogeneous(&self) -> Matrix4<Real> {
        self.matrix * Matrix4::new_nonuniform_scaling(&self.scale)
    }
}

/// What happened on one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePlacement {
    pub edge_index: usize,
    pub length: Real,
    /// Rivets placed on the edge.
    pub count: usize,
    /// Distance between consecutive rivets; 0 for a single rivet.
    pub spacing: Real,
}

/// An edge that was left out, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEdge {
    pub edge_index: usize,
    pub reason: PlacementError,
}

/// Everything a placement call produced.
#[derive(Debug, Clone)]
pub struct PlacementResult<S: Clone + Send + Sync + Debug> {
    /// Instances in edge order, then layout order within each edge.
    pub placements: Vec<Placement<S>>,
    pub edges: Vec<EdgePlacement>,
    pub skipped: Vec<SkippedEdge>,

    /// Lazily calculated AABB that spans the world positions of `placements`.
    pub bounding_box: OnceLock<Aabb>,
}

impl<S: Clone + Send + Sync + Debug> Default for PlacementResult<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> PlacementResult<S> {
    pub const fn new() -> Self {
        PlacementResult {
            placements: Vec::new(),
            edges: Vec::new(),
            skipped: Vec::new(),
            bounding_box: OnceLock::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements that sit on edge `edge_index`.
    pub fn on_edge(&self, edge_index: usize) -> impl Iterator<Item = &Placement<S>> {
        self.placements
            .iter()
            .filter(move |p| p.edge_index == edge_index)
    }

    /// Sum of the per-edge counts.
    pub fn total_count(&self) -> usize {
        self.edges.iter().map(|e| e.count).sum()
    }

    /// Returns an [`Aabb`] around every placement's world position.
    /// An empty result yields a zero-size box at the origin.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut points = self.placements.iter().map(|p| p.position());
            let Some(first) = points.next() else {
                return Aabb::new(Point3::origin(), Point3::origin());
            };

            let (mins, maxs) = points.fold((first, first), |(lo, hi), p| {
                (lo.inf(&p), hi.sup(&p))
            });
            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates the cached bounding box after `placements` was edited.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }
}
