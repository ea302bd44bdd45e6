//! Test support library
//! Provides various helper functions & utilities for tests.

#![allow(dead_code)]

use edge_rivets::{Edge, PlacementResult, RivetTemplate, float_types::Real};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Unit edge along +X lying on a face whose normal is +Z.
pub fn unit_x_edge() -> Edge {
    Edge::with_normal(Point3::origin(), Point3::new(1.0, 0.0, 0.0), Vector3::z())
}

/// Edge from the origin along +X with the given length, on a +Z face.
pub fn x_edge(length: Real) -> Edge {
    Edge::with_normal(Point3::origin(), Point3::new(length, 0.0, 0.0), Vector3::z())
}

pub fn rivet() -> RivetTemplate<()> {
    RivetTemplate::new("rivet", None)
}

/// Local X coordinates of every placement, in result order.
pub fn local_xs(result: &PlacementResult<()>) -> Vec<Real> {
    result.placements.iter().map(|p| p.local_position.x).collect()
}

/// Distances between consecutive local positions on `edge_index`.
pub fn gaps(result: &PlacementResult<()>, edge_index: usize) -> Vec<Real> {
    let points: Vec<Point3<Real>> = result.on_edge(edge_index).map(|p| p.local_position).collect();
    points.windows(2).map(|w| (w[1] - w[0]).norm()).collect()
}
