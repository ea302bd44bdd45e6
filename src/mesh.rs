//! `EditMesh`: a minimal polygonal target with an edge selection.

use crate::edge::Edge;
use crate::float_types::{Real, tolerance};
use crate::traits::{EdgeSelection, EditMode, ObjectKind, RivetTarget};
use hashbrown::{HashMap, HashSet};
use nalgebra::{Matrix4, Point3, Vector3};
use tracing::warn;

/// A polygon mesh as a host would hand it over while in edit mode.
///
/// Faces are vertex index loops of any length >= 3. Selected edges are
/// vertex index pairs; their direction is kept, so an edge selected as
/// `(a, b)` runs from vertex `a` to vertex `b`.
#[derive(Debug, Clone)]
pub struct EditMesh {
    pub positions: Vec<Point3<Real>>,
    pub faces: Vec<Vec<usize>>,
    pub selected: Vec<[usize; 2]>,
    pub kind: ObjectKind,
    pub mode: EditMode,
    pub world: Matrix4<Real>,
}

impl EditMesh {
    /// A mesh object in edit mode with nothing selected and an identity world transform.
    pub fn new(positions: Vec<Point3<Real>>, faces: Vec<Vec<usize>>) -> Self {
        EditMesh {
            positions,
            faces,
            selected: Vec::new(),
            kind: ObjectKind::Mesh,
            mode: EditMode::Edit,
            world: Matrix4::identity(),
        }
    }

    /// Axis-aligned cube of side `size` with one corner at the origin,
    /// faces wound counter-clockwise seen from outside.
    pub fn cube(size: Real) -> Self {
        let s = size;
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(s, 0.0, 0.0),
            Point3::new(s, s, 0.0),
            Point3::new(0.0, s, 0.0),
            Point3::new(0.0, 0.0, s),
            Point3::new(s, 0.0, s),
            Point3::new(s, s, s),
            Point3::new(0.0, s, s),
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // bottom (-z)
            vec![4, 5, 6, 7], // top (+z)
            vec![0, 1, 5, 4], // front (-y)
            vec![2, 3, 7, 6], // back (+y)
            vec![1, 2, 6, 5], // right (+x)
            vec![0, 4, 7, 3], // left (-x)
        ];
        EditMesh::new(positions, faces)
    }

    #[must_use]
    pub fn with_world(mut self, world: Matrix4<Real>) -> Self {
        self.world = world;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: EditMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add `(a, b)` to the selection. Selecting an edge twice, in either
    /// direction, has no further effect.
    pub fn select_edge(&mut self, a: usize, b: usize) {
        let exists = self
            .selected
            .iter()
            .any(|&[x, y]| (x, y) == (a, b) || (x, y) == (b, a));
        if !exists {
            self.selected.push([a, b]);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Select every edge of every face.
    pub fn select_all(&mut self) {
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        for face in &self.faces {
            for (a, b) in face_edges(face) {
                if seen.insert(undirected(a, b)) {
                    self.selected.push([a, b]);
                }
            }
        }
    }

    /// Unit normal of face `index` by Newell's method, or `None` for an
    /// out-of-range face, a face with fewer than 3 valid vertices, or a
    /// face with no area.
    pub fn face_normal(&self, index: usize) -> Option<Vector3<Real>> {
        let face = self.faces.get(index)?;
        if face.len() < 3 {
            return None;
        }

        let mut normal = Vector3::zeros();
        for (a, b) in face_edges(face) {
            let current = self.positions.get(a)?;
            let next = self.positions.get(b)?;
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal.try_normalize(tolerance())
    }

    /// For every undirected edge, the index of the first face that uses it.
    fn edge_faces(&self) -> HashMap<(usize, usize), usize> {
        let mut map = HashMap::new();
        for (face_index, face) in self.faces.iter().enumerate() {
            for (a, b) in face_edges(face) {
                map.entry(undirected(a, b)).or_insert(face_index);
            }
        }
        map
    }
}

/// Consecutive vertex pairs around a face loop, closing back to the first.
fn face_edges(face: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    face.iter()
        .zip(face.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
}

const fn undirected(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

impl EdgeSelection for EditMesh {
    fn selected_edges(&self) -> Vec<Edge> {
        let edge_faces = self.edge_faces();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut edges = Vec::with_capacity(self.selected.len());

        for &[a, b] in &self.selected {
            let (Some(start), Some(end)) = (self.positions.get(a), self.positions.get(b)) else {
                warn!(
                    a,
                    b,
                    vertices = self.positions.len(),
                    "ignoring selected edge with out-of-range vertex"
                );
                continue;
            };
            if !seen.insert(undirected(a, b)) {
                continue;
            }

            let normal = edge_faces
                .get(&undirected(a, b))
                .and_then(|&face| self.face_normal(face));

            edges.push(Edge {
                start: *start,
                end: *end,
                normal,
            });
        }
        edges
    }
}

impl RivetTarget for EditMesh {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn mode(&self) -> EditMode {
        self.mode
    }

    fn world_transform(&self) -> Matrix4<Real> {
        self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cube_face_normals_point_outward() {
        let cube = EditMesh::cube(2.0);
        assert_relative_eq!(cube.face_normal(0).unwrap(), -Vector3::z());
        assert_relative_eq!(cube.face_normal(1).unwrap(), Vector3::z());
        assert_relative_eq!(cube.face_normal(2).unwrap(), -Vector3::y());
        assert_relative_eq!(cube.face_normal(3).unwrap(), Vector3::y());
        assert_relative_eq!(cube.face_normal(4).unwrap(), Vector3::x());
        assert_relative_eq!(cube.face_normal(5).unwrap(), -Vector3::x());
        assert!(cube.face_normal(6).is_none());
    }

    #[test]
    fn selected_edge_takes_first_face_normal() {
        let mut cube = EditMesh::cube(1.0);
        // 4-5 is shared by the top and front faces; top comes first.
        cube.select_edge(5, 4);
        let edges = cube.selected_edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].start, Point3::new(1.0, 0.0, 1.0));
        assert_eq!(edges[0].end, Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(edges[0].normal.unwrap(), Vector3::z());
    }

    #[test]
    fn loose_edge_has_no_normal() {
        let mut mesh = EditMesh::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            Vec::new(),
        );
        mesh.select_edge(0, 1);
        let edges = mesh.selected_edges();
        assert_eq!(edges.len(), 1);
        assert!(edges[0].normal.is_none());
    }

    #[test]
    fn duplicate_and_invalid_selections_are_dropped() {
        let mut cube = EditMesh::cube(1.0);
        cube.select_edge(0, 1);
        cube.select_edge(1, 0);
        assert_eq!(cube.selected.len(), 1);

        cube.selected.push([1, 0]);
        cube.selected.push([0, 42]);
        assert_eq!(cube.selected_edges().len(), 1);
    }

    #[test]
    fn select_all_covers_every_cube_edge_once() {
        let mut cube = EditMesh::cube(1.0);
        cube.select_all();
        assert_eq!(cube.selected.len(), 12);
        assert!(cube.selected_edges().iter().all(|e| e.normal.is_some()));
    }

    #[test]
    fn target_state() {
        let cube = EditMesh::cube(1.0);
        assert!(cube.is_edge_editable());
        assert!(!cube.clone().with_mode(EditMode::Object).is_edge_editable());
        assert!(!cube.with_kind(ObjectKind::Curve).is_edge_editable());
    }
}
