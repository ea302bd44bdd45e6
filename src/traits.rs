use crate::edge::Edge;
use crate::errors::PlacementError;
use crate::float_types::Real;
use crate::placement::Placement;
use nalgebra::{Matrix4, Vector3};
use std::fmt::Debug;

/// What kind of object a target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Mesh,
    Curve,
    Empty,
}

/// Editing state of a target object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Object,
    Edit,
}

/// Anything that can report the edges a user selected.
pub trait EdgeSelection {
    /// Selected edges in object-local space, in a stable order.
    fn selected_edges(&self) -> Vec<Edge>;
}

/// The object rivets are placed on.
pub trait RivetTarget: EdgeSelection {
    fn kind(&self) -> ObjectKind;
    fn mode(&self) -> EditMode;

    /// Local-to-world transform of the target.
    fn world_transform(&self) -> Matrix4<Real>;

    /// Whether edges can be selected right now: a mesh in edit mode.
    fn is_edge_editable(&self) -> bool {
        self.kind() == ObjectKind::Mesh && self.mode() == EditMode::Edit
    }
}

/// The object being copied.
pub trait TemplateSource<S: Clone + Send + Sync + Debug> {
    fn name(&self) -> &str;

    /// The template's own scale, carried unchanged onto every copy.
    fn scale(&self) -> Vector3<Real>;

    fn metadata(&self) -> Option<S> {
        None
    }
}

/// Host-side capability that turns placements into scene objects.
///
/// The host owns everything it creates. Placement code only hands it
/// descriptors.
pub trait RivetHost<S: Clone + Send + Sync + Debug> {
    type Handle;

    /// Duplicate `template`, apply `placement` and link the copy into the scene.
    fn instantiate<T: TemplateSource<S>>(
        &mut self,
        template: &T,
        placement: &Placement<S>,
    ) -> Result<Self::Handle, PlacementError>;

    /// Remove instances created earlier in a commit that failed part way.
    fn rollback(&mut self, handles: Vec<Self::Handle>);
}
