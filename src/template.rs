//! The object copied at every rivet position.

use crate::float_types::Real;
use crate::traits::TemplateSource;
use nalgebra::Vector3;
use std::fmt::Debug;

/// A plain template handle: a name, a scale, and optional metadata that is
/// cloned onto every placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RivetTemplate<S: Clone + Send + Sync + Debug> {
    pub name: String,
    pub scale: Vector3<Real>,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> RivetTemplate<S> {
    /// A template at unit scale.
    pub fn new(name: impl Into<String>, metadata: Option<S>) -> Self {
        RivetTemplate {
            name: name.into(),
            scale: Vector3::repeat(1.0),
            metadata,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vector3<Real>) -> Self {
        self.scale = scale;
        self
    }
}

impl<S: Clone + Send + Sync + Debug> TemplateSource<S> for RivetTemplate<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn scale(&self) -> Vector3<Real> {
        self.scale
    }

    fn metadata(&self) -> Option<S> {
        self.metadata.clone()
    }
}
