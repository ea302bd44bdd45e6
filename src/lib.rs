//! Place copies of a template object (a **rivet**) along the selected edges of a
//! polygon mesh, spaced evenly or in proportion to edge length, and oriented to
//! each edge's tangent and its adjacent face normal.
//!
//! The crate only computes placement descriptors. Creating, linking and undoing
//! scene objects stays with the host, behind the [`RivetHost`] trait.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to lay out edges in parallel
//! - **serde**: serialize and deserialize [`PlacementRequest`] for stored tool settings

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod edge;
pub mod errors;
pub mod float_types;
pub mod frame;
pub mod mesh;
pub mod placement;
pub mod placer;
pub mod request;
pub mod template;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use edge::Edge;
pub use errors::PlacementError;
pub use mesh::EditMesh;
pub use placement::{Placement, PlacementResult};
pub use placer::{commit, place_edges, place_rivets};
pub use request::{CountRounding, DistributionMode, Layout, PlacementRequest};
pub use template::RivetTemplate;
pub use traits::{RivetHost, RivetTarget, TemplateSource};
