mod centroid;
mod index;
mod proj;
mod signature;
mod vertex;

pub(crate) use centroid::centroid_inside;
pub(crate) use index::{BoundsIndex, envelope};
pub(crate) use proj::GeographicTransform;
pub use signature::GeometrySignature;
pub(crate) use vertex::{exterior_vertex_count, parse_polygonal};
