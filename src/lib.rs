#![doc = "GeoSieve public API"]
mod config;
mod geom;
mod pipeline;
mod types;

#[doc(inline)]
pub use config::PipelineConfig;

#[doc(inline)]
pub use types::{Record, RecordError, RecordId, RecordIssue};

#[doc(inline)]
pub use pipeline::{Classification, OverlapPair, ValidRecord, VertexFlag, classify};

#[doc(inline)]
pub use geom::GeometrySignature;
