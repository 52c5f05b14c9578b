//! Geolocation of objects detected in 360° panoramas: bounding boxes on
//! cubemap faces become bearings, bearings plus estimated distances become
//! GPS coordinates via great-circle projection from the camera's position.

pub mod data;
pub mod error;
pub mod exchange;
pub mod geometry;
pub mod metadata;
pub mod pipeline;
pub mod providers;
pub mod resolve;

pub use crate::data::{
    AzimuthRecord, CameraPose, CubeFace, Detection, DistanceRecord, FaceBox, GeoCoordinate,
    Orientation, PanoImage,
};
pub use crate::error::LocateError;
pub use crate::geometry::{destination_point, FaceGeometry, EARTH_RADIUS_M};
pub use crate::pipeline::{
    process_faces, process_image, run_batch, BatchEntry, BatchSummary, ImageSummary,
    PipelineConfig,
};
pub use crate::providers::{DepthProvider, DetectionProvider};
pub use crate::resolve::{
    resolve_azimuth, resolve_azimuths, resolve_coordinates, resolve_distance, resolve_distances,
    DepthAggregation,
};

pub type Result<T, E = LocateError> = std::result::Result<T, E>;
