mod stub;

pub use stub::*;

use image::DynamicImage;
use ndarray::Array2;

use crate::data::{CubeFace, Detection};

/// External object-detection model, invoked once per cubemap face.
///
/// Implementations may leave `Detection::index` at 0; the detection stage
/// assigns the per-image sequential indices after collecting all faces. An
/// error from one face is logged and skipped without aborting the others.
pub trait DetectionProvider {
    fn detect(&mut self, face: CubeFace, image: &DynamicImage) -> anyhow::Result<Vec<Detection>>;
}

/// External monocular-depth model, invoked once per cubemap face.
///
/// Returns a dense depth map in meters with the same row/column layout as
/// the face image. A failure yields absent distances for that face's
/// detections, never a pipeline abort.
pub trait DepthProvider {
    fn estimate(&mut self, face: CubeFace, image: &DynamicImage) -> anyhow::Result<Array2<f32>>;
}
