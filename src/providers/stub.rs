use anyhow::anyhow;
use image::DynamicImage;
use ndarray::Array2;

use crate::data::{CubeFace, Detection, FaceBox};
use crate::providers::{DepthProvider, DetectionProvider};

/// Detection provider with a fixed script of boxes, for wiring tests and
/// downstream integration without a model runtime.
#[derive(Debug, Default, Clone)]
pub struct StubDetectionProvider {
    planned: Vec<(CubeFace, FaceBox, u32, f32)>,
    fail_faces: Vec<CubeFace>,
}

impl StubDetectionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, face: CubeFace, bbox: FaceBox, class_id: u32, confidence: f32) -> Self {
        self.planned.push((face, bbox, class_id, confidence));
        self
    }

    /// Makes `detect` fail on the given face, to exercise per-face error
    /// isolation.
    pub fn with_failure_on(mut self, face: CubeFace) -> Self {
        self.fail_faces.push(face);
        self
    }
}

impl DetectionProvider for StubDetectionProvider {
    fn detect(&mut self, face: CubeFace, _image: &DynamicImage) -> anyhow::Result<Vec<Detection>> {
        if self.fail_faces.contains(&face) {
            return Err(anyhow!("stub detector configured to fail on {} face", face));
        }
        Ok(self
            .planned
            .iter()
            .filter(|(f, ..)| *f == face)
            .map(|&(f, bbox, class_id, confidence)| Detection::new(0, f, bbox, class_id, confidence))
            .collect())
    }
}

/// Depth provider returning a constant-depth map sized to the face image.
#[derive(Debug, Clone)]
pub struct StubDepthProvider {
    depth_m: f32,
    fail_faces: Vec<CubeFace>,
}

impl StubDepthProvider {
    pub fn new(depth_m: f32) -> Self {
        Self {
            depth_m,
            fail_faces: Vec::new(),
        }
    }

    /// Makes `estimate` fail on the given face, to exercise absent-distance
    /// propagation.
    pub fn with_failure_on(mut self, face: CubeFace) -> Self {
        self.fail_faces.push(face);
        self
    }
}

impl DepthProvider for StubDepthProvider {
    fn estimate(&mut self, face: CubeFace, image: &DynamicImage) -> anyhow::Result<Array2<f32>> {
        if self.fail_faces.contains(&face) {
            return Err(anyhow!("stub depth model configured to fail on {} face", face));
        }
        Ok(Array2::from_elem(
            (image.height() as usize, image.width() as usize),
            self.depth_m,
        ))
    }
}
