use serde::{Deserialize, Serialize};

use crate::data::{CubeFace, FaceBox};

/// One object detected on a cubemap face.
///
/// `index` is the per-image sequential key that joins a detection with its
/// azimuth, distance and coordinate records. Detections are immutable once
/// the detection stage has numbered them.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub index: usize,
    pub face: CubeFace,
    pub bbox: FaceBox,
    #[serde(rename = "class")]
    pub class_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub confidence: f32,
}

impl Detection {
    pub fn new(index: usize, face: CubeFace, bbox: FaceBox, class_id: u32, confidence: f32) -> Self {
        Self {
            index,
            face,
            bbox,
            class_id,
            label: None,
            confidence,
        }
    }

    /// Sets the optional human-readable class label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn get_label(&self) -> String {
        self.label.clone().unwrap_or("Unknown".to_string())
    }
}
