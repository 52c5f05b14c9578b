use serde::{Deserialize, Serialize};

/// GPS position of the camera that shot one panorama, in decimal degrees.
///
/// Read once per image and passed explicitly into the resolvers; never held
/// as process-wide state, so images stay independently processable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub latitude: f64,
    pub longitude: f64,
    /// Bearing of the panorama's front face relative to true North, when the
    /// capture rig records one. `None` means the front face already points
    /// North.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
}

impl CameraPose {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            heading_deg: None,
        }
    }

    pub fn with_heading(mut self, heading_deg: f64) -> Self {
        self.heading_deg = Some(heading_deg);
        self
    }

    pub fn orientation(&self) -> Orientation {
        Orientation {
            heading_deg: self.heading_deg.unwrap_or(0.0),
        }
    }
}

/// Rotation of the panorama frame relative to true North. Added to every raw
/// bearing before normalization.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub heading_deg: f64,
}

impl Orientation {
    pub fn new(heading_deg: f64) -> Self {
        Self { heading_deg }
    }
}
