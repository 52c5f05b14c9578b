use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six perspective faces of the cubemap enclosing the camera.
///
/// Face order matches the cubemap converter output: front=0, right=1, back=2,
/// left=3, up=4, down=5. The four lateral faces have fixed center bearings of
/// 0, 90, 180 and 270 degrees; up/down have no center bearing at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CubeFace {
    #[default]
    Front,
    Right,
    Back,
    Left,
    Up,
    Down,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Right,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Up,
        CubeFace::Down,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_str(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "front" => Some(CubeFace::Front),
            "right" => Some(CubeFace::Right),
            "back" => Some(CubeFace::Back),
            "left" => Some(CubeFace::Left),
            "up" | "top" => Some(CubeFace::Up),
            "down" | "bottom" => Some(CubeFace::Down),
            _ => None,
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            CubeFace::Front => "front",
            CubeFace::Right => "right",
            CubeFace::Back => "back",
            CubeFace::Left => "left",
            CubeFace::Up => "up",
            CubeFace::Down => "down",
        }
    }

    /// True for the four horizon-facing faces.
    pub fn is_lateral(&self) -> bool {
        !matches!(self, CubeFace::Up | CubeFace::Down)
    }

    /// Bearing of the face center, clockwise from North. `None` for up/down:
    /// a bearing is undefined at the zenith and nadir.
    pub fn center_bearing(&self) -> Option<f64> {
        match self {
            CubeFace::Front => Some(0.0),
            CubeFace::Right => Some(90.0),
            CubeFace::Back => Some(180.0),
            CubeFace::Left => Some(270.0),
            CubeFace::Up | CubeFace::Down => None,
        }
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for face in CubeFace::ALL {
            assert_eq!(CubeFace::from_index(face.index()), Some(face));
        }
        assert_eq!(CubeFace::from_index(6), None);
    }

    #[test]
    fn name_round_trip() {
        for face in CubeFace::ALL {
            assert_eq!(CubeFace::from_str(face.str()), Some(face));
        }
        assert_eq!(CubeFace::from_str("Top"), Some(CubeFace::Up));
        assert_eq!(CubeFace::from_str("side"), None);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&CubeFace::Back).unwrap();
        assert_eq!(json, "\"back\"");
        let face: CubeFace = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(face, CubeFace::Down);
    }
}
