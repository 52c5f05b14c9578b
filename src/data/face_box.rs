use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates of a single cubemap face.
///
/// Serializes as the flat `[xmin, ymin, xmax, ymax]` array used by the
/// exchange artifacts.
#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct FaceBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub w: f32,
    pub h: f32,
}

impl FaceBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            w: x2 - x1,
            h: y2 - y1,
        }
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f32 {
        self.w
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f32 {
        self.h
    }

    /// Returns the center x-coordinate of the bounding box.
    pub fn cx(&self) -> f32 {
        self.x1 + self.w / 2.
    }

    /// Returns the center y-coordinate of the bounding box.
    pub fn cy(&self) -> f32 {
        self.y1 + self.h / 2.
    }

    /// Computes the area of the bounding box.
    pub fn area(&self) -> f32 {
        self.h * self.w
    }

    /// True when the box spans at least one pixel in both directions.
    pub fn has_area(&self) -> bool {
        self.w > 0. && self.h > 0.
    }

    /// Returns the bounding box coordinates as `(x1, y1, x2, y2)`.
    pub fn xy1_xy2(&self) -> (f32, f32, f32, f32) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)` and
    /// recalculates width and height.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;

        self.w = x2 - x1;
        self.h = y2 - y1;
        self
    }

    /// Sets the bounding box's coordinates and dimensions using `(cx, cy, w, h)`.
    pub fn with_cxcy_wh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - (w / 2.0);
        self.y1 = cy - (h / 2.0);
        self.w = w;
        self.h = h;

        self.x2 = cx + (w / 2.0);
        self.y2 = cy + (h / 2.0);
        self
    }
}

impl From<[f32; 4]> for FaceBox {
    fn from(v: [f32; 4]) -> Self {
        FaceBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<FaceBox> for [f32; 4] {
    fn from(b: FaceBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_area() {
        let b = FaceBox::new(10.0, 20.0, 30.0, 60.0);
        assert_eq!(b.cx(), 20.0);
        assert_eq!(b.cy(), 40.0);
        assert_eq!(b.area(), 800.0);
        assert!(b.has_area());
    }

    #[test]
    fn degenerate_box_has_no_area() {
        assert!(!FaceBox::new(5.0, 5.0, 5.0, 9.0).has_area());
        assert!(!FaceBox::new(9.0, 5.0, 5.0, 9.0).has_area());
    }

    #[test]
    fn serializes_as_flat_array() {
        let b = FaceBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(serde_json::to_string(&b).unwrap(), "[1.0,2.0,3.0,4.0]");
        let back: FaceBox = serde_json::from_str("[1.0,2.0,3.0,4.0]").unwrap();
        assert_eq!(back, b);
        assert_eq!(back.w, 2.0);
    }
}
