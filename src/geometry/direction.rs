use crate::data::CubeFace;

/// Pixel-to-ray geometry shared by all six faces of one cubemap.
///
/// Every face is a rectilinear projection of the scene, so the mapping from
/// a pixel offset to an angle goes through `atan2` of the 3-D ray. A linear
/// pixel-to-degree mapping only looks right near the face center and drifts
/// badly toward the edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    cube_size: f64,
}

impl FaceGeometry {
    pub fn new(cube_size: u32) -> Self {
        Self {
            cube_size: cube_size as f64,
        }
    }

    /// Geometry of the cubemap rendered from an equirectangular panorama of
    /// the given width (each face spans a quarter of the horizontal field).
    pub fn from_equirect_width(width: u32) -> Self {
        Self::new(width / 4)
    }

    pub fn cube_size(&self) -> f64 {
        self.cube_size
    }

    /// Ray from the camera through pixel `(i, j)` of `face`, on the unit
    /// cube. +z is the front face axis, +x right, +y up.
    pub fn direction(&self, face: CubeFace, i: f64, j: f64) -> [f64; 3] {
        let a = 2.0 * i / self.cube_size - 1.0;
        let b = 1.0 - 2.0 * j / self.cube_size;
        match face {
            CubeFace::Front => [a, b, 1.0],
            CubeFace::Right => [1.0, b, -a],
            CubeFace::Back => [-a, b, -1.0],
            CubeFace::Left => [-1.0, b, a],
            CubeFace::Up => [a, 1.0, -b],
            CubeFace::Down => [a, -1.0, b],
        }
    }

    /// Bearing of the ray through pixel `(i, j)` of `face`, in degrees
    /// clockwise from North, in `[0, 360)`.
    ///
    /// On the up/down faces the bearing comes from the horizontal projection
    /// of the ray; at the exact face center that projection vanishes and no
    /// bearing exists, which yields `None`. Lateral faces always resolve.
    pub fn azimuth_from_pixel(&self, face: CubeFace, i: f64, j: f64) -> Option<f64> {
        let [x, _, z] = self.direction(face, i, j);
        if x == 0.0 && z == 0.0 {
            return None;
        }
        Some(super::normalize_bearing(x.atan2(z).to_degrees()))
    }
}
