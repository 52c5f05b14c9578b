use image::{DynamicImage, GenericImageView};

use crate::geometry::FaceGeometry;

/// An equirectangular 360° panorama plus the cubemap geometry derived from it.
///
/// Each cube face covers a quarter of the horizontal field, so the face edge
/// length defaults to a quarter of the panorama width.
#[derive(Debug, Clone)]
pub struct PanoImage {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
    pub cube_size: u32,
}

impl PanoImage {
    pub fn new(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            width,
            height,
            cube_size: width / 4,
        }
    }

    /// Overrides the derived face edge length, for face sets rendered at a
    /// different resolution than width/4.
    pub fn with_cube_size(mut self, cube_size: u32) -> Self {
        self.cube_size = cube_size;
        self
    }

    pub fn get_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// True for the 2:1 aspect every equirectangular projection has.
    pub fn is_equirect(&self) -> bool {
        self.width == self.height * 2
    }

    pub fn face_geometry(&self) -> FaceGeometry {
        FaceGeometry::new(self.cube_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_size_is_quarter_width() {
        let pano = PanoImage::new(DynamicImage::new_rgb8(2048, 1024));
        assert_eq!(pano.cube_size, 512);
        assert!(pano.is_equirect());
        assert_eq!(pano.get_ratio(), 2.0);
    }

    #[test]
    fn non_equirect_aspect_detected() {
        let pano = PanoImage::new(DynamicImage::new_rgb8(1920, 1080));
        assert!(!pano.is_equirect());
    }
}
