mod camera_pose;
mod cube_face;
mod detection;
mod face_box;
mod pano_image;
mod records;

pub use camera_pose::*;
pub use cube_face::*;
pub use detection::*;
pub use face_box::*;
pub use pano_image::*;
pub use records::*;
