//! Per-image orchestration around the resolvers, plus the batch runner.
//!
//! One image's processing is fully isolated: its camera pose, detections and
//! records never touch another image's. A batch keeps going past individual
//! failures and reports them in the summary instead of halting.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::DynamicImage;
use ndarray::Array2;

use crate::data::{CameraPose, CubeFace, Detection, Orientation, PanoImage};
use crate::error::LocateError;
use crate::exchange::{
    save_records, AZIMUTHS_FILE, COORDINATES_FILE, DETECTIONS_FILE, DISTANCES_FILE,
};
use crate::geometry::FaceGeometry;
use crate::metadata::read_camera_pose;
use crate::providers::{DepthProvider, DetectionProvider};
use crate::resolve::{resolve_azimuths, resolve_coordinates, resolve_distances, DepthAggregation};

/// Settings shared by every image in a run.
#[derive(Debug, Default, Clone)]
pub struct PipelineConfig {
    pub aggregation: DepthAggregation,
    /// Overrides the heading read from the camera pose when set.
    pub orientation: Option<Orientation>,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aggregation(mut self, aggregation: DepthAggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

/// Counts for one processed image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageSummary {
    pub detections: usize,
    /// Detections that produced a final coordinate.
    pub located: usize,
    /// Detections whose bearing is undefined (pole singularity).
    pub undefined_bearing: usize,
    /// Detections whose distance came back absent.
    pub missing_distance: usize,
}

/// One image that could not be processed at all.
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub image: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run. Per-image failures are collected here rather than
/// aborting the remaining images.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: Vec<(PathBuf, ImageSummary)>,
    pub failed: Vec<ImageFailure>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

/// One panorama queued for a batch run.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// The equirectangular source image; also the EXIF origin unless `pose`
    /// is supplied.
    pub image: PathBuf,
    /// Directory holding the face images; artifacts are written here too.
    pub work_dir: PathBuf,
    pub pose: Option<CameraPose>,
}

impl BatchEntry {
    pub fn new(image: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            work_dir: work_dir.into(),
            pose: None,
        }
    }

    /// Supplies the camera origin directly, skipping the EXIF read. Useful
    /// for re-runs and for panoramas whose GPS arrived out of band.
    pub fn with_pose(mut self, pose: CameraPose) -> Self {
        self.pose = Some(pose);
        self
    }

    /// Builds one entry per image with a `output_<stem>` work directory under
    /// `output_root`.
    pub fn for_images(images: &[PathBuf], output_root: &Path) -> Vec<BatchEntry> {
        images
            .iter()
            .map(|image| {
                let stem = image
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("image");
                BatchEntry::new(image.clone(), output_root.join(format!("output_{stem}")))
            })
            .collect()
    }
}

fn face_image_path(faces_dir: &Path, face: CubeFace) -> Option<PathBuf> {
    for ext in ["jpg", "jpeg", "png"] {
        let path = faces_dir.join(format!("{}.{ext}", face.str()));
        if path.is_file() {
            return Some(path);
        }
    }
    None
}

/// Loads whatever face images exist under `faces_dir`. At least one must be
/// usable; which ones exist is up to the cubemap transform that produced
/// them.
pub fn load_faces(faces_dir: &Path) -> Result<Vec<(CubeFace, DynamicImage)>, LocateError> {
    let mut faces = Vec::new();
    for face in CubeFace::ALL {
        let Some(path) = face_image_path(faces_dir, face) else {
            log::debug!("No {} face image under {}", face, faces_dir.display());
            continue;
        };
        match image::open(&path) {
            Ok(image) => faces.push((face, image)),
            Err(err) => log::warn!("Unreadable face image {}: {}", path.display(), err),
        }
    }
    if faces.is_empty() {
        return Err(LocateError::missing_input(
            "cubemap faces",
            format!("no face images under {}", faces_dir.display()),
        ));
    }
    Ok(faces)
}

fn face_size(faces: &[(CubeFace, DynamicImage)]) -> u32 {
    let size = faces[0].1.width();
    for (face, image) in faces {
        if image.width() != size || image.height() != size {
            log::warn!(
                "{} face is {}x{}, expected {size}x{size}",
                face,
                image.width(),
                image.height()
            );
        }
    }
    size
}

/// Runs the detection provider over every loaded face and numbers the
/// detections sequentially across the whole image.
///
/// A provider failure on one face is logged and skipped; the remaining faces
/// still run.
pub fn run_detection_stage<D: DetectionProvider>(
    faces: &[(CubeFace, DynamicImage)],
    provider: &mut D,
) -> Vec<Detection> {
    let mut detections: Vec<Detection> = Vec::new();
    for (face, image) in faces {
        match provider.detect(*face, image) {
            Ok(found) => {
                log::info!("{} detections on {} face", found.len(), face);
                for mut det in found {
                    det.index = detections.len();
                    detections.push(det);
                }
            }
            Err(err) => log::error!("Detection failed on {} face: {:#}", face, err),
        }
    }
    detections
}

/// Runs the depth provider over the faces that actually carry detections.
///
/// A failed face simply has no map, which downstream resolves to absent
/// distances for its detections.
pub fn run_depth_stage<P: DepthProvider>(
    faces: &[(CubeFace, DynamicImage)],
    provider: &mut P,
    needed: &HashSet<CubeFace>,
) -> HashMap<CubeFace, Array2<f32>> {
    let mut maps = HashMap::new();
    for (face, image) in faces {
        if !needed.contains(face) {
            continue;
        }
        match provider.estimate(*face, image) {
            Ok(map) => {
                maps.insert(*face, map);
            }
            Err(err) => log::warn!("Depth estimation failed on {} face: {:#}", face, err),
        }
    }
    maps
}

fn process_inner<D: DetectionProvider, P: DepthProvider>(
    pose: &CameraPose,
    geometry: Option<FaceGeometry>,
    faces_dir: &Path,
    output_dir: &Path,
    detection: &mut D,
    depth: &mut P,
    config: &PipelineConfig,
) -> anyhow::Result<ImageSummary> {
    let faces = load_faces(faces_dir)?;
    let geometry = geometry.unwrap_or_else(|| FaceGeometry::new(face_size(&faces)));
    let orientation = config.orientation.unwrap_or_else(|| pose.orientation());

    let detections = run_detection_stage(&faces, detection);
    let azimuths = resolve_azimuths(&detections, &geometry, &orientation);

    let needed: HashSet<CubeFace> = detections.iter().map(|d| d.face).collect();
    let depth_maps = run_depth_stage(&faces, depth, &needed);
    let distances = resolve_distances(&detections, &depth_maps, config.aggregation);

    let coordinates = resolve_coordinates(pose, &detections, &azimuths, &distances)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    save_records(&output_dir.join(DETECTIONS_FILE), &detections)?;
    save_records(&output_dir.join(AZIMUTHS_FILE), &azimuths)?;
    save_records(&output_dir.join(DISTANCES_FILE), &distances)?;
    save_records(&output_dir.join(COORDINATES_FILE), &coordinates)?;

    let summary = ImageSummary {
        detections: detections.len(),
        located: coordinates.len(),
        undefined_bearing: detections.len() - azimuths.len(),
        missing_distance: distances
            .iter()
            .filter(|d| d.distance_meters.is_none())
            .count(),
    };
    log::info!(
        "Located {}/{} detections ({} without bearing, {} without distance)",
        summary.located,
        summary.detections,
        summary.undefined_bearing,
        summary.missing_distance
    );
    Ok(summary)
}

/// Processes one panorama end to end: EXIF origin, detection, azimuths,
/// distances, coordinates, with all four artifacts written into `work_dir`
/// (which must already hold the cubemap face images).
pub fn process_image<D: DetectionProvider, P: DepthProvider>(
    pano_path: &Path,
    work_dir: &Path,
    detection: &mut D,
    depth: &mut P,
    config: &PipelineConfig,
) -> anyhow::Result<ImageSummary> {
    let pose = read_camera_pose(pano_path)?;
    let pano = PanoImage::new(
        image::open(pano_path).with_context(|| format!("loading {}", pano_path.display()))?,
    );
    if !pano.is_equirect() {
        log::warn!(
            "{} is {}x{}, not a 2:1 equirectangular image",
            pano_path.display(),
            pano.width,
            pano.height
        );
    }
    process_inner(
        &pose,
        Some(pano.face_geometry()),
        work_dir,
        work_dir,
        detection,
        depth,
        config,
    )
}

/// Like [`process_image`] but with the camera origin supplied directly; the
/// face geometry is taken from the face images themselves.
pub fn process_faces<D: DetectionProvider, P: DepthProvider>(
    pose: &CameraPose,
    faces_dir: &Path,
    output_dir: &Path,
    detection: &mut D,
    depth: &mut P,
    config: &PipelineConfig,
) -> anyhow::Result<ImageSummary> {
    process_inner(pose, None, faces_dir, output_dir, detection, depth, config)
}

/// Lists the panorama images directly under `dir`, sorted by name.
pub async fn collect_images(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("reading {}", dir.display()))?;
    let mut images = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "jpg" | "jpeg" | "png"))
            .unwrap_or(false);
        if is_image && entry.file_type().await?.is_file() {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Processes a batch of panoramas. Providers are built fresh per image so
/// every image runs under complete isolation; one image's failure is
/// recorded and the run continues.
pub async fn run_batch<D, P, FD, FP>(
    entries: Vec<BatchEntry>,
    config: PipelineConfig,
    make_detection: FD,
    make_depth: FP,
) -> BatchSummary
where
    D: DetectionProvider + Send + 'static,
    P: DepthProvider + Send + 'static,
    FD: Fn() -> D,
    FP: Fn() -> P,
{
    let mut summary = BatchSummary::default();
    for entry in entries {
        let image = entry.image.clone();
        log::info!("Processing {}", image.display());

        let mut detection = make_detection();
        let mut depth = make_depth();
        let cfg = config.clone();
        let result = tokio::task::spawn_blocking(move || match entry.pose {
            Some(pose) => process_faces(
                &pose,
                &entry.work_dir,
                &entry.work_dir,
                &mut detection,
                &mut depth,
                &cfg,
            ),
            None => process_image(&entry.image, &entry.work_dir, &mut detection, &mut depth, &cfg),
        })
        .await;

        match result {
            Ok(Ok(image_summary)) => summary.processed.push((image, image_summary)),
            Ok(Err(err)) => {
                log::error!("Failed to process {}: {:#}", image.display(), err);
                summary.failed.push(ImageFailure {
                    image,
                    reason: format!("{err:#}"),
                });
            }
            Err(err) => {
                log::error!("Worker for {} panicked: {}", image.display(), err);
                summary.failed.push(ImageFailure {
                    image,
                    reason: format!("worker panicked: {err}"),
                });
            }
        }
    }
    log::info!(
        "Batch finished: {} processed, {} failed",
        summary.processed.len(),
        summary.failed.len()
    );
    summary
}
