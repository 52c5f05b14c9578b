use std::collections::HashMap;

use ndarray::Array2;

use crate::data::{CubeFace, Detection, DistanceRecord};

/// How the depth samples inside a bounding box collapse to one scalar.
///
/// Box edges routinely clip background or foreground pixels, so both
/// policies are order statistics rather than a plain mean.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum DepthAggregation {
    /// Median of the in-box samples.
    #[default]
    Median,
    /// Mean after dropping the given fraction of samples at each extreme.
    TrimmedMean(f64),
}

impl DepthAggregation {
    pub fn from_str(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "median" => Some(DepthAggregation::Median),
            "trimmed_mean" | "trimmed-mean" => Some(DepthAggregation::TrimmedMean(0.1)),
            _ => None,
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            DepthAggregation::Median => "median",
            DepthAggregation::TrimmedMean(_) => "trimmed_mean",
        }
    }

    fn aggregate(&self, mut samples: Vec<f32>) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        samples.sort_by(f32::total_cmp);
        match *self {
            DepthAggregation::Median => {
                let n = samples.len();
                let mid = n / 2;
                if n % 2 == 1 {
                    Some(samples[mid] as f64)
                } else {
                    Some((samples[mid - 1] as f64 + samples[mid] as f64) / 2.0)
                }
            }
            DepthAggregation::TrimmedMean(fraction) => {
                let n = samples.len();
                let trim = ((n as f64 * fraction.clamp(0.0, 0.5)) as usize).min((n - 1) / 2);
                let kept = &samples[trim..n - trim];
                let sum: f64 = kept.iter().map(|&v| v as f64).sum();
                Some(sum / kept.len() as f64)
            }
        }
    }
}

/// Resolves a single detection's distance from the dense depth map of its
/// face, in meters.
///
/// The box is clipped to the map bounds first; a zero-area or fully
/// out-of-bounds box yields `None`, as does a region with no usable samples
/// (non-finite or non-positive depth values are discarded).
pub fn resolve_distance(
    detection: &Detection,
    depth_map: &Array2<f32>,
    aggregation: DepthAggregation,
) -> Option<f64> {
    if !detection.bbox.has_area() {
        return None;
    }

    let (rows, cols) = depth_map.dim();
    let (bx1, by1, bx2, by2) = detection.bbox.xy1_xy2();
    let x1 = (bx1.max(0.0) as usize).min(cols);
    let y1 = (by1.max(0.0) as usize).min(rows);
    let x2 = (bx2.max(0.0) as usize).min(cols);
    let y2 = (by2.max(0.0) as usize).min(rows);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }

    let region = depth_map.slice(ndarray::s![y1..y2, x1..x2]);
    let samples: Vec<f32> = region
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    aggregation.aggregate(samples)
}

/// Resolves distances for a whole detection set from per-face depth maps.
///
/// A face whose depth map is missing (the depth model failed there) yields
/// `None` for its detections; every detection keeps a record so the absence
/// stays observable downstream.
pub fn resolve_distances(
    detections: &[Detection],
    depth_maps: &HashMap<CubeFace, Array2<f32>>,
    aggregation: DepthAggregation,
) -> Vec<DistanceRecord> {
    detections
        .iter()
        .map(|det| {
            let distance = depth_maps
                .get(&det.face)
                .and_then(|map| resolve_distance(det, map, aggregation));
            if distance.is_none() {
                log::debug!("No distance for detection {} on {} face", det.index, det.face);
            }
            DistanceRecord::new(det.index, distance)
        })
        .collect()
}
