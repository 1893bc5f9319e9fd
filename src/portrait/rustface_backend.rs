use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::ProcessError;

use super::face::{FaceBounds, FaceDetector, MIN_FACE_SIZE};

/// Pyramid step between scales, the inverse of a 1.1 scale factor
const PYRAMID_SCALE: f32 = 1.0 / 1.1;
const SCORE_THRESHOLD: f64 = 2.0;
const WINDOW_STEP: u32 = 4;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
pub(crate) struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace frontal model from disk.
    pub(crate) fn from_file(path: &Path) -> Result<Self, ProcessError> {
        let model_error = |message: String| ProcessError::Model {
            path: path.to_path_buf(),
            message,
        };
        let file = File::open(path).map_err(|e| model_error(e.to_string()))?;
        let model =
            rustface::read_model(BufReader::new(file)).map_err(|e| model_error(e.to_string()))?;
        Ok(Self { model })
    }
}

/// Drop boxes under the minimum face size, then clip the rest to the image.
fn face_bounds(x: i32, y: i32, width: u32, height: u32, img_w: u32, img_h: u32) -> Option<FaceBounds> {
    if width < MIN_FACE_SIZE || height < MIN_FACE_SIZE {
        return None;
    }
    clip_to_image(x, y, width, height, img_w, img_h)
}

/// Clip a detector box to the image; `None` if nothing is left.
fn clip_to_image(x: i32, y: i32, width: u32, height: u32, img_w: u32, img_h: u32) -> Option<FaceBounds> {
    let x1 = i64::from(x).clamp(0, i64::from(img_w));
    let y1 = i64::from(y).clamp(0, i64::from(img_h));
    let x2 = (i64::from(x) + i64::from(width)).clamp(0, i64::from(img_w));
    let y2 = (i64::from(y) + i64::from(height)).clamp(0, i64::from(img_h));
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some(FaceBounds {
        x: x1 as u32,
        y: y1 as u32,
        width: (x2 - x1) as u32,
        height: (y2 - y1) as u32,
    })
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(MIN_FACE_SIZE);
        detector.set_score_thresh(SCORE_THRESHOLD);
        detector.set_pyramid_scale_factor(PYRAMID_SCALE);
        detector.set_slide_window_step(WINDOW_STEP, WINDOW_STEP);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .filter_map(|face| {
                let bbox = face.bbox();
                face_bounds(bbox.x(), bbox.y(), bbox.width(), bbox.height(), width, height)
            })
            .collect()
    }
}
