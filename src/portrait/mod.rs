//! Portrait normalization: face crop, resize, background removal
//!
//! Every avatar leaves here as a `TARGET_SIZE`×`TARGET_SIZE` RGBA image.

pub(crate) mod background;
pub(crate) mod crop;
pub(crate) mod face;
#[cfg(feature = "onnx")]
pub(crate) mod onnx_backend;
#[cfg(feature = "rustface")]
pub(crate) mod rustface_backend;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use log::{debug, info};

use crate::consts::TARGET_SIZE;
use crate::error::ProcessError;

pub(crate) use background::BackgroundRemover;
pub(crate) use crop::{CropRegion, center_crop, face_crop};
pub(crate) use face::{FaceDetector, largest_face};

pub(crate) struct PortraitNormalizer {
    detector: Box<dyn FaceDetector>,
    remover: Box<dyn BackgroundRemover>,
}

impl PortraitNormalizer {
    pub(crate) fn new(detector: Box<dyn FaceDetector>, remover: Box<dyn BackgroundRemover>) -> Self {
        Self { detector, remover }
    }

    /// Choose the square to cut out of `image`: around the largest face
    /// if one is found, else the centered square.
    pub(crate) fn crop_region(&self, image: &DynamicImage) -> CropRegion {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();
        let faces = self.detector.detect(gray.as_raw(), width, height);
        debug!("Detected {} face(s) in {}x{}", faces.len(), width, height);

        match largest_face(&faces) {
            Some(face) => face_crop(&face, width, height),
            None => {
                info!("No face detected, using center crop");
                center_crop(width, height)
            }
        }
    }

    pub(crate) fn normalize(&mut self, image: &DynamicImage) -> Result<RgbaImage, ProcessError> {
        let region = self.crop_region(image);
        let cropped = image.crop_imm(region.x, region.y, region.width, region.height);
        let resized = cropped
            .resize_exact(TARGET_SIZE, TARGET_SIZE, FilterType::Lanczos3)
            .to_rgb8();
        self.remover.remove(&resized)
    }
}

/// Load the detector and remover configured for this build.
#[cfg(all(feature = "rustface", feature = "onnx"))]
pub(crate) fn load_normalizer(
    face_model: &std::path::Path,
    segmentation_model: &std::path::Path,
) -> Result<PortraitNormalizer, ProcessError> {
    let detector = rustface_backend::RustfaceDetector::from_file(face_model)?;
    let remover = onnx_backend::OnnxRemover::from_file(segmentation_model)?;
    Ok(PortraitNormalizer::new(Box::new(detector), Box::new(remover)))
}

#[cfg(not(all(feature = "rustface", feature = "onnx")))]
pub(crate) fn load_normalizer(
    face_model: &std::path::Path,
    _segmentation_model: &std::path::Path,
) -> Result<PortraitNormalizer, ProcessError> {
    Err(ProcessError::Model {
        path: face_model.to_path_buf(),
        message: "built without the `rustface` and `onnx` features".to_string(),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic stand-ins for the model backends

    use image::{RgbImage, RgbaImage};

    use super::background::BackgroundRemover;
    use super::face::{FaceBounds, FaceDetector};
    use crate::error::ProcessError;

    /// Reports the same faces for every image
    pub(crate) struct FixedFaces(pub(crate) Vec<FaceBounds>);

    impl FaceDetector for FixedFaces {
        fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<FaceBounds> {
            self.0.clone()
        }
    }

    /// Keeps the left half opaque and clears the right half
    pub(crate) struct HalfMask;

    impl BackgroundRemover for HalfMask {
        fn remove(&mut self, image: &RgbImage) -> Result<RgbaImage, ProcessError> {
            let half = image.width() / 2;
            Ok(RgbaImage::from_fn(image.width(), image.height(), |x, y| {
                let [r, g, b] = image.get_pixel(x, y).0;
                image::Rgba([r, g, b, if x < half { 255 } else { 0 }])
            }))
        }
    }

    pub(crate) struct FailingRemover;

    impl BackgroundRemover for FailingRemover {
        fn remove(&mut self, _image: &RgbImage) -> Result<RgbaImage, ProcessError> {
            Err(ProcessError::Inference("model exploded".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::face::FaceBounds;
    use super::testing::{FailingRemover, FixedFaces, HalfMask};
    use super::*;
    use image::RgbImage;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
            ])
        }))
    }

    fn normalizer(faces: Vec<FaceBounds>) -> PortraitNormalizer {
        PortraitNormalizer::new(Box::new(FixedFaces(faces)), Box::new(HalfMask))
    }

    #[test]
    fn output_is_target_size_for_any_aspect() {
        for (w, h) in [(800, 600), (300, 900), (512, 512), (40, 30), (2000, 120)] {
            let out = normalizer(vec![]).normalize(&gradient(w, h)).unwrap();
            assert_eq!(out.dimensions(), (TARGET_SIZE, TARGET_SIZE), "input {w}x{h}");
        }
    }

    #[test]
    fn output_carries_alpha_from_remover() {
        let out = normalizer(vec![]).normalize(&gradient(640, 480)).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[3], 255);
        assert_eq!(out.get_pixel(TARGET_SIZE - 1, 0).0[3], 0);
    }

    #[test]
    fn no_face_uses_center_square() {
        let region = normalizer(vec![]).crop_region(&gradient(800, 600));
        assert_eq!(region, center_crop(800, 600));
    }

    #[test]
    fn largest_face_drives_crop() {
        let small = FaceBounds {
            x: 10,
            y: 10,
            width: 60,
            height: 60,
        };
        let big = FaceBounds {
            x: 400,
            y: 300,
            width: 100,
            height: 100,
        };
        let region = normalizer(vec![small, big]).crop_region(&gradient(1000, 1000));
        assert_eq!(region, face_crop(&big, 1000, 1000));
    }

    #[test]
    fn remover_failure_propagates() {
        let mut n = PortraitNormalizer::new(Box::new(FixedFaces(vec![])), Box::new(FailingRemover));
        let err = n.normalize(&gradient(100, 100)).unwrap_err();
        assert!(matches!(err, ProcessError::Inference(_)));
    }
}
