use std::path::Path;

use image::imageops::FilterType;
use image::{GrayImage, RgbImage, RgbaImage};
use log::debug;
use ort::session::Session;
use ort::value::Tensor;

use crate::error::ProcessError;

use super::background::{BackgroundRemover, apply_mask};

/// Square input resolution of U²-Net style models
const MODEL_INPUT_SIZE: u32 = 320;
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Salient-object segmentation through ONNX Runtime.
///
/// Expects a single `1×3×320×320` float input and uses the first output
/// map (`1×1×320×320`) as the foreground probability.
pub(crate) struct OnnxRemover {
    session: Session,
}

impl OnnxRemover {
    pub(crate) fn from_file(path: &Path) -> Result<Self, ProcessError> {
        let model_error = |message: String| ProcessError::Model {
            path: path.to_path_buf(),
            message,
        };
        if !path.is_file() {
            return Err(model_error("file not found".to_string()));
        }
        let builder = Session::builder().map_err(|e| model_error(e.to_string()))?;
        let session = builder
            .commit_from_file(path)
            .map_err(|e| model_error(e.to_string()))?;
        debug!("Loaded segmentation model {}", path.display());
        Ok(Self { session })
    }
}

/// NCHW float tensor data, scaled by the brightest channel value and
/// normalized with ImageNet statistics.
pub(crate) fn preprocess(image: &RgbImage) -> Vec<f32> {
    let resized = image::imageops::resize(
        image,
        MODEL_INPUT_SIZE,
        MODEL_INPUT_SIZE,
        FilterType::Lanczos3,
    );
    let max = resized
        .as_raw()
        .iter()
        .copied()
        .max()
        .map_or(1e-6, |m| f32::from(m).max(1e-6));

    let plane = (MODEL_INPUT_SIZE * MODEL_INPUT_SIZE) as usize;
    let mut data = vec![0.0f32; 3 * plane];
    for (i, pixel) in resized.pixels().enumerate() {
        for c in 0..3 {
            data[c * plane + i] = (f32::from(pixel[c]) / max - MEAN[c]) / STD[c];
        }
    }
    data
}

/// Min-max normalize a probability map into an 8-bit mask of `size`×`size`.
pub(crate) fn prediction_to_mask(prediction: &[f32], size: u32) -> Option<GrayImage> {
    let (min, max) = prediction
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = if max > min { max - min } else { 1.0 };
    let bytes: Vec<u8> = prediction
        .iter()
        .map(|&v| (((v - min) / range) * 255.0).clamp(0.0, 255.0) as u8)
        .collect();
    GrayImage::from_raw(size, size, bytes)
}

impl BackgroundRemover for OnnxRemover {
    fn remove(&mut self, image: &RgbImage) -> Result<RgbaImage, ProcessError> {
        let size = MODEL_INPUT_SIZE as usize;
        let input = Tensor::from_array(([1usize, 3, size, size], preprocess(image)))
            .map_err(|e| ProcessError::Inference(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![input])
            .map_err(|e| ProcessError::Inference(e.to_string()))?;
        let (_, prediction) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ProcessError::Inference(e.to_string()))?;

        if prediction.len() < size * size {
            return Err(ProcessError::Inference(format!(
                "expected a {size}x{size} map, got {} values",
                prediction.len()
            )));
        }
        let mask = prediction_to_mask(&prediction[..size * size], MODEL_INPUT_SIZE)
            .ok_or_else(|| ProcessError::Inference("mask buffer size mismatch".to_string()))?;
        let mask = image::imageops::resize(&mask, image.width(), image.height(), FilterType::Lanczos3);

        Ok(apply_mask(image, &mask))
    }
}
