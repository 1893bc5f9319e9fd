use image::{GrayImage, RgbImage, RgbaImage};

use crate::error::ProcessError;

/// Separates the subject from the background.
pub(crate) trait BackgroundRemover {
    /// Return `image` with an alpha channel that hides the background.
    fn remove(&mut self, image: &RgbImage) -> Result<RgbaImage, ProcessError>;
}

/// Attach `mask` to `image` as its alpha channel.
///
/// Both must have the same dimensions.
pub(crate) fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let [a] = mask.get_pixel(x, y).0;
        image::Rgba([r, g, b, a])
    })
}
