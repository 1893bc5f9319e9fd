use super::face::FaceBounds;

/// Horizontal padding on each side, as a fraction of face width
const PAD_X: f64 = 0.45;
/// Padding above the face, as a fraction of face height
const PAD_TOP: f64 = 0.5;
/// Padding below the face (chin and neck), as a fraction of face height
const PAD_BOTTOM: f64 = 0.65;

/// Crop region within the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CropRegion {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl CropRegion {
    fn from_corners(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        CropRegion {
            x: x1 as u32,
            y: y1 as u32,
            width: (x2 - x1) as u32,
            height: (y2 - y1) as u32,
        }
    }
}

fn scaled(value: u32, factor: f64) -> i64 {
    // Truncates toward zero
    (f64::from(value) * factor) as i64
}

/// Square crop around a face, padded to take in hair, chin, and neck.
///
/// The padded box is clamped to the image, grown to a square on its longer
/// side, centered on the padded box, and pushed back inside the image when
/// it runs over an edge. The square only shrinks when the image itself is
/// smaller than the side.
pub(crate) fn face_crop(face: &FaceBounds, image_width: u32, image_height: u32) -> CropRegion {
    let (w, h) = (i64::from(image_width), i64::from(image_height));
    let (fx, fy) = (i64::from(face.x), i64::from(face.y));
    let (fw, fh) = (i64::from(face.width), i64::from(face.height));

    let pad_x = scaled(face.width, PAD_X);
    let pad_top = scaled(face.height, PAD_TOP);
    let pad_bottom = scaled(face.height, PAD_BOTTOM);

    let x1 = (fx - pad_x).max(0);
    let y1 = (fy - pad_top).max(0);
    let x2 = (fx + fw + pad_x).min(w);
    let y2 = (fy + fh + pad_bottom).min(h);

    let side = (x2 - x1).max(y2 - y1);

    let cx = (x1 + x2) / 2;
    let cy = (y1 + y2) / 2;
    let mut x1 = (cx - side / 2).max(0);
    let mut y1 = (cy - side / 2).max(0);
    let x2 = (x1 + side).min(w);
    let y2 = (y1 + side).min(h);

    if x2 - x1 < side {
        x1 = (x2 - side).max(0);
    }
    if y2 - y1 < side {
        y1 = (y2 - side).max(0);
    }

    CropRegion::from_corners(x1, y1, x2, y2)
}

/// Largest centered square, used when no face is found.
pub(crate) fn center_crop(image_width: u32, image_height: u32) -> CropRegion {
    let side = image_width.min(image_height);
    CropRegion {
        x: (image_width - side) / 2,
        y: (image_height - side) / 2,
        width: side,
        height: side,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(x: u32, y: u32, width: u32, height: u32) -> FaceBounds {
        FaceBounds {
            x,
            y,
            width,
            height,
        }
    }

    fn assert_inside(crop: &CropRegion, w: u32, h: u32) {
        assert!(crop.x + crop.width <= w, "{crop:?} exceeds width {w}");
        assert!(crop.y + crop.height <= h, "{crop:?} exceeds height {h}");
        assert!(crop.width > 0 && crop.height > 0);
    }

    #[test]
    fn face_in_middle_of_large_image() {
        // pad_x=45, pad_top=50, pad_bottom=65
        // padded box: x 355..545 (190), y 250..465 (215) → side 215
        // center (450, 357) → x 343..558, y 250..465
        let crop = face_crop(&face(400, 300, 100, 100), 1000, 1000);
        assert_eq!(
            crop,
            CropRegion {
                x: 343,
                y: 250,
                width: 215,
                height: 215,
            }
        );
    }

    #[test]
    fn face_near_top_left_is_reanchored() {
        // padded box: x 0..155, y 0..185 → side 185
        // center (77, 92) → x1 = max(0, -15) = 0, y1 = 0
        let crop = face_crop(&face(10, 20, 100, 100), 800, 600);
        assert_eq!(
            crop,
            CropRegion {
                x: 0,
                y: 0,
                width: 185,
                height: 185,
            }
        );
    }

    #[test]
    fn face_near_bottom_right_is_pushed_back_inside() {
        // padded box: x 855..1000 (145), y 650..800 (150) → side 150
        // center (927, 725) → x 852..1000 (148 < 150) → x1 = 850
        let crop = face_crop(&face(900, 700, 100, 100), 1000, 800);
        assert_eq!(
            crop,
            CropRegion {
                x: 850,
                y: 650,
                width: 150,
                height: 150,
            }
        );
    }

    #[test]
    fn square_shrinks_only_when_image_is_too_small() {
        // Face fills a short, wide image; the side exceeds the image height
        let crop = face_crop(&face(100, 10, 180, 180), 600, 200);
        assert_inside(&crop, 600, 200);
        assert_eq!(crop.height, 200);
        assert!(crop.width >= crop.height);
    }

    #[test]
    fn padded_face_fits_inside_crop_when_unclamped() {
        let f = face(300, 300, 120, 140);
        let crop = face_crop(&f, 2000, 2000);
        let padded_w = f.width + 2 * (f64::from(f.width) * PAD_X) as u32;
        let padded_h = f.height
            + (f64::from(f.height) * PAD_TOP) as u32
            + (f64::from(f.height) * PAD_BOTTOM) as u32;
        assert_eq!(crop.width, crop.height);
        assert!(crop.width >= padded_w.max(padded_h));
        assert!(f64::from(crop.width) >= f64::from(f.height) * 1.15);
        assert_inside(&crop, 2000, 2000);
    }

    #[test]
    fn crop_always_inside_image() {
        let sizes: [(u32, u32); 5] = [(100, 100), (640, 480), (480, 640), (1000, 300), (51, 2000)];
        for (w, h) in sizes {
            for fx in (0..w.saturating_sub(50)).step_by(37) {
                for fy in (0..h.saturating_sub(50)).step_by(41) {
                    let fw = 50.max((w - fx).min(120));
                    let fh = 50.max((h - fy).min(150));
                    if fx + fw > w || fy + fh > h {
                        continue;
                    }
                    let crop = face_crop(&face(fx, fy, fw, fh), w, h);
                    assert_inside(&crop, w, h);
                }
            }
        }
    }

    #[test]
    fn center_crop_landscape() {
        assert_eq!(
            center_crop(800, 600),
            CropRegion {
                x: 100,
                y: 0,
                width: 600,
                height: 600,
            }
        );
    }

    #[test]
    fn center_crop_portrait_rounds_down() {
        assert_eq!(
            center_crop(300, 451),
            CropRegion {
                x: 0,
                y: 75,
                width: 300,
                height: 300,
            }
        );
    }

    #[test]
    fn center_crop_square_is_identity() {
        assert_eq!(
            center_crop(512, 512),
            CropRegion {
                x: 0,
                y: 0,
                width: 512,
                height: 512,
            }
        );
    }
}
