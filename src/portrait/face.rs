/// Bounding box of a detected face, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FaceBounds {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl FaceBounds {
    pub(crate) fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Pluggable face detection backend.
pub(crate) trait FaceDetector {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    ///
    /// Boxes are clipped to the image. Faces under `MIN_FACE_SIZE` per side,
    /// measured before clipping, are not reported.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds>;
}

/// Smallest face the detectors report, per side
#[cfg_attr(not(feature = "rustface"), allow(dead_code))]
pub(crate) const MIN_FACE_SIZE: u32 = 50;

/// Pick the face with the largest area; the earliest one wins a tie.
pub(crate) fn largest_face(faces: &[FaceBounds]) -> Option<FaceBounds> {
    let mut best: Option<FaceBounds> = None;
    for face in faces {
        if best.is_none_or(|b| face.area() > b.area()) {
            best = Some(*face);
        }
    }
    best
}
