use std::path::Path;

use image::{DynamicImage, RgbImage, imageops::FilterType};

use crate::error::{StepshowError, StepshowResult};

/// Width of a normalized frame in pixels.
pub const FRAME_WIDTH: u32 = 512;

/// Height of a normalized frame in pixels.
pub const FRAME_HEIGHT: u32 = 512;

/// Normalize a decoded image to `FRAME_WIDTH`×`FRAME_HEIGHT` 3-channel RGB.
///
/// Alpha and any other extra channels are dropped, not composited.
pub fn normalize(img: DynamicImage) -> RgbImage {
    let rgb = img.to_rgb8();
    if rgb.dimensions() == (FRAME_WIDTH, FRAME_HEIGHT) {
        return rgb;
    }
    image::imageops::resize(&rgb, FRAME_WIDTH, FRAME_HEIGHT, FilterType::CatmullRom)
}

/// Decode raw file bytes and normalize them, reporting decode failures as
/// `UnreadableImage` for the given path.
pub fn decode_normalized(path: &Path, bytes: &[u8]) -> StepshowResult<RgbImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| StepshowError::unreadable_image(path, e.to_string()))?;
    Ok(normalize(img))
}
