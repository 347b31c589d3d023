use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{
    Delay, DynamicImage, Frame, RgbImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    catalog::{self, STEP_COUNT},
    error::{StepshowError, StepshowResult},
    frame,
};

/// Display duration of each frame in the assembled GIF.
pub const FRAME_DELAY_MS: u32 = 500;

/// Load status of one frame in a full-theme listing.
#[derive(Clone, Debug)]
pub enum FrameSlot {
    Loaded(RgbImage),
    Missing,
    Unreadable(String),
}

/// One entry of `SequenceAssembler::list_frames`: the step index, the
/// expected filename, and whatever loading produced.
#[derive(Clone, Debug)]
pub struct FrameListing {
    pub step: u8,
    pub file_name: String,
    pub slot: FrameSlot,
}

/// Builds animated sequences from a directory of per-step still images.
///
/// The image directory is explicit configuration; the assembler holds no
/// other state and performs no mutation, so concurrent use for any mix of
/// themes is safe. Every call re-reads the backing files.
#[derive(Clone, Debug)]
pub struct SequenceAssembler {
    image_dir: PathBuf,
}

impl SequenceAssembler {
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Assemble the full animated GIF for one theme.
    ///
    /// Frames are loaded in ascending step order and encoded with a fixed
    /// per-frame delay and infinite repeat. All-or-nothing: the first missing
    /// or undecodable frame aborts the build. Output is deterministic for
    /// unchanged backing files.
    #[tracing::instrument(skip(self), fields(dir = %self.image_dir.display()))]
    pub fn build_sequence(&self, theme: &str) -> StepshowResult<Vec<u8>> {
        let mut frames = Vec::with_capacity(STEP_COUNT as usize);
        for step in 1..=STEP_COUNT {
            frames.push(self.load_step(theme, step)?);
        }
        encode_gif(&frames)
    }

    /// Load one normalized frame by step index (1..=10).
    ///
    /// A missing file is reported as `MissingFrame`; unlike the sequence
    /// build, the caller is free to treat that as a per-frame notice and
    /// keep fetching other steps.
    pub fn fetch_frame(&self, theme: &str, step: u8) -> StepshowResult<RgbImage> {
        validate_step(step)?;
        self.load_step(theme, step)
    }

    /// Ordered listing of all frames of a theme for display-only consumption.
    ///
    /// Missing or unreadable frames are reported per entry instead of
    /// aborting the rest of the listing.
    pub fn list_frames(&self, theme: &str) -> Vec<FrameListing> {
        (1..=STEP_COUNT)
            .map(|step| {
                let slot = match self.load_step(theme, step) {
                    Ok(img) => FrameSlot::Loaded(img),
                    Err(StepshowError::MissingFrame { .. }) => FrameSlot::Missing,
                    Err(e) => FrameSlot::Unreadable(e.to_string()),
                };
                FrameListing {
                    step,
                    file_name: catalog::frame_file_name(theme, step),
                    slot,
                }
            })
            .collect()
    }

    fn frame_path(&self, theme: &str, step: u8) -> PathBuf {
        self.image_dir.join(catalog::frame_file_name(theme, step))
    }

    fn load_step(&self, theme: &str, step: u8) -> StepshowResult<RgbImage> {
        let path = self.frame_path(theme, step);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StepshowError::missing_frame(theme, step, path));
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read frame '{}'", path.display()))
                    .into());
            }
        };
        frame::decode_normalized(&path, &bytes)
    }
}

fn validate_step(step: u8) -> StepshowResult<()> {
    if step == 0 || step > STEP_COUNT {
        return Err(StepshowError::validation(format!(
            "step must be in 1..={STEP_COUNT}, got {step}"
        )));
    }
    Ok(())
}

/// Encode normalized frames, in order, into a single in-memory GIF with
/// `FRAME_DELAY_MS` per frame and infinite loop.
pub fn encode_gif(frames: &[RgbImage]) -> StepshowResult<Vec<u8>> {
    if frames.is_empty() {
        return Err(StepshowError::validation(
            "cannot encode a sequence with zero frames",
        ));
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .set_repeat(Repeat::Infinite)
            .context("set gif repeat")?;
        for rgb in frames {
            let rgba = DynamicImage::ImageRgb8(rgb.clone()).to_rgba8();
            let frame = Frame::from_parts(rgba, 0, 0, Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1));
            encoder.encode_frame(frame).context("encode gif frame")?;
        }
    }
    Ok(bytes)
}
