#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod frame;
pub mod sequence;

pub use catalog::{STEP_COUNT, STEP_STRIDE, ThemeCatalog, actual_step, frame_file_name, list_themes};
pub use error::{StepshowError, StepshowResult};
pub use frame::{FRAME_HEIGHT, FRAME_WIDTH};
pub use sequence::{FRAME_DELAY_MS, FrameListing, FrameSlot, SequenceAssembler, encode_gif};
