use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::error::{StepshowError, StepshowResult};

/// Number of steps per complete theme.
pub const STEP_COUNT: u8 = 10;

/// Distance between consecutive actual step numbers embedded in filenames.
pub const STEP_STRIDE: u32 = 10;

const STEP_SEPARATOR: &str = "_step_";

/// Map a step index (1..=10) to the actual step number in the filename.
pub fn actual_step(step: u8) -> u32 {
    u32::from(step) * STEP_STRIDE
}

/// Expected filename of one frame: `<theme>_step_<step*10>.png`.
pub fn frame_file_name(theme: &str, step: u8) -> String {
    format!("{theme}{STEP_SEPARATOR}{}.png", actual_step(step))
}

/// Split `<theme>_step_<n>.png` into the theme prefix and actual step number.
///
/// The split happens on the last `_step_` occurrence, so a theme name that
/// itself contains the separator yields a truncated prefix. This matches the
/// naming contract, which assumes the separator never appears in a theme.
/// Filenames not matching the convention return `None`.
fn parse_frame_name(file_name: &str) -> Option<(&str, u32)> {
    let stem = file_name.strip_suffix(".png")?;
    let at = stem.rfind(STEP_SEPARATOR)?;
    let theme = &stem[..at];
    let number = stem[at + STEP_SEPARATOR.len()..].parse::<u32>().ok()?;
    if theme.is_empty() || number == 0 {
        return None;
    }
    Some((theme, number))
}

/// Indexed view of an image directory: theme -> (actual step number -> path).
///
/// Built in one directory pass so that completeness can be checked upfront
/// instead of surfacing as a missing file in the middle of a sequence build.
/// The scan itself never fails on incomplete themes; it records whatever
/// frames exist at call time.
#[derive(Clone, Debug, Default)]
pub struct ThemeCatalog {
    image_dir: PathBuf,
    themes: BTreeMap<String, BTreeMap<u32, PathBuf>>,
}

impl ThemeCatalog {
    #[tracing::instrument]
    pub fn scan(image_dir: &Path) -> StepshowResult<Self> {
        let entries = std::fs::read_dir(image_dir)
            .with_context(|| format!("read image directory '{}'", image_dir.display()))?;

        let mut themes: BTreeMap<String, BTreeMap<u32, PathBuf>> = BTreeMap::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("read directory entry in '{}'", image_dir.display()))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some((theme, number)) = parse_frame_name(name) {
                themes
                    .entry(theme.to_string())
                    .or_default()
                    .insert(number, entry.path());
            }
        }

        Ok(Self {
            image_dir: image_dir.to_path_buf(),
            themes,
        })
    }

    /// Distinct theme prefixes in sorted order.
    pub fn themes(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }

    pub fn contains_theme(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }

    /// Path of the frame for a step index, if the file was present at scan time.
    pub fn frame_path(&self, theme: &str, step: u8) -> Option<&Path> {
        self.themes
            .get(theme)?
            .get(&actual_step(step))
            .map(PathBuf::as_path)
    }

    /// Check that all `STEP_COUNT` frames of a theme were present at scan
    /// time, reporting the first gap as `MissingFrame`.
    pub fn validate_complete(&self, theme: &str) -> StepshowResult<()> {
        for step in 1..=STEP_COUNT {
            if self.frame_path(theme, step).is_none() {
                return Err(StepshowError::missing_frame(
                    theme,
                    step,
                    self.image_dir.join(frame_file_name(theme, step)),
                ));
            }
        }
        Ok(())
    }
}

/// Sorted distinct theme prefixes found in a directory. Pure function of the
/// directory contents at call time.
pub fn list_themes(image_dir: &Path) -> StepshowResult<Vec<String>> {
    Ok(ThemeCatalog::scan(image_dir)?.themes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_frame_name_accepts_convention() {
        assert_eq!(
            parse_frame_name("a_blue_car_step_10.png"),
            Some(("a_blue_car", 10))
        );
        assert_eq!(parse_frame_name("x_step_100.png"), Some(("x", 100)));
    }

    #[test]
    fn parse_frame_name_rejects_non_frames() {
        assert_eq!(parse_frame_name("readme.txt"), None);
        assert_eq!(parse_frame_name("no_separator.png"), None);
        assert_eq!(parse_frame_name("x_step_abc.png"), None);
        assert_eq!(parse_frame_name("x_step_10.jpg"), None);
        assert_eq!(parse_frame_name("_step_10.png"), None);
        assert_eq!(parse_frame_name("x_step_0.png"), None);
    }

    #[test]
    fn parse_frame_name_splits_on_last_separator() {
        // A theme containing `_step_` is outside the naming contract; the
        // last occurrence wins, truncating the derived prefix.
        assert_eq!(
            parse_frame_name("a_step_b_step_10.png"),
            Some(("a_step_b", 10))
        );
    }

    #[test]
    fn frame_file_name_uses_actual_step_numbers() {
        assert_eq!(frame_file_name("x", 1), "x_step_10.png");
        assert_eq!(frame_file_name("x", 10), "x_step_100.png");
        assert_eq!(frame_file_name("a_blue_car", 5), "a_blue_car_step_50.png");
    }

    #[test]
    fn actual_step_stride() {
        assert_eq!(actual_step(1), 10);
        assert_eq!(actual_step(10), 100);
    }
}
