use std::path::PathBuf;

pub type StepshowResult<T> = Result<T, StepshowError>;

#[derive(thiserror::Error, Debug)]
pub enum StepshowError {
    #[error("missing frame: step {step} of theme '{theme}' ('{}' not found)", path.display())]
    MissingFrame {
        theme: String,
        step: u8,
        path: PathBuf,
    },

    #[error("unreadable image '{}': {reason}", path.display())]
    UnreadableImage { path: PathBuf, reason: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StepshowError {
    pub fn missing_frame(theme: impl Into<String>, step: u8, path: impl Into<PathBuf>) -> Self {
        Self::MissingFrame {
            theme: theme.into(),
            step,
            path: path.into(),
        }
    }

    pub fn unreadable_image(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnreadableImage {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_missing_frame(&self) -> bool {
        matches!(self, Self::MissingFrame { .. })
    }
}
