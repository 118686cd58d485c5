use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

pub const DEFAULT_TOP: usize = 10;
pub const DEFAULT_SAMPLES: usize = 3;

/// What videos are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every hashtag in the caption
    Hashtag,
    /// The audio track id
    Sound,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Hashtag => f.write_str("hashtag"),
            Mode::Sound => f.write_str("sound"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Plain text banners
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: Mode,
    pub top: usize,
    pub samples: usize,
    pub format: ReportFormat,
    pub parallel: bool,
}

impl Settings {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, mode: Mode) -> Self {
        Settings {
            input: input.into(),
            output: output.into(),
            mode,
            top: DEFAULT_TOP,
            samples: DEFAULT_SAMPLES,
            format: ReportFormat::default(),
            parallel: false,
        }
    }
}
