//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug, Default)]
#[command(name = "avatar-fetch")]
#[command(
    about = "Download persona portraits from Wikipedia, crop to the face, and remove the background",
    version
)]
pub(crate) struct Cli {
    /// Skip personas whose avatar file already exists
    #[arg(long)]
    pub(crate) skip_existing: bool,

    /// Same as --skip-existing
    #[arg(long)]
    pub(crate) only_missing: bool,

    /// Only process these personas (display name or token, repeatable)
    #[arg(long, value_name = "NAME")]
    pub(crate) only: Vec<String>,

    /// Print the roster with target files and exit
    #[arg(long)]
    pub(crate) list: bool,

    /// Project root holding frontend/ and backend/ (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub(crate) root: Option<PathBuf>,

    /// Directory avatars are written to
    #[arg(long, value_name = "DIR")]
    pub(crate) avatars_dir: Option<PathBuf>,

    /// Directory holding persona JSON records
    #[arg(long, value_name = "DIR")]
    pub(crate) personas_dir: Option<PathBuf>,

    /// SeetaFace frontal face model
    #[arg(long, value_name = "FILE")]
    pub(crate) face_model: Option<PathBuf>,

    /// ONNX salient-object model used to remove the background
    #[arg(long, value_name = "FILE")]
    pub(crate) segmentation_model: Option<PathBuf>,

    /// Thumbnail width requested from Wikipedia
    #[arg(long, value_name = "PX")]
    pub(crate) thumb_width: Option<u32>,

    /// Pause after each downloaded persona, in milliseconds
    #[arg(long, value_name = "MS")]
    pub(crate) delay_ms: Option<u64>,

    /// Print the run summary as JSON
    #[arg(short, long)]
    pub(crate) json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub(crate) debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub(crate) no_color: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.skip_existing && config.skip_existing {
            self.skip_existing = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if self.root.is_none() {
            self.root = config.root.clone();
        }
        if self.avatars_dir.is_none() {
            self.avatars_dir = config.avatars_dir.clone();
        }
        if self.personas_dir.is_none() {
            self.personas_dir = config.personas_dir.clone();
        }
        if self.face_model.is_none() {
            self.face_model = config.face_model.clone();
        }
        if self.segmentation_model.is_none() {
            self.segmentation_model = config.segmentation_model.clone();
        }
        if self.thumb_width.is_none() {
            self.thumb_width = config.thumb_width;
        }
        if self.delay_ms.is_none() {
            self.delay_ms = config.delay_ms;
        }

        self
    }

    /// Both skip flags mean the same thing
    pub(crate) fn skip_mode(&self) -> bool {
        self.skip_existing || self.only_missing
    }

    pub(crate) fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
