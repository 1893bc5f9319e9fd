//! Resolved run settings
//!
//! Turns the merged CLI/config values into concrete paths and limits.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::consts::{
    DEFAULT_DELAY_MS, DEFAULT_THUMB_WIDTH, FACE_MODEL_FILE, SEGMENTATION_MODEL_FILE,
};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) avatars_dir: PathBuf,
    pub(crate) personas_dir: PathBuf,
    pub(crate) face_model: PathBuf,
    pub(crate) segmentation_model: PathBuf,
    pub(crate) thumb_width: u32,
    pub(crate) delay: Duration,
    pub(crate) skip_existing: bool,
}

impl Settings {
    pub(crate) fn resolve(cli: &Cli) -> Self {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
        Self::from_root(&root, cli)
    }

    fn from_root(root: &Path, cli: &Cli) -> Self {
        Settings {
            avatars_dir: cli
                .avatars_dir
                .clone()
                .unwrap_or_else(|| root.join("frontend").join("public").join("avatars")),
            personas_dir: cli
                .personas_dir
                .clone()
                .unwrap_or_else(|| root.join("backend").join("prisma").join("personas")),
            face_model: cli.face_model.clone().unwrap_or_else(default_face_model),
            segmentation_model: cli
                .segmentation_model
                .clone()
                .unwrap_or_else(default_segmentation_model),
            thumb_width: cli.thumb_width.unwrap_or(DEFAULT_THUMB_WIDTH),
            delay: Duration::from_millis(cli.delay_ms.unwrap_or(DEFAULT_DELAY_MS)),
            skip_existing: cli.skip_mode(),
        }
    }
}

/// `<data_dir>/avatar-fetch/seeta_fd_frontal_v1.0.bin`
fn default_face_model() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("avatar-fetch"))
        .unwrap_or_else(|| PathBuf::from("models"))
        .join(FACE_MODEL_FILE)
}

/// `~/.u2net/u2net.onnx`, where rembg keeps its models
fn default_segmentation_model() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".u2net"))
        .unwrap_or_else(|| PathBuf::from("models"))
        .join(SEGMENTATION_MODEL_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn directories_default_under_root() {
        let cli = Cli::parse_from(["avatar-fetch", "--root", "/srv/debate"]);
        let settings = Settings::resolve(&cli);
        assert_eq!(
            settings.avatars_dir,
            Path::new("/srv/debate/frontend/public/avatars")
        );
        assert_eq!(
            settings.personas_dir,
            Path::new("/srv/debate/backend/prisma/personas")
        );
        assert_eq!(settings.thumb_width, 1000);
        assert_eq!(settings.delay, Duration::from_millis(500));
        assert!(!settings.skip_existing);
    }

    #[test]
    fn explicit_directories_override_root() {
        let cli = Cli::parse_from([
            "avatar-fetch",
            "--root",
            "/srv/debate",
            "--avatars-dir",
            "/tmp/out",
            "--only-missing",
            "--delay-ms",
            "0",
        ]);
        let settings = Settings::resolve(&cli);
        assert_eq!(settings.avatars_dir, Path::new("/tmp/out"));
        assert_eq!(
            settings.personas_dir,
            Path::new("/srv/debate/backend/prisma/personas")
        );
        assert!(settings.skip_existing);
        assert_eq!(settings.delay, Duration::ZERO);
    }

    #[test]
    fn model_defaults_use_known_file_names() {
        let settings = Settings::resolve(&Cli::parse_from(["avatar-fetch"]));
        assert!(settings.face_model.ends_with(FACE_MODEL_FILE));
        assert!(settings.segmentation_model.ends_with(SEGMENTATION_MODEL_FILE));
    }
}
