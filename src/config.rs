use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) skip_existing: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) root: Option<PathBuf>,
    #[serde(default)]
    pub(crate) avatars_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) personas_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) face_model: Option<PathBuf>,
    #[serde(default)]
    pub(crate) segmentation_model: Option<PathBuf>,
    #[serde(default)]
    pub(crate) thumb_width: Option<u32>,
    #[serde(default)]
    pub(crate) delay_ms: Option<u64>,
}

impl Config {
    /// Load the first config file that parses, or defaults if none does.
    ///
    /// Runs before logging is set up, so diagnostics go straight to stderr.
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        eprintln!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/avatar-fetch/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("avatar-fetch").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("avatar-fetch").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.avatar-fetch.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".avatar-fetch.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("avatar-fetch")));
    }

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
skip_existing = true
root = "/srv/debate"
segmentation_model = "/models/u2netp.onnx"
thumb_width = 800
delay_ms = 0
"#,
        )
        .unwrap();
        assert!(config.skip_existing);
        assert!(!config.debug);
        assert_eq!(config.root, Some(PathBuf::from("/srv/debate")));
        assert_eq!(
            config.segmentation_model,
            Some(PathBuf::from("/models/u2netp.onnx"))
        );
        assert_eq!(config.thumb_width, Some(800));
        assert_eq!(config.delay_ms, Some(0));
        assert!(config.avatars_dir.is_none());
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.skip_existing);
        assert!(config.root.is_none());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(toml::from_str::<Config>("thumb_width = \"wide\"").is_err());
    }
}
