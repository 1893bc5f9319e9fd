use std::time::Duration;

/// Side length of every written avatar, in pixels
pub(crate) const TARGET_SIZE: u32 = 512;

/// Client header sent with every request to Wikipedia and its image hosts
pub(crate) const USER_AGENT: &str = "DebaterBot/1.0";

pub(crate) const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

pub(crate) const DEFAULT_THUMB_WIDTH: u32 = 1000;

pub(crate) const LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);
pub(crate) const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on a downloaded image body
pub(crate) const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

/// Pause after each successful entry
pub(crate) const DEFAULT_DELAY_MS: u64 = 500;

/// Prefix marking moderator personas, both for records and avatars
pub(crate) const MOD_PREFIX: &str = "mod-";

/// Public path under which the frontend serves avatars
pub(crate) const AVATAR_URL_BASE: &str = "/avatars";

pub(crate) const FACE_MODEL_FILE: &str = "seeta_fd_frontal_v1.0.bin";
pub(crate) const SEGMENTATION_MODEL_FILE: &str = "u2net.onnx";
