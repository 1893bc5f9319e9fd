//! Persona record updates
//!
//! Points a persona's JSON record at its freshly written avatar.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::consts::{AVATAR_URL_BASE, MOD_PREFIX};
use crate::error::RecordError;

const AVATAR_URL_KEY: &str = "avatarUrl";
const IDENTITY_KEY: &str = "identity";

/// What happened to the persona record after an avatar was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordStatus {
    Updated { path: PathBuf, avatar_url: String },
    Missing,
    Failed(String),
}

/// `<dir>/<token>.json` if present, else `<dir>/mod-<token>.json`.
///
/// The flag is true when the moderator record matched.
pub(crate) fn find_record(personas_dir: &Path, token: &str) -> Option<(PathBuf, bool)> {
    let plain = personas_dir.join(format!("{token}.json"));
    if plain.exists() {
        return Some((plain, false));
    }
    let moderator = moderator_record_path(personas_dir, token);
    moderator.exists().then_some((moderator, true))
}

pub(crate) fn moderator_record_path(personas_dir: &Path, token: &str) -> PathBuf {
    personas_dir.join(format!("{MOD_PREFIX}{token}.json"))
}

/// Public path the frontend loads the avatar from
pub(crate) fn avatar_url(token: &str, moderator: bool) -> String {
    let prefix = if moderator { MOD_PREFIX } else { "" };
    format!("{AVATAR_URL_BASE}/{prefix}{token}.png")
}

/// Set `avatarUrl` on the record, under `identity` when that key exists.
fn set_avatar_url(record: &mut Value, url: &str, path: &Path) -> Result<(), RecordError> {
    let target = if record.get(IDENTITY_KEY).is_some() {
        &mut record[IDENTITY_KEY]
    } else {
        record
    };
    let object = target
        .as_object_mut()
        .ok_or_else(|| RecordError::IdentityNotObject {
            path: path.to_path_buf(),
        })?;
    object.insert(AVATAR_URL_KEY.to_string(), Value::String(url.to_string()));
    Ok(())
}

fn rewrite_record(path: &Path, url: &str) -> Result<(), RecordError> {
    let content = fs::read_to_string(path).map_err(|source| RecordError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut record: Value = serde_json::from_str(&content).map_err(|source| RecordError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    set_avatar_url(&mut record, url, path)?;

    let mut output = serde_json::to_string_pretty(&record).map_err(|e| RecordError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    output.push('\n');
    fs::write(path, output).map_err(|source| RecordError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Update the persona record for `token`, if there is one.
///
/// Failures are logged and reported, never raised.
pub(crate) fn update_persona_avatar(personas_dir: &Path, name: &str, token: &str) -> RecordStatus {
    let Some((path, moderator)) = find_record(personas_dir, token) else {
        debug!("No persona record for {name}");
        return RecordStatus::Missing;
    };

    let url = avatar_url(token, moderator);
    match rewrite_record(&path, &url) {
        Ok(()) => {
            debug!("Set {AVATAR_URL_KEY} = {url} in {}", path.display());
            RecordStatus::Updated {
                path,
                avatar_url: url,
            }
        }
        Err(e) => {
            warn!("Failed to update persona JSON: {e}");
            RecordStatus::Failed(e.to_string())
        }
    }
}
