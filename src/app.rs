use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{error, info, warn};
use thiserror::Error;

use crate::consts::MOD_PREFIX;
use crate::error::ProcessError;
use crate::portrait::PortraitNormalizer;
use crate::record::{RecordStatus, moderator_record_path, update_persona_avatar};
use crate::roster::RosterEntry;
use crate::settings::Settings;
use crate::source::ImageSource;

/// A roster entry with its output file resolved
#[derive(Debug, Clone)]
pub(crate) struct PlannedEntry {
    pub(crate) entry: RosterEntry,
    pub(crate) token: String,
    pub(crate) output: PathBuf,
    pub(crate) exists: bool,
}

impl PlannedEntry {
    pub(crate) fn skipped(&self, skip_existing: bool) -> bool {
        skip_existing && self.exists
    }

    pub(crate) fn file_name(&self) -> String {
        self.output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum FailureReason {
    /// The API reported no image for the article
    #[error("No image found on Wikipedia")]
    NoImage,
    /// Download or decode failed
    #[error("Could not download image")]
    Download,
    /// The face or segmentation model failed to load at startup
    #[error("Portrait models are not loaded")]
    ModelsUnavailable,
    /// Crop, resize, background removal, or write failed
    #[error("{0}")]
    Processing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Processed { record: RecordStatus },
    Skipped,
    Failed(FailureReason),
}

#[derive(Debug, Clone)]
pub(crate) struct EntryReport {
    pub(crate) name: &'static str,
    pub(crate) file: String,
    pub(crate) outcome: Outcome,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RunSummary {
    pub(crate) total: usize,
    pub(crate) processed: usize,
    pub(crate) skipped: usize,
    pub(crate) failed: usize,
    /// Processed entries whose persona record could not be rewritten
    pub(crate) record_errors: usize,
    pub(crate) entries: Vec<EntryReport>,
}

impl RunSummary {
    fn record(&mut self, planned: &PlannedEntry, outcome: Outcome) {
        match &outcome {
            Outcome::Processed { record } => {
                self.processed += 1;
                if matches!(record, RecordStatus::Failed(_)) {
                    self.record_errors += 1;
                }
            }
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
        self.entries.push(EntryReport {
            name: planned.entry.name,
            file: planned.file_name(),
            outcome,
        });
    }
}

/// `mod-<token>.png` when a moderator record exists, else `<token>.png`
pub(crate) fn output_path(avatars_dir: &Path, personas_dir: &Path, token: &str) -> PathBuf {
    let file_name = if moderator_record_path(personas_dir, token).exists() {
        format!("{MOD_PREFIX}{token}.png")
    } else {
        format!("{token}.png")
    };
    avatars_dir.join(file_name)
}

/// Resolve output files for the selected entries, in roster order.
pub(crate) fn plan(entries: &[RosterEntry], settings: &Settings) -> Vec<PlannedEntry> {
    entries
        .iter()
        .map(|entry| {
            let token = entry.token();
            let output = output_path(&settings.avatars_dir, &settings.personas_dir, &token);
            let exists = output.exists();
            PlannedEntry {
                entry: *entry,
                token,
                output,
                exists,
            }
        })
        .collect()
}

/// Whether any entry will need the face and segmentation models
pub(crate) fn needs_processing(plan: &[PlannedEntry], skip_existing: bool) -> bool {
    plan.iter().any(|p| !p.skipped(skip_existing))
}

fn write_avatar(
    normalizer: &mut PortraitNormalizer,
    image: &image::DynamicImage,
    output: &Path,
) -> Result<(), ProcessError> {
    let avatar = normalizer.normalize(image)?;
    avatar.save_with_format(output, ImageFormat::Png)?;
    Ok(())
}

fn process_entry(
    planned: &PlannedEntry,
    settings: &Settings,
    source: &dyn ImageSource,
    normalizer: Option<&mut PortraitNormalizer>,
) -> Outcome {
    let RosterEntry { name, title } = planned.entry;

    // Without models nothing can be written
    let Some(normalizer) = normalizer else {
        return Outcome::Failed(FailureReason::ModelsUnavailable);
    };

    info!("Fetching Wikipedia image for '{title}'...");
    let Some(url) = source.locate(title) else {
        return Outcome::Failed(FailureReason::NoImage);
    };

    info!("Downloading...");
    let Some(image) = source.fetch(&url) else {
        return Outcome::Failed(FailureReason::Download);
    };

    info!("Processing (face detect + crop + background removal)...");
    if let Err(e) = write_avatar(normalizer, &image, &planned.output) {
        return Outcome::Failed(FailureReason::Processing(e.to_string()));
    }
    info!("Saved: {}", planned.file_name());

    let record = update_persona_avatar(&settings.personas_dir, name, &planned.token);
    Outcome::Processed { record }
}

/// Walk the plan in order, one entry at a time.
///
/// Per-entry failures are logged and counted; the walk always finishes.
pub(crate) fn run(
    plan: &[PlannedEntry],
    settings: &Settings,
    source: &dyn ImageSource,
    mut normalizer: Option<&mut PortraitNormalizer>,
) -> RunSummary {
    let total = plan.len();
    let mut summary = RunSummary {
        total,
        ..RunSummary::default()
    };

    for (i, planned) in plan.iter().enumerate() {
        let position = i + 1;
        let name = planned.entry.name;

        if planned.skipped(settings.skip_existing) {
            info!("[{position}/{total}] {name} — already exists, skipping");
            summary.record(planned, Outcome::Skipped);
            continue;
        }

        info!("[{position}/{total}] {name}");
        let outcome = process_entry(planned, settings, source, normalizer.as_deref_mut());

        match &outcome {
            Outcome::Failed(reason) => error!("FAILED: {reason}"),
            Outcome::Processed {
                record: RecordStatus::Failed(message),
            } => warn!("{name}: avatar saved but record not updated: {message}"),
            _ => {}
        }

        let succeeded = matches!(outcome, Outcome::Processed { .. });
        summary.record(planned, outcome);

        if succeeded && !settings.delay.is_zero() {
            std::thread::sleep(settings.delay);
        }
    }

    summary
}
