use serde_json::{Value, json};

use crate::app::{Outcome, PlannedEntry, RunSummary};
use crate::record::RecordStatus;

fn outcome_json(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Processed { record } => {
            let record = match record {
                RecordStatus::Updated { path, avatar_url } => json!({
                    "status": "updated",
                    "path": path.display().to_string(),
                    "avatar_url": avatar_url,
                }),
                RecordStatus::Missing => json!({ "status": "missing" }),
                RecordStatus::Failed(message) => json!({
                    "status": "error",
                    "error": message,
                }),
            };
            json!({ "status": "processed", "record": record })
        }
        Outcome::Skipped => json!({ "status": "skipped" }),
        Outcome::Failed(reason) => json!({
            "status": "failed",
            "error": reason.to_string(),
        }),
    }
}

pub(crate) fn output_summary_json(summary: &RunSummary) -> String {
    let entries: Vec<Value> = summary
        .entries
        .iter()
        .map(|entry| {
            let mut value = json!({
                "name": entry.name,
                "file": entry.file,
            });
            if let (Value::Object(map), Value::Object(outcome)) =
                (&mut value, outcome_json(&entry.outcome))
            {
                map.extend(outcome);
            }
            value
        })
        .collect();

    let output = json!({
        "total": summary.total,
        "processed": summary.processed,
        "skipped": summary.skipped,
        "failed": summary.failed,
        "record_errors": summary.record_errors,
        "entries": entries,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

pub(crate) fn output_roster_json(plan: &[PlannedEntry]) -> String {
    let output: Vec<Value> = plan
        .iter()
        .map(|planned| {
            json!({
                "name": planned.entry.name,
                "title": planned.entry.title,
                "token": planned.token,
                "file": planned.file_name(),
                "exists": planned.exists,
            })
        })
        .collect();
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{EntryReport, FailureReason};
    use std::path::PathBuf;

    fn summary() -> RunSummary {
        RunSummary {
            total: 3,
            processed: 1,
            skipped: 1,
            failed: 1,
            record_errors: 0,
            entries: vec![
                EntryReport {
                    name: "Lex Fridman",
                    file: "mod-lex-fridman.png".to_string(),
                    outcome: Outcome::Processed {
                        record: RecordStatus::Updated {
                            path: PathBuf::from("personas/mod-lex-fridman.json"),
                            avatar_url: "/avatars/mod-lex-fridman.png".to_string(),
                        },
                    },
                },
                EntryReport {
                    name: "Jack Ma",
                    file: "jack-ma.png".to_string(),
                    outcome: Outcome::Skipped,
                },
                EntryReport {
                    name: "Ray Dalio",
                    file: "ray-dalio.png".to_string(),
                    outcome: Outcome::Failed(FailureReason::NoImage),
                },
            ],
        }
    }

    #[test]
    fn summary_json_has_tallies_and_entries() {
        let parsed: Value = serde_json::from_str(&output_summary_json(&summary())).unwrap();
        assert_eq!(parsed["total"], 3);
        assert_eq!(parsed["processed"], 1);
        assert_eq!(parsed["skipped"], 1);
        assert_eq!(parsed["failed"], 1);

        let entries = parsed["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["name"], "Lex Fridman");
        assert_eq!(entries[0]["status"], "processed");
        assert_eq!(entries[0]["record"]["avatar_url"], "/avatars/mod-lex-fridman.png");
        assert_eq!(entries[1]["status"], "skipped");
        assert_eq!(entries[2]["error"], "No image found on Wikipedia");
    }

    #[test]
    fn empty_summary_is_valid_json() {
        let parsed: Value =
            serde_json::from_str(&output_summary_json(&RunSummary::default())).unwrap();
        assert_eq!(parsed["entries"].as_array().unwrap().len(), 0);
    }
}
