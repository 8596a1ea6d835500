use crate::batch::models::{ArtifactKind, BatchReport};
use crate::batch::state::BatchState;
use uuid::Uuid;

/// Something the user should see while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Started {
        total_rows: usize,
    },
    RowUploaded {
        row: usize,
        object_name: String,
    },
    /// `skipped` marks rows rejected before any transfer was attempted.
    RowFailed {
        row: usize,
        reason: String,
        skipped: bool,
    },
    Progress(BatchState),
    ArtifactUploaded {
        kind: ArtifactKind,
        object_name: String,
    },
    ArtifactFailed {
        kind: ArtifactKind,
        object_name: String,
        reason: String,
    },
    Finished(BatchReport),
}

pub trait Reporter {
    fn notify(&mut self, notification: Notification);
}

/// Writes every notification to the log, tagged with a per-batch id.
pub struct LogReporter {
    batch_id: Uuid,
}

impl LogReporter {
    pub fn new() -> Self {
        LogReporter {
            batch_id: Uuid::new_v4(),
        }
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for LogReporter {
    fn notify(&mut self, notification: Notification) {
        let id = self.batch_id;
        match notification {
            Notification::Started { total_rows } => {
                log::info!("[{id}] Upload in progress... {total_rows} rows")
            }
            Notification::RowUploaded { row, object_name } => {
                log::info!("[{id}] row {row}: Uploaded {object_name} successfully!")
            }
            Notification::RowFailed {
                row,
                reason,
                skipped: true,
            } => log::warn!("[{id}] row {row}: {reason}"),
            Notification::RowFailed { row, reason, .. } => {
                log::error!("[{id}] row {row}: Error processing row: {reason}")
            }
            Notification::Progress(state) => log::info!(
                "[{id}] {}% ({}/{} rows)",
                state.progress(),
                state.processed_rows,
                state.total_rows
            ),
            Notification::ArtifactUploaded { kind, object_name } => {
                log::info!("[{id}] Uploaded {kind} {object_name} successfully!")
            }
            Notification::ArtifactFailed {
                kind,
                object_name,
                reason,
            } => log::error!("[{id}] Error uploading {kind} {object_name}: {reason}"),
            Notification::Finished(report) => log::info!(
                "[{id}] Batch finished: {} uploaded, {} failed, {} of {} artifacts failed",
                report.state.success_count,
                report.state.error_count,
                report.failed_artifacts(),
                report.artifacts.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::models::ArtifactOutcome;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::{Mutex, Once};

    /// Keeps every record so tests can inspect what a reporter wrote.
    struct CaptureLogger {
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.lines
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        lines: Mutex::new(Vec::new()),
    };
    static INSTALL: Once = Once::new();

    /// Runs `notify` on a fresh reporter and returns the lines tagged with
    /// its batch id. Other tests log concurrently, hence the filter.
    fn rendered(notification: Notification) -> (Uuid, Vec<(Level, String)>) {
        INSTALL.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });

        let mut reporter = LogReporter::new();
        let id = reporter.batch_id;
        reporter.notify(notification);

        let tag = format!("[{id}] ");
        let lines = LOGGER
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, line)| line.starts_with(&tag))
            .map(|(level, line)| (*level, line[tag.len()..].to_string()))
            .collect();
        (id, lines)
    }

    #[test]
    fn skipped_row_is_a_warning() {
        let (_, lines) = rendered(Notification::RowFailed {
            row: 3,
            reason: "Missing required fields. Skipping.".to_string(),
            skipped: true,
        });

        assert_eq!(
            lines,
            vec![(Level::Warn, "row 3: Missing required fields. Skipping.".to_string())]
        );
    }

    #[test]
    fn failed_transfer_is_an_error() {
        let (_, lines) = rendered(Notification::RowFailed {
            row: 2,
            reason: "no such file".to_string(),
            skipped: false,
        });

        assert_eq!(
            lines,
            vec![(Level::Error, "row 2: Error processing row: no such file".to_string())]
        );
    }

    #[test]
    fn finish_line_counts_failed_artifacts() {
        let state = BatchState::new(3).record(true).record(false).record(true);
        let report = BatchReport {
            state,
            artifacts: vec![
                ArtifactOutcome {
                    kind: ArtifactKind::Archive,
                    object_name: "files.zip".to_string(),
                    error: Some("store unavailable".to_string()),
                },
                ArtifactOutcome {
                    kind: ArtifactKind::Spreadsheet,
                    object_name: "batch.xlsx".to_string(),
                    error: None,
                },
            ],
        };

        let (_, lines) = rendered(Notification::Finished(report));

        assert_eq!(
            lines,
            vec![(
                Level::Info,
                "Batch finished: 2 uploaded, 1 failed, 1 of 2 artifacts failed".to_string()
            )]
        );
    }

    #[test]
    fn each_reporter_tags_its_own_batch() {
        let (first, _) = rendered(Notification::Started { total_rows: 1 });
        let (second, lines) = rendered(Notification::Started { total_rows: 4 });

        assert_ne!(first, second);
        assert_eq!(lines, vec![(Level::Info, "Upload in progress... 4 rows".to_string())]);
    }
}
