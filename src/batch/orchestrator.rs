use crate::batch::models::{
    Artifact, ArtifactKind, ArtifactOutcome, BatchInput, BatchReport, UploadRequest,
};
use crate::batch::naming::{artifact_object_name, content_type_for, remote_object_name};
use crate::batch::reporter::{Notification, Reporter};
use crate::batch::state::BatchState;
use crate::error::AgentError;
use crate::local::resolver::{LocalFile, file_extension, strip_wrapping_quotes};
use crate::sheet::models::SheetRow;
use crate::sheet::reader::read_rows;

/// Where row files are read from.
pub trait FileSource {
    fn fetch(&self, path: &str) -> Result<LocalFile, AgentError>;
}

/// Where objects are written to. Writing an existing name replaces it.
pub trait ObjectSink {
    fn upload(&self, request: UploadRequest) -> Result<(), AgentError>;
}

/// Runs one batch: every spreadsheet row in order, then the archive (when
/// given) and the spreadsheet itself.
///
/// Only an unreadable spreadsheet fails the batch; row and artifact failures
/// are reported and counted.
pub fn run_batch<S, U, R>(
    input: BatchInput,
    source: &S,
    sink: &U,
    reporter: &mut R,
) -> Result<BatchReport, AgentError>
where
    S: FileSource + ?Sized,
    U: ObjectSink + ?Sized,
    R: Reporter + ?Sized,
{
    let rows = read_rows(&input.sheet.bytes)?;
    let state = process_rows(&rows, source, sink, reporter);

    let mut artifacts = Vec::with_capacity(2);
    if let Some(archive) = input.archive {
        artifacts.push(ship_artifact(ArtifactKind::Archive, archive, sink, reporter));
    }
    artifacts.push(ship_artifact(
        ArtifactKind::Spreadsheet,
        input.sheet,
        sink,
        reporter,
    ));

    let report = BatchReport { state, artifacts };
    reporter.notify(Notification::Finished(report.clone()));
    Ok(report)
}

pub fn process_rows<S, U, R>(rows: &[SheetRow], source: &S, sink: &U, reporter: &mut R) -> BatchState
where
    S: FileSource + ?Sized,
    U: ObjectSink + ?Sized,
    R: Reporter + ?Sized,
{
    let mut state = BatchState::new(rows.len());
    reporter.notify(Notification::Started {
        total_rows: state.total_rows,
    });

    for row in rows {
        let outcome = ship_row(row, source, sink);
        match &outcome {
            Ok(object_name) => reporter.notify(Notification::RowUploaded {
                row: row.index,
                object_name: object_name.clone(),
            }),
            Err(e) => reporter.notify(Notification::RowFailed {
                row: row.index,
                reason: e.to_string(),
                skipped: matches!(e, AgentError::Validation(_)),
            }),
        }

        state = state.record(outcome.is_ok());
        reporter.notify(Notification::Progress(state));
    }

    debug_assert!(state.is_complete());
    state
}

fn ship_row<S, U>(row: &SheetRow, source: &S, sink: &U) -> Result<String, AgentError>
where
    S: FileSource + ?Sized,
    U: ObjectSink + ?Sized,
{
    let missing = || AgentError::Validation("Missing required fields. Skipping.".to_string());

    let (Some(name), Some(link)) = (row.name(), row.file_link()) else {
        return Err(missing());
    };
    let link = strip_wrapping_quotes(link);
    if link.is_empty() {
        return Err(missing());
    }

    let file = source.fetch(link)?;
    let object_name = remote_object_name(name, &file.extension, row.index);
    let content_type = content_type_for(&file_extension(&object_name));

    sink.upload(UploadRequest {
        name: object_name.clone(),
        bytes: file.bytes,
        content_type: content_type.to_string(),
    })?;
    Ok(object_name)
}

fn ship_artifact<U, R>(
    kind: ArtifactKind,
    artifact: Artifact,
    sink: &U,
    reporter: &mut R,
) -> ArtifactOutcome
where
    U: ObjectSink + ?Sized,
    R: Reporter + ?Sized,
{
    let object_name = artifact_object_name(&artifact.file_name, kind.fallback_name());
    let content_type = content_type_for(&file_extension(&object_name));

    let result = sink.upload(UploadRequest {
        name: object_name.clone(),
        bytes: artifact.bytes,
        content_type: content_type.to_string(),
    });

    match result {
        Ok(()) => {
            reporter.notify(Notification::ArtifactUploaded {
                kind,
                object_name: object_name.clone(),
            });
            ArtifactOutcome {
                kind,
                object_name,
                error: None,
            }
        }
        Err(e) => {
            reporter.notify(Notification::ArtifactFailed {
                kind,
                object_name: object_name.clone(),
                reason: e.to_string(),
            });
            ArtifactOutcome {
                kind,
                object_name,
                error: Some(e.to_string()),
            }
        }
    }
}
