//! Binary note export, shared by `/notes/{note_id}/export` and
//! `/groups/{group_id}/notes/{note_id}/export`.

use axum::extract::State;
use noted_proto::notes::{ExportNoteRequest, NoteExportFormat};
use noted_rest::{Envelope, FileReply, RestError, Route};

use crate::gateway::Gateway;

struct ExportFormat {
    query: &'static str,
    format: NoteExportFormat,
    content_type: &'static str,
    extension: &'static str,
}

/// Closed set of `format` values. The first row doubles as the fallback for
/// whatever the backend echoes back.
static FORMATS: [ExportFormat; 3] = [
    ExportFormat {
        query: "",
        format: NoteExportFormat::Invalid,
        content_type: "application/octet-stream",
        extension: "",
    },
    ExportFormat {
        query: "md",
        format: NoteExportFormat::Markdown,
        content_type: "text/markdown; charset=utf-8",
        extension: "md",
    },
    ExportFormat {
        query: "pdf",
        format: NoteExportFormat::Pdf,
        content_type: "application/pdf",
        extension: "pdf",
    },
];

fn by_query(value: &str) -> Option<&'static ExportFormat> {
    FORMATS.iter().find(|row| row.query == value)
}

fn by_enum(value: i32) -> &'static ExportFormat {
    FORMATS
        .iter()
        .find(|row| row.format as i32 == value)
        .unwrap_or(&FORMATS[0])
}

fn route() -> Route<ExportNoteRequest> {
    Route::<ExportNoteRequest>::authenticated("ExportNote")
        .bind(|req, env| req.note_id = env.path_param("note_id"))
        .try_bind(|req, env| {
            let value = env.query_param("format");
            let row = by_query(&value).ok_or_else(|| RestError::InvalidParameter {
                name: "format",
                message: format!("unknown export format '{value}'"),
            })?;
            req.export_format = row.format as i32;
            Ok(())
        })
}

/// Answer with the exported file as an attachment named after the note.
///
/// Failures before or during the backend call use the JSON error shape.
pub(crate) async fn export_note(
    State(gateway): State<Gateway>,
    envelope: Envelope,
) -> Result<FileReply, RestError> {
    let route = route();
    let (ctx, req) = route.prepare(&envelope, gateway.rpc_timeout())?;
    let row = by_enum(req.export_format);
    let note_id = req.note_id.clone();

    let exported = route
        .invoke(gateway.notes().export_note(ctx.request(req)))
        .await?;

    Ok(FileReply::new(
        exported.file,
        row.content_type,
        &note_id,
        row.extension,
    ))
}
