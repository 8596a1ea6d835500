use crate::api::domain::request;
use crate::api::error_response;
use crate::appstate::appstate::AppState;
use crate::error::AgentError;
use crate::storage::models::ObjectUpload;
use crate::storage::transfer::upload_object;
use actix_web::http::header;
use actix_web::web::{Bytes, BytesMut};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use futures_util::StreamExt;
use request::UploadQuery;
use uuid::Uuid;

pub async fn upload_to_s3(
    state: web::Data<AppState>,
    query: web::Query<UploadQuery>,
    req: HttpRequest,
    mut payload: web::Payload,
) -> impl Responder {
    let seq_no = Uuid::new_v4();
    let filename = query
        .into_inner()
        .filename
        .map(|f| f.trim().to_string())
        .unwrap_or_default();

    if filename.is_empty() {
        return error_response(&AgentError::Validation(
            "File and filename are required".to_string(),
        ));
    }

    // Zero-byte files are valid objects.
    let body = match read_body(&mut payload, state.max_upload_bytes).await {
        Ok(body) => body,
        Err(e) => {
            log::error!("[{seq_no}] rejected upload of {filename:?}: {e}");
            return error_response(&e);
        }
    };

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let upload = ObjectUpload::new(filename, body, content_type);

    match upload_object(state.store.as_ref(), &upload).await {
        Ok(()) => {
            log::info!("[{seq_no}] uploaded {} ({} bytes)", upload.key, upload.body.len());
            HttpResponse::Ok().json(serde_json::json!({ "message": "File uploaded successfully" }))
        }
        Err(e) => {
            log::error!("[{seq_no}] Error uploading {} to S3: {e}", upload.key);
            error_response(&e)
        }
    }
}

async fn read_body(payload: &mut web::Payload, limit: usize) -> Result<Bytes, AgentError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk
            .map_err(|e| AgentError::Validation(format!("Failed to read request body: {e}")))?;
        if body.len() + chunk.len() > limit {
            return Err(AgentError::PayloadTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}
