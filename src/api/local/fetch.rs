use crate::api::domain::request;
use crate::api::error_response;
use crate::appstate::appstate::AppState;
use crate::local::resolver::resolve_local_file;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use request::LocalFileRequest;

pub async fn get_local_file(
    state: web::Data<AppState>,
    req: web::Json<LocalFileRequest>,
) -> impl Responder {
    let req = req.into_inner();

    match resolve_local_file(&req.path, state.local_root.as_deref()).await {
        Ok(file) => {
            log::info!("serving {} ({} bytes)", req.path, file.bytes.len());
            HttpResponse::Ok()
                .content_type("application/octet-stream")
                .insert_header((header::CONTENT_DISPOSITION, attachment(&file.file_name)))
                .body(file.bytes)
        }
        Err(e) => {
            log::error!("get-local-file {:?} failed: {e}", req.path);
            error_response(&e)
        }
    }
}

/// Quotes and control characters cannot appear in a quoted header value.
fn attachment(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
