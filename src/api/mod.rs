use crate::error::AgentError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

pub mod domain;
pub mod local;
pub mod ping;
pub mod s3;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/upload-to-s3", web::post().to(s3::upload::upload_to_s3))
            .route("/get-local-file", web::post().to(local::fetch::get_local_file))
            .route("/ping", web::post().to(ping::ping))
            .route("/ping", web::get().to(ping::ping)),
    );
}

pub(crate) fn error_response(err: &AgentError) -> HttpResponse {
    let status = match err {
        AgentError::Validation(_) => StatusCode::BAD_REQUEST,
        AgentError::NotFound(_) => StatusCode::NOT_FOUND,
        AgentError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    HttpResponse::build(status).json(serde_json::json!({ "error": err.to_string() }))
}
