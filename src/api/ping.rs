use actix_web::{HttpResponse, Responder};

pub async fn ping() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("Server is running")
}
