use actix_web::{get, HttpResponse};

/// Liveness of the status service itself; never probes any target.
#[get("")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
