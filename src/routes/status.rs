use crate::health::Prober;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

/// Always answers 200: a "down" verdict travels in the `overall` field,
/// not in the response code.
#[tracing::instrument(name = "Probe status targets.", skip(prober))]
#[get("/health")]
pub async fn status_handler(prober: web::Data<Arc<Prober>>) -> HttpResponse {
    let report = prober.probe_all().await;

    HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .json(report)
}
