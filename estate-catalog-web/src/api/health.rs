use actix_web::HttpResponse;
use serde_json::json;

/// Liveness probe for deployment tooling.
pub(crate) async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
