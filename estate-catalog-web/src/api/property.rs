//! Property listing API endpoints
//!
//! Only the catalog-facing slice: creating listings whose dynamic attribute
//! values are checked against their type's scope, and reading them back.

use crate::AppState;
use actix_web::web;
use actix_web_validator::{Json, Path};
use estate_catalog_error::WebResult;
use estate_catalog_models::{
    domain::prelude::{NewProperty, PathId, PropertyInfo},
    web::WebResponse,
};
use estate_catalog_repository::PropertyRepository;
use std::sync::Arc;

pub(super) const ROUTER_PREFIX: &str = "/properties";

pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/{id}", web::get().to(get_by_id));
}

async fn list(state: web::Data<Arc<AppState>>) -> WebResult<WebResponse<Vec<PropertyInfo>>> {
    Ok(WebResponse::ok(
        PropertyRepository::find_all(&state.db).await?,
    ))
}

async fn get_by_id(
    params: Path<PathId>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<PropertyInfo>> {
    Ok(WebResponse::ok(
        PropertyRepository::find_info(params.id, &state.db).await?,
    ))
}

async fn create(
    payload: Json<NewProperty>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<PropertyInfo>> {
    Ok(WebResponse::ok(
        PropertyRepository::create(&payload, &state.db).await?,
    ))
}
