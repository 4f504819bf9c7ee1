//! Property type and scope management API endpoints

use crate::AppState;
use actix_web::{web, HttpResponse};
use actix_web_validator::{Json, Path};
use estate_catalog_error::{web::WebError, WebResult};
use estate_catalog_models::{
    domain::prelude::{PathId, PropertyTypeWithAttributes, ScopePayload, TypePayload},
    web::WebResponse,
};
use estate_catalog_repository::{PropertyTypeRepository, ScopeRepository};
use std::sync::Arc;

pub(super) const ROUTER_PREFIX: &str = "/types";

/// Configure property type routes
///
/// # Routes
/// - GET ``: List all types with their attribute scope
/// - POST ``: Create a new type
/// - GET `/{id}`: Retrieve one type with its scope
/// - PUT `/{id}`: Update a type's name and description
/// - DELETE `/{id}`: Delete a type and its scope links
/// - POST `/{id}/scope`: Replace the type's attribute scope with an
///   ordered id list
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/{id}", web::get().to(get_by_id))
        .route("/{id}", web::put().to(update))
        .route("/{id}", web::delete().to(delete))
        .route("/{id}/scope", web::post().to(set_scope));
}

async fn list(
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<Vec<PropertyTypeWithAttributes>>> {
    Ok(WebResponse::ok(
        PropertyTypeRepository::find_all_with_attributes(&state.db).await?,
    ))
}

async fn get_by_id(
    params: Path<PathId>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<PropertyTypeWithAttributes>> {
    Ok(WebResponse::ok(
        PropertyTypeRepository::find_with_attributes(params.id, &state.db).await?,
    ))
}

async fn create(
    payload: Json<TypePayload>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<PropertyTypeWithAttributes>> {
    let payload = payload.into_inner();
    if PropertyTypeRepository::exists_by_name(payload.trimmed_name(), None, &state.db).await? {
        return Err(WebError::BadRequest(format!(
            "a property type named '{}' already exists",
            payload.trimmed_name()
        )));
    }
    let info = PropertyTypeRepository::create(&payload, &state.db).await?;
    // A fresh type always has an empty scope.
    Ok(WebResponse::ok(
        PropertyTypeRepository::find_with_attributes(info.id, &state.db).await?,
    ))
}

async fn update(
    params: Path<PathId>,
    payload: Json<TypePayload>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<PropertyTypeWithAttributes>> {
    let payload = payload.into_inner();
    if PropertyTypeRepository::exists_by_name(payload.trimmed_name(), Some(params.id), &state.db)
        .await?
    {
        return Err(WebError::BadRequest(format!(
            "a property type named '{}' already exists",
            payload.trimmed_name()
        )));
    }
    PropertyTypeRepository::update(params.id, &payload, &state.db).await?;
    Ok(WebResponse::ok(
        PropertyTypeRepository::find_with_attributes(params.id, &state.db).await?,
    ))
}

async fn delete(params: Path<PathId>, state: web::Data<Arc<AppState>>) -> WebResult<HttpResponse> {
    PropertyTypeRepository::delete(params.id, &state.db).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Replace the type's attribute scope.
///
/// The submitted `attribute_ids` list is authoritative: its order becomes
/// the stored `sort_order` and anything absent from it is unlinked. The
/// response carries the type with its new scope.
async fn set_scope(
    params: Path<PathId>,
    payload: Json<ScopePayload>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<PropertyTypeWithAttributes>> {
    ScopeRepository::replace(params.id, &payload.attribute_ids, &state.db).await?;
    Ok(WebResponse::ok(
        PropertyTypeRepository::find_with_attributes(params.id, &state.db).await?,
    ))
}
