//! Attribute management API endpoints

use crate::AppState;
use actix_web::{web, HttpResponse};
use actix_web_validator::{Json, Path};
use estate_catalog_error::{web::WebError, WebResult};
use estate_catalog_models::{
    domain::prelude::{AttributeInfo, AttributePayload, PathId},
    web::WebResponse,
};
use estate_catalog_repository::AttributeRepository;
use std::sync::Arc;
use tracing::warn;

pub(super) const ROUTER_PREFIX: &str = "/attributes";

/// Configure attribute routes
///
/// # Routes
/// - GET ``: List all attributes with their enum options
/// - POST ``: Create a new attribute
/// - GET `/{id}`: Retrieve attribute details by ID
/// - PUT `/{id}`: Replace an attribute and its option set
/// - DELETE `/{id}`: Delete an attribute (guarded while in use)
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/{id}", web::get().to(get_by_id))
        .route("/{id}", web::put().to(update))
        .route("/{id}", web::delete().to(delete));
}

async fn list(state: web::Data<Arc<AppState>>) -> WebResult<WebResponse<Vec<AttributeInfo>>> {
    Ok(WebResponse::ok(
        AttributeRepository::find_all(&state.db).await?,
    ))
}

async fn get_by_id(
    params: Path<PathId>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<AttributeInfo>> {
    Ok(WebResponse::ok(
        AttributeRepository::find_info(params.id, &state.db).await?,
    ))
}

async fn create(
    payload: Json<AttributePayload>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<AttributeInfo>> {
    let payload = payload.into_inner();
    if AttributeRepository::exists_by_name(payload.trimmed_name(), None, &state.db).await? {
        return Err(WebError::BadRequest(format!(
            "an attribute named '{}' already exists",
            payload.trimmed_name()
        )));
    }
    Ok(WebResponse::ok(
        AttributeRepository::create(&payload, &state.db).await?,
    ))
}

/// Replace an attribute definition.
///
/// Changing the `data_type` of an attribute that is already linked to types
/// or carries stored property values is allowed but surfaced as a warning:
/// existing values are not migrated and may no longer match the new type.
async fn update(
    params: Path<PathId>,
    payload: Json<AttributePayload>,
    state: web::Data<Arc<AppState>>,
) -> WebResult<WebResponse<AttributeInfo>> {
    let id = params.id;
    let payload = payload.into_inner();

    let existing = AttributeRepository::find_by_id(id, &state.db)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("attribute {id}")))?;
    if AttributeRepository::exists_by_name(payload.trimmed_name(), Some(id), &state.db).await? {
        return Err(WebError::BadRequest(format!(
            "an attribute named '{}' already exists",
            payload.trimmed_name()
        )));
    }

    let mut warning = None;
    if existing.data_type != payload.data_type {
        let (link_count, value_count) = AttributeRepository::usage_counts(id, &state.db).await?;
        if link_count > 0 || value_count > 0 {
            let message = format!(
                "attribute '{}' changed type from {} to {} while referenced by {} type(s) and {} stored value(s); existing values are not migrated",
                payload.trimmed_name(),
                existing.data_type,
                payload.data_type,
                link_count,
                value_count
            );
            warn!(attribute_id = id, "{message}");
            warning = Some(message);
        }
    }

    let info = AttributeRepository::update(id, &payload, &state.db).await?;
    Ok(match warning {
        Some(message) => WebResponse::ok_with_message(&message, info),
        None => WebResponse::ok(info),
    })
}

async fn delete(params: Path<PathId>, state: web::Data<Arc<AppState>>) -> WebResult<HttpResponse> {
    AttributeRepository::delete(params.id, &state.db).await?;
    Ok(HttpResponse::NoContent().finish())
}
