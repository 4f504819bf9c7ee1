use actix_http::Request;
use actix_web::{
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, App, Error,
};
use estate_catalog_models::settings::Sqlite;
use estate_catalog_web::configure_app;
use serde_json::{json, Value};

async fn spawn_app() -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    let db = estate_catalog_storage::connect_and_migrate(&Sqlite::in_memory())
        .await
        .expect("in-memory database should initialize");
    test::init_service(App::new().configure(configure_app(db, "/api"))).await
}

async fn post<S>(app: &S, path: &str, body: Value) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(path)
        .set_json(body)
        .to_request();
    test::call_service(app, req).await
}

async fn body_json(res: ServiceResponse) -> Value {
    test::read_body_json(res).await
}

async fn create_attribute<S>(app: &S, body: Value) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let res = post(app, "/api/attributes", body).await;
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await["data"]["id"].as_i64().unwrap()
}

async fn create_type<S>(app: &S, name: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let res = post(app, "/api/types", json!({ "name": name })).await;
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await["data"]["id"].as_i64().unwrap()
}

#[actix_web::test]
async fn health_endpoint_is_public() {
    let app = spawn_app().await;
    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn scope_round_trip_keeps_order() {
    let app = spawn_app().await;
    let villa = create_type(&app, "Villa").await;
    let pool = create_attribute(
        &app,
        json!({ "name": "Pool", "data_type": "boolean" }),
    )
    .await;
    let surface = create_attribute(
        &app,
        json!({ "name": "Surface", "data_type": "decimal", "unit": "m2" }),
    )
    .await;
    let color = create_attribute(
        &app,
        json!({ "name": "Color", "data_type": "enum", "options": ["red", "blue"] }),
    )
    .await;

    let res = post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [color, pool, surface] }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    let returned: Vec<i64> = body["data"]["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(returned, vec![color, pool, surface]);

    // The list endpoint serves the same order.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/types").to_request(),
    )
    .await;
    let body = body_json(res).await;
    let listed: Vec<i64> = body["data"][0]["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, vec![color, pool, surface]);
}

#[actix_web::test]
async fn scope_replacement_drops_unlisted_attributes() {
    let app = spawn_app().await;
    let villa = create_type(&app, "Villa").await;
    let a = create_attribute(&app, json!({ "name": "A", "data_type": "string" })).await;
    let b = create_attribute(&app, json!({ "name": "B", "data_type": "string" })).await;

    post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [a, b] }),
    )
    .await;
    let res = post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [b] }),
    )
    .await;
    let body = body_json(res).await;
    let returned: Vec<i64> = body["data"]["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|x| x["id"].as_i64().unwrap())
        .collect();
    assert_eq!(returned, vec![b]);
}

#[actix_web::test]
async fn scope_against_unknown_type_is_404() {
    let app = spawn_app().await;
    let res = post(&app, "/api/types/999/scope", json!({ "attribute_ids": [] })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn scope_with_duplicate_ids_is_400() {
    let app = spawn_app().await;
    let villa = create_type(&app, "Villa").await;
    let a = create_attribute(&app, json!({ "name": "A", "data_type": "string" })).await;
    let res = post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [a, a] }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn enum_attribute_requires_options() {
    let app = spawn_app().await;
    let res = post(
        &app,
        "/api/attributes",
        json!({ "name": "Color", "data_type": "enum" }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert!(body["message"].as_str().unwrap().contains("option"));
}

#[actix_web::test]
async fn duplicate_attribute_name_is_rejected_case_insensitively() {
    let app = spawn_app().await;
    create_attribute(&app, json!({ "name": "Surface", "data_type": "decimal" })).await;
    let res = post(
        &app,
        "/api/attributes",
        json!({ "name": "surface", "data_type": "integer" }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deleting_a_linked_attribute_is_409() {
    let app = spawn_app().await;
    let villa = create_type(&app, "Villa").await;
    let pool = create_attribute(&app, json!({ "name": "Pool", "data_type": "boolean" })).await;
    post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [pool] }),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/attributes/{pool}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = body_json(res).await;
    assert_eq!(body["error"], json!("Conflict"));
    assert!(body["message"].as_str().unwrap().contains("cannot be deleted"));
}

#[actix_web::test]
async fn unlinked_attribute_delete_returns_204() {
    let app = spawn_app().await;
    let pool = create_attribute(&app, json!({ "name": "Pool", "data_type": "boolean" })).await;
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/attributes/{pool}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn type_delete_cascades_scope_and_returns_204() {
    let app = spawn_app().await;
    let villa = create_type(&app, "Villa").await;
    let pool = create_attribute(&app, json!({ "name": "Pool", "data_type": "boolean" })).await;
    post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [pool] }),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/types/{villa}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Freed by the cascade, the attribute is deletable now.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/attributes/{pool}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn retyping_a_used_attribute_warns_but_succeeds() {
    let app = spawn_app().await;
    let villa = create_type(&app, "Villa").await;
    let surface = create_attribute(
        &app,
        json!({ "name": "Surface", "data_type": "decimal" }),
    )
    .await;
    post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [surface] }),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/attributes/{surface}"))
        .set_json(json!({ "name": "Surface", "data_type": "string" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["data"]["data_type"], json!("string"));
    assert!(body["message"].as_str().unwrap().contains("not migrated"));
}

#[actix_web::test]
async fn property_values_are_validated_against_the_scope() {
    let app = spawn_app().await;
    let villa = create_type(&app, "Villa").await;
    let color = create_attribute(
        &app,
        json!({ "name": "Color", "data_type": "enum", "options": ["red", "blue"] }),
    )
    .await;
    post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [color] }),
    )
    .await;

    let res = post(
        &app,
        "/api/properties",
        json!({ "type_id": villa, "attributes": { (color.to_string()): "green" } }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = post(
        &app,
        "/api/properties",
        json!({ "type_id": villa, "attributes": { (color.to_string()): "blue" } }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    // A stored value now blocks attribute deletion even after unlinking.
    post(
        &app,
        &format!("/api/types/{villa}/scope"),
        json!({ "attribute_ids": [] }),
    )
    .await;
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/attributes/{color}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}
