//! Router module for handling all API routes

pub(crate) mod attribute;
pub(crate) mod health;
pub(crate) mod property;
pub(crate) mod property_type;

use actix_web::web;

/// Configure all routes under the API router prefix
pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope(attribute::ROUTER_PREFIX).configure(attribute::configure_routes))
        .service(
            web::scope(property_type::ROUTER_PREFIX).configure(property_type::configure_routes),
        )
        .service(web::scope(property::ROUTER_PREFIX).configure(property::configure_routes));
}

/// Configure public root routes (mounted outside the API router prefix).
pub(crate) fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health));
}
