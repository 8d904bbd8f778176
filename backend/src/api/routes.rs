//! # API Route Configuration
//!
//! This module sets up all the HTTP routes for the API.

use actix_web::{error, web, HttpResponse};
use tracing::warn;

use super::handlers;
use crate::models::ErrorResponse;

/// JSON body settings shared by every endpoint.
///
/// A body that fails to decode becomes `400 {"error": "..."}` instead of
/// actix's plain-text default. The `Content-Type` header is not required.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            let message = err.to_string();
            warn!("Rejected request body: {}", message);
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse::new(message)),
            )
            .into()
        })
}

/// Configure all API routes.
///
/// This function is called from main.rs to set up
/// all the endpoint routes.
///
/// ## Route Structure
///
/// ```text
/// /
/// ├── /health                  GET - Health check
/// ├── /multisigs               POST, GET
/// │   ├── /{id}                GET, PUT, DELETE
/// │   ├── /{id}/vaults         GET - Vaults sharing the multisig's address
/// │   └── /{id}/members        GET - Members sharing the multisig's address
/// ├── /vaults                  POST, GET
/// │   └── /{id}                GET, PUT, DELETE
/// └── /members                 POST, GET
///     └── /{id}                GET, PUT, DELETE
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(json_config())

        // Health check endpoint
        .route("/health", web::get().to(handlers::health_check))

        // Multisig endpoints
        .service(
            web::scope("/multisigs")
                .route("", web::post().to(handlers::create_multisig))
                .route("", web::get().to(handlers::list_multisigs))
                .route("/{id}", web::get().to(handlers::get_multisig))
                .route("/{id}", web::put().to(handlers::update_multisig))
                .route("/{id}", web::delete().to(handlers::delete_multisig))

                // Subresources, joined on multisig_address
                .route("/{id}/vaults", web::get().to(handlers::list_vaults_by_multisig))
                .route("/{id}/members", web::get().to(handlers::list_members_by_multisig))
        )

        // Vault endpoints
        .service(
            web::scope("/vaults")
                .route("", web::post().to(handlers::create_vault))
                .route("", web::get().to(handlers::list_vaults))
                .route("/{id}", web::get().to(handlers::get_vault))
                .route("/{id}", web::put().to(handlers::update_vault))
                .route("/{id}", web::delete().to(handlers::delete_vault))
        )

        // Member endpoints
        .service(
            web::scope("/members")
                .route("", web::post().to(handlers::create_member))
                .route("", web::get().to(handlers::list_members))
                .route("/{id}", web::get().to(handlers::get_member))
                .route("/{id}", web::put().to(handlers::update_member))
                .route("/{id}", web::delete().to(handlers::delete_member))
        );
}
