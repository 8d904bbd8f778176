//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint.
//! Each handler:
//! 1. Extracts the path id / query / body
//! 2. Runs one or two queries
//! 3. Returns the record(s) as JSON
//!
//! ## Error Handling
//!
//! Failures are returned as a single-field JSON object:
//!
//! ```json
//! { "error": "not found" }
//! ```
//!
//! | Status | When |
//! |--------|------|
//! | 400 | Body is not valid JSON for the resource |
//! | 404 | No row with that id |
//! | 500 | Any other database failure (message passed through) |

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::db::queries;
use crate::db::{DatabaseError, LinkedToMultisig, Member, Multisig, Record, Vault};
use crate::models::{
    CreateMemberRequest, CreateMultisigRequest, CreateVaultRequest, ErrorResponse, ListQuery,
    StatusResponse, UpdateMemberRequest, UpdateMultisigRequest, UpdateVaultRequest,
};
use crate::AppState;

const NOT_FOUND: &str = "not found";
const MULTISIG_NOT_FOUND: &str = "multisig not found";

// ============================================
// RESPONSE HELPERS
// ============================================

/// Path ids are integers; anything else cannot match a row.
fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(message))
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(message))
}

/// Map a database failure to a response. `NotFound` is a 404, everything
/// else a 500 carrying the underlying message.
fn database_error(context: &str, e: DatabaseError) -> HttpResponse {
    match e {
        DatabaseError::NotFound(what) => {
            debug!("{}: {} vanished", context, what);
            not_found(NOT_FOUND)
        }
        other => {
            error!("{} failed: {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(other.to_string()))
        }
    }
}

/// Decode a JSON body, turning serde's error into a 400.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, HttpResponse> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected request body: {}", e);
        bad_request(e.to_string())
    })
}

/// Load a row of `T`, answering 404 with `missing` when it does not exist.
async fn load<T: Record>(state: &AppState, raw_id: &str, missing: &str) -> Result<T, HttpResponse> {
    let Some(id) = parse_id(raw_id) else {
        return Err(not_found(missing));
    };

    match queries::get_record::<T>(state.db.pool(), id).await {
        Ok(Some(row)) => Ok(row),
        Ok(None) => Err(not_found(missing)),
        Err(e) => Err(database_error(&format!("Get {}", T::TABLE), e)),
    }
}

/// Repeated query keys are allowed; the first occurrence wins.
async fn list_response<T: Record + Serialize>(
    state: &AppState,
    pairs: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    let query = ListQuery::from_pairs(pairs.into_inner());
    info!(
        "List {} (q: {:?}, sort: {:?}, page: {}, page_size: {})",
        T::TABLE,
        query.search(),
        query.sort(),
        query.page(),
        query.page_size()
    );

    match queries::list_records::<T>(state.db.pool(), &query).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => database_error(&format!("List {}", T::TABLE), e),
    }
}

async fn get_response<T: Record + Serialize>(state: &AppState, raw_id: &str) -> HttpResponse {
    match load::<T>(state, raw_id, NOT_FOUND).await {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(response) => response,
    }
}

/// Delete never reports whether a row was actually removed.
async fn delete_response<T: Record>(state: &AppState, raw_id: &str) -> HttpResponse {
    let Some(id) = parse_id(raw_id) else {
        debug!("Delete {} with non-numeric id '{}'", T::TABLE, raw_id);
        return HttpResponse::Ok().json(StatusResponse::deleted());
    };

    match queries::delete_record::<T>(state.db.pool(), id).await {
        Ok(_) => HttpResponse::Ok().json(StatusResponse::deleted()),
        Err(e) => database_error(&format!("Delete {}", T::TABLE), e),
    }
}

async fn by_multisig_response<T: LinkedToMultisig + Serialize>(
    state: &AppState,
    raw_id: &str,
) -> HttpResponse {
    let multisig = match load::<Multisig>(state, raw_id, MULTISIG_NOT_FOUND).await {
        Ok(multisig) => multisig,
        Err(response) => return response,
    };

    info!(
        "List {} for multisig {} ({})",
        T::TABLE,
        multisig.id,
        multisig.multisig_address
    );

    match queries::list_by_multisig_address::<T>(state.db.pool(), &multisig.multisig_address).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => database_error(&format!("List {} by multisig", T::TABLE), e),
    }
}

// ============================================
// HEALTH
// ============================================

/// Health check endpoint.
///
/// ## Endpoint
///
/// `GET /health`
///
/// ## Response
///
/// ```json
/// { "status": "ok" }
/// ```
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse::ok())
}

// ============================================
// MULTISIG
// ============================================

/// Create a multisig.
///
/// ## Endpoint
///
/// `POST /multisigs`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/multisigs \
///   -H "Content-Type: application/json" \
///   -d '{"multisig_address": "addr1", "name": "Treasury"}'
/// ```
///
/// ## Response (201)
///
/// ```json
/// {
///     "id": 1,
///     "multisig_address": "addr1",
///     "name": "Treasury",
///     "description": "",
///     "created_at": "2025-01-01T12:00:00Z",
///     "updated_at": "2025-01-01T12:00:00Z"
/// }
/// ```
pub async fn create_multisig(
    state: web::Data<Arc<AppState>>,
    body: web::Json<CreateMultisigRequest>,
) -> HttpResponse {
    info!("Create multisig request for: {}", body.multisig_address);

    match queries::insert_multisig(state.db.pool(), &body).await {
        Ok(row) => HttpResponse::Created().json(row),
        Err(e) => database_error("Create multisig", e),
    }
}

/// List multisigs.
///
/// ## Endpoint
///
/// `GET /multisigs?q=&sort=&page=&page_size=`
pub async fn list_multisigs(
    state: web::Data<Arc<AppState>>,
    query: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    list_response::<Multisig>(&state, query).await
}

/// Get a multisig.
///
/// ## Endpoint
///
/// `GET /multisigs/{id}`
pub async fn get_multisig(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> HttpResponse {
    get_response::<Multisig>(&state, &path).await
}

/// Update a multisig.
///
/// Only the fields present in the body change.
///
/// ## Endpoint
///
/// `PUT /multisigs/{id}`
///
/// ## Example
///
/// ```bash
/// curl -X PUT http://127.0.0.1:8080/multisigs/1 \
///   -H "Content-Type: application/json" \
///   -d '{"description": "Ops budget"}'
/// ```
pub async fn update_multisig(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let mut multisig = match load::<Multisig>(&state, &path, NOT_FOUND).await {
        Ok(row) => row,
        Err(response) => return response,
    };
    let patch: UpdateMultisigRequest = match decode_body(&body) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    patch.apply_to(&mut multisig);
    info!("Update multisig {}", multisig.id);

    match queries::update_multisig(state.db.pool(), &multisig).await {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => database_error("Update multisig", e),
    }
}

/// Delete a multisig.
///
/// Vaults and members pointing at it are left untouched.
///
/// ## Endpoint
///
/// `DELETE /multisigs/{id}`
pub async fn delete_multisig(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> HttpResponse {
    delete_response::<Multisig>(&state, &path).await
}

/// List the vaults of a multisig.
///
/// Matches vaults on the multisig's address. No paging.
///
/// ## Endpoint
///
/// `GET /multisigs/{id}/vaults`
pub async fn list_vaults_by_multisig(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> HttpResponse {
    by_multisig_response::<Vault>(&state, &path).await
}

/// List the members of a multisig.
///
/// ## Endpoint
///
/// `GET /multisigs/{id}/members`
pub async fn list_members_by_multisig(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> HttpResponse {
    by_multisig_response::<Member>(&state, &path).await
}

// ============================================
// VAULT
// ============================================

/// Create a vault.
///
/// `multisig_address` is stored as given, even if no such multisig exists.
///
/// ## Endpoint
///
/// `POST /vaults`
pub async fn create_vault(
    state: web::Data<Arc<AppState>>,
    body: web::Json<CreateVaultRequest>,
) -> HttpResponse {
    info!("Create vault request for: {}", body.vault_address);

    match queries::insert_vault(state.db.pool(), &body).await {
        Ok(row) => HttpResponse::Created().json(row),
        Err(e) => database_error("Create vault", e),
    }
}

/// List vaults. `q` is accepted but ignored.
pub async fn list_vaults(
    state: web::Data<Arc<AppState>>,
    query: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    list_response::<Vault>(&state, query).await
}

pub async fn get_vault(state: web::Data<Arc<AppState>>, path: web::Path<String>) -> HttpResponse {
    get_response::<Vault>(&state, &path).await
}

pub async fn update_vault(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let mut vault = match load::<Vault>(&state, &path, NOT_FOUND).await {
        Ok(row) => row,
        Err(response) => return response,
    };
    let patch: UpdateVaultRequest = match decode_body(&body) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    patch.apply_to(&mut vault);
    info!("Update vault {}", vault.id);

    match queries::update_vault(state.db.pool(), &vault).await {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => database_error("Update vault", e),
    }
}

pub async fn delete_vault(state: web::Data<Arc<AppState>>, path: web::Path<String>) -> HttpResponse {
    delete_response::<Vault>(&state, &path).await
}

// ============================================
// MEMBER
// ============================================

/// Create a member.
///
/// ## Endpoint
///
/// `POST /members`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/members \
///   -H "Content-Type: application/json" \
///   -d '{"member_address": "maddr1", "name": "Alice", "multisig_address": "addr1"}'
/// ```
pub async fn create_member(
    state: web::Data<Arc<AppState>>,
    body: web::Json<CreateMemberRequest>,
) -> HttpResponse {
    info!("Create member request for: {}", body.member_address);

    match queries::insert_member(state.db.pool(), &body).await {
        Ok(row) => HttpResponse::Created().json(row),
        Err(e) => database_error("Create member", e),
    }
}

pub async fn list_members(
    state: web::Data<Arc<AppState>>,
    query: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    list_response::<Member>(&state, query).await
}

pub async fn get_member(state: web::Data<Arc<AppState>>, path: web::Path<String>) -> HttpResponse {
    get_response::<Member>(&state, &path).await
}

pub async fn update_member(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let mut member = match load::<Member>(&state, &path, NOT_FOUND).await {
        Ok(row) => row,
        Err(response) => return response,
    };
    let patch: UpdateMemberRequest = match decode_body(&body) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    patch.apply_to(&mut member);
    info!("Update member {}", member.id);

    match queries::update_member(state.db.pool(), &member).await {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => database_error("Update member", e),
    }
}

pub async fn delete_member(state: web::Data<Arc<AppState>>, path: web::Path<String>) -> HttpResponse {
    delete_response::<Member>(&state, &path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::api::configure_routes;
    use crate::db::Database;

    macro_rules! test_app {
        () => {{
            let db = Database::in_memory().await.unwrap();
            db.run_migrations().await.unwrap();
            let state = Arc::new(AppState { db });
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .configure(configure_routes),
            )
            .await
        }};
    }

    macro_rules! call {
        ($app:expr, $req:expr) => {
            test::call_service(&$app, $req.to_request()).await
        };
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test_app!();
        let resp = call!(app, test::TestRequest::get().uri("/health"));
        assert_eq!(resp.status(), StatusCode::OK);
        let body: StatusResponse = test::read_body_json(resp).await;
        assert_eq!(body, StatusResponse::ok());
    }

    #[actix_web::test]
    async fn test_multisig_vault_scenario() {
        let app = test_app!();

        let resp = call!(
            app,
            test::TestRequest::post()
                .uri("/multisigs")
                .set_json(json!({"multisig_address": "addr1", "name": "Treasury"}))
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
        let multisig: Multisig = test::read_body_json(resp).await;
        assert_eq!(multisig.id, 1);
        assert_eq!(multisig.name, "Treasury");

        let resp = call!(
            app,
            test::TestRequest::post()
                .uri("/vaults")
                .set_json(json!({"vault_address": "vaddr1", "multisig_address": "addr1"}))
        );
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = call!(app, test::TestRequest::get().uri("/multisigs/1/vaults"));
        assert_eq!(resp.status(), StatusCode::OK);
        let vaults: Vec<Vault> = test::read_body_json(resp).await;
        assert_eq!(vaults.len(), 1);
        assert_eq!(vaults[0].vault_address, "vaddr1");
    }

    #[actix_web::test]
    async fn test_get_missing_is_404() {
        let app = test_app!();
        for uri in ["/multisigs/999", "/vaults/999", "/members/999", "/members/abc"] {
            let resp = call!(app, test::TestRequest::get().uri(uri));
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body, ErrorResponse::new("not found"));
        }
    }

    #[actix_web::test]
    async fn test_get_after_create_matches() {
        let app = test_app!();

        let resp = call!(
            app,
            test::TestRequest::post().uri("/members").set_json(json!({
                "member_address": "maddr1",
                "name": "Alice",
                "multisig_address": "addr1"
            }))
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Member = test::read_body_json(resp).await;

        let resp = call!(app, test::TestRequest::get().uri(&format!("/members/{}", created.id)));
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: Member = test::read_body_json(resp).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn test_ids_are_unique() {
        let app = test_app!();
        let mut ids = Vec::new();
        for i in 0..3 {
            let resp = call!(
                app,
                test::TestRequest::post()
                    .uri("/vaults")
                    .set_json(json!({"vault_address": format!("v{}", i)}))
            );
            let vault: Vault = test::read_body_json(resp).await;
            ids.push(vault.id);
        }
        call!(app, test::TestRequest::delete().uri(&format!("/vaults/{}", ids[2])));

        let resp = call!(app, test::TestRequest::post().uri("/vaults").set_json(json!({})));
        let vault: Vault = test::read_body_json(resp).await;
        assert!(!ids.contains(&vault.id));
    }

    #[actix_web::test]
    async fn test_create_malformed_body_is_400() {
        let app = test_app!();

        let resp = call!(
            app,
            test::TestRequest::post()
                .uri("/multisigs")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());

        let resp = call!(
            app,
            test::TestRequest::post()
                .uri("/vaults")
                .set_json(json!({"vault_address": 12}))
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_update_patches_present_fields() {
        let app = test_app!();

        let resp = call!(
            app,
            test::TestRequest::post().uri("/multisigs").set_json(json!({
                "multisig_address": "addr1",
                "name": "Treasury",
                "description": "main"
            }))
        );
        let created: Multisig = test::read_body_json(resp).await;

        let resp = call!(
            app,
            test::TestRequest::put()
                .uri(&format!("/multisigs/{}", created.id))
                .set_json(json!({"name": "Ops", "id": 42}))
        );
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Multisig = test::read_body_json(resp).await;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ops");
        assert_eq!(updated.description, "main");
        assert_eq!(updated.multisig_address, "addr1");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let resp = call!(app, test::TestRequest::get().uri(&format!("/multisigs/{}", created.id)));
        let fetched: Multisig = test::read_body_json(resp).await;
        assert_eq!(fetched, updated);
    }

    #[actix_web::test]
    async fn test_update_missing_is_404_before_body_check() {
        let app = test_app!();
        let resp = call!(
            app,
            test::TestRequest::put()
                .uri("/members/5")
                .insert_header(("content-type", "application/json"))
                .set_payload("garbage")
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_malformed_body_is_400() {
        let app = test_app!();
        call!(app, test::TestRequest::post().uri("/vaults").set_json(json!({"vault_address": "v1"})));

        let resp = call!(
            app,
            test::TestRequest::put()
                .uri("/vaults/1")
                .set_json(json!({"vault_address": ["not", "a", "string"]}))
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_then_get_is_404() {
        let app = test_app!();
        call!(
            app,
            test::TestRequest::post()
                .uri("/multisigs")
                .set_json(json!({"multisig_address": "addr1", "name": "Treasury"}))
        );

        let resp = call!(app, test::TestRequest::delete().uri("/multisigs/1"));
        assert_eq!(resp.status(), StatusCode::OK);
        let body: StatusResponse = test::read_body_json(resp).await;
        assert_eq!(body, StatusResponse::deleted());

        let resp = call!(app, test::TestRequest::get().uri("/multisigs/1"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_missing_still_reports_deleted() {
        let app = test_app!();
        for uri in ["/members/77", "/members/not-a-number"] {
            let resp = call!(app, test::TestRequest::delete().uri(uri));
            assert_eq!(resp.status(), StatusCode::OK);
            let body: StatusResponse = test::read_body_json(resp).await;
            assert_eq!(body, StatusResponse::deleted());
        }
    }

    #[actix_web::test]
    async fn test_members_pagination() {
        let app = test_app!();
        for name in ["a", "b", "c", "d", "e"] {
            call!(
                app,
                test::TestRequest::post()
                    .uri("/members")
                    .set_json(json!({"member_address": name, "name": name}))
            );
        }

        let resp = call!(app, test::TestRequest::get().uri("/members?page=1&page_size=2"));
        assert_eq!(resp.status(), StatusCode::OK);
        let first: Vec<Member> = test::read_body_json(resp).await;
        assert_eq!(first.len(), 2);

        let resp = call!(app, test::TestRequest::get().uri("/members?page=2&page_size=2"));
        let second: Vec<Member> = test::read_body_json(resp).await;
        assert_eq!(second.len(), 2);
        assert!(second.iter().all(|m| first.iter().all(|f| f.id < m.id)));

        let resp = call!(app, test::TestRequest::get().uri("/members?page=0&page_size=oops"));
        let defaulted: Vec<Member> = test::read_body_json(resp).await;
        assert_eq!(defaulted.len(), 5);
    }

    #[actix_web::test]
    async fn test_repeated_query_key_uses_first_value() {
        let app = test_app!();
        for name in ["a", "b", "c"] {
            call!(
                app,
                test::TestRequest::post()
                    .uri("/members")
                    .set_json(json!({"member_address": name, "name": name}))
            );
        }

        let resp = call!(app, test::TestRequest::get().uri("/members?page=1&page=2&page_size=1"));
        assert_eq!(resp.status(), StatusCode::OK);
        let page: Vec<Member> = test::read_body_json(resp).await;
        assert_eq!(page.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(), ["a"]);
    }

    #[actix_web::test]
    async fn test_search_matches_underscore_literally() {
        let app = test_app!();
        for name in ["Ops", "Treasury", "ops_team"] {
            call!(
                app,
                test::TestRequest::post()
                    .uri("/members")
                    .set_json(json!({"member_address": name, "name": name}))
            );
        }

        let resp = call!(app, test::TestRequest::get().uri("/members?q=_"));
        assert_eq!(resp.status(), StatusCode::OK);
        let found: Vec<Member> = test::read_body_json(resp).await;
        assert_eq!(found.len(), 1);
        assert!(found.iter().all(|m| m.name.contains('_')));
    }

    #[actix_web::test]
    async fn test_multisig_search_and_sort() {
        let app = test_app!();
        for (address, name) in [("a1", "Treasury"), ("a2", "Ops"), ("a3", "Treasury Reserve")] {
            call!(
                app,
                test::TestRequest::post()
                    .uri("/multisigs")
                    .set_json(json!({"multisig_address": address, "name": name}))
            );
        }

        let resp = call!(app, test::TestRequest::get().uri("/multisigs?q=Treas&sort=id:desc"));
        assert_eq!(resp.status(), StatusCode::OK);
        let found: Vec<Multisig> = test::read_body_json(resp).await;
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.name.contains("Treas")));
        assert_eq!(found[0].multisig_address, "a3");
    }

    #[actix_web::test]
    async fn test_bad_sort_is_500() {
        let app = test_app!();
        for uri in ["/multisigs?sort=no_such_column", "/multisigs?sort=name:sideways"] {
            let resp = call!(app, test::TestRequest::get().uri(uri));
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            let body: ErrorResponse = test::read_body_json(resp).await;
            assert!(!body.error.is_empty());
        }
    }

    #[actix_web::test]
    async fn test_members_by_multisig_filters_on_address() {
        let app = test_app!();
        call!(
            app,
            test::TestRequest::post()
                .uri("/multisigs")
                .set_json(json!({"multisig_address": "addr1", "name": "Treasury"}))
        );
        for (member, multisig) in [("m1", "addr1"), ("m2", "addr2"), ("m3", "addr1")] {
            call!(
                app,
                test::TestRequest::post()
                    .uri("/members")
                    .set_json(json!({"member_address": member, "multisig_address": multisig}))
            );
        }

        let resp = call!(app, test::TestRequest::get().uri("/multisigs/1/members"));
        assert_eq!(resp.status(), StatusCode::OK);
        let members: Vec<Member> = test::read_body_json(resp).await;
        assert_eq!(
            members.iter().map(|m| m.member_address.as_str()).collect::<Vec<_>>(),
            ["m1", "m3"]
        );
    }

    #[actix_web::test]
    async fn test_subresource_missing_multisig_is_404() {
        let app = test_app!();
        for uri in ["/multisigs/3/vaults", "/multisigs/3/members"] {
            let resp = call!(app, test::TestRequest::get().uri(uri));
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body, ErrorResponse::new("multisig not found"));
        }
    }

    #[actix_web::test]
    async fn test_delete_multisig_does_not_cascade() {
        let app = test_app!();
        call!(
            app,
            test::TestRequest::post()
                .uri("/multisigs")
                .set_json(json!({"multisig_address": "addr1"}))
        );
        call!(
            app,
            test::TestRequest::post()
                .uri("/vaults")
                .set_json(json!({"vault_address": "v1", "multisig_address": "addr1"}))
        );

        call!(app, test::TestRequest::delete().uri("/multisigs/1"));

        let resp = call!(app, test::TestRequest::get().uri("/vaults/1"));
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = call!(app, test::TestRequest::get().uri("/multisigs/1/vaults"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
