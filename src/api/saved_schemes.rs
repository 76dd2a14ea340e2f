use actix_web::{web, HttpResponse, Responder};
use crate::{
    database::MongoDB,
    services::auth_service::Claims,
    services::saved_scheme_service::{self, SaveSchemeRequest},
};

/// GET /api/v1/saved-schemes - full list of the caller's bookmarked ids.
#[utoipa::path(
    get,
    path = "/api/v1/saved-schemes",
    tag = "Saved Schemes",
    responses(
        (status = 200, description = "List of saved scheme ids"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_saved_schemes(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
) -> impl Responder {
    let email = &user.sub;

    log::info!("📋 GET /saved-schemes - {}", email);

    match saved_scheme_service::list_saved_schemes(&db, email).await {
        Ok(saved) => {
            log::info!("✅ {} saved schemes for {}", saved.len(), email);
            HttpResponse::Ok().json(serde_json::json!({ "savedSchemes": saved }))
        }
        Err(e) => {
            log::warn!("⚠️ Failed to list saved schemes for {}: {}", email, e);
            e.to_response()
        }
    }
}

/// POST /api/v1/saved-schemes - bookmark a scheme (idempotent).
#[utoipa::path(
    post,
    path = "/api/v1/saved-schemes",
    tag = "Saved Schemes",
    request_body = SaveSchemeRequest,
    responses(
        (status = 200, description = "Scheme saved; updated list returned"),
        (status = 400, description = "Scheme id missing from body"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_saved_scheme(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<SaveSchemeRequest>,
) -> impl Responder {
    let email = &user.sub;

    log::info!("➕ POST /saved-schemes - {}", email);

    match saved_scheme_service::add_saved_scheme(&db, email, request.into_inner()).await {
        Ok(saved) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Scheme saved successfully",
            "success": true,
            "savedSchemes": saved
        })),
        Err(e) => {
            log::warn!("⚠️ Failed to save scheme for {}: {}", email, e);
            e.to_response()
        }
    }
}

/// DELETE /api/v1/saved-schemes - remove a bookmark (no-op if absent).
#[utoipa::path(
    delete,
    path = "/api/v1/saved-schemes",
    tag = "Saved Schemes",
    request_body = SaveSchemeRequest,
    responses(
        (status = 200, description = "Scheme removed; updated list returned"),
        (status = 400, description = "Scheme id missing from body"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_saved_scheme(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<SaveSchemeRequest>,
) -> impl Responder {
    let email = &user.sub;

    log::info!("🗑️  DELETE /saved-schemes - {}", email);

    match saved_scheme_service::remove_saved_scheme(&db, email, request.into_inner()).await {
        Ok(saved) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Scheme deleted successfully",
            "success": true,
            "savedSchemes": saved
        })),
        Err(e) => {
            log::warn!("⚠️ Failed to remove scheme for {}: {}", email, e);
            e.to_response()
        }
    }
}

/// GET /api/v1/saved-schemes/details - hydrated scheme documents for the
/// caller's bookmarks; dangling ids are skipped.
#[utoipa::path(
    get,
    path = "/api/v1/saved-schemes/details",
    tag = "Saved Schemes",
    responses(
        (status = 200, description = "Full scheme documents for the saved ids, dangling ids skipped"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn saved_scheme_details(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
) -> impl Responder {
    let email = &user.sub;

    log::info!("📚 GET /saved-schemes/details - {}", email);

    match saved_scheme_service::saved_scheme_details(&db, email).await {
        Ok(schemes) => {
            log::info!("✅ Hydrated {} saved schemes for {}", schemes.len(), email);
            let count = schemes.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "schemes": schemes,
                "count": count
            }))
        }
        Err(e) => {
            log::warn!("⚠️ Failed to hydrate saved schemes for {}: {}", email, e);
            e.to_response()
        }
    }
}
