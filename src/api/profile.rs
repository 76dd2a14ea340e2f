use actix_web::{web, HttpResponse, Responder};
use crate::{
    database::MongoDB,
    services::auth_service::Claims,
    services::profile_service::{self, ProfilePatch},
};

/// GET /api/v1/profile - returns the caller's profile, credential stripped.
/// Identity comes from the verified session claims, never from a query
/// parameter.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile retrieved (password never included)"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
) -> impl Responder {
    let email = &user.sub;

    log::info!("👤 GET /profile - {}", email);

    match profile_service::get_profile(&db, email).await {
        Ok(profile) => {
            log::info!("✅ Profile retrieved: {}", email);
            HttpResponse::Ok().json(serde_json::json!({ "user": profile }))
        }
        Err(e) => {
            log::warn!("⚠️ Failed to get profile {}: {}", email, e);
            e.to_response()
        }
    }
}

/// POST /api/v1/profile - partial update from a typed patch. Unknown keys
/// are rejected by deserialization before this handler runs.
#[utoipa::path(
    post,
    path = "/api/v1/profile",
    tag = "Profile",
    request_body = ProfilePatch,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    request: web::Json<ProfilePatch>,
) -> impl Responder {
    let email = &user.sub;

    log::info!("📝 POST /profile - {}", email);

    match profile_service::update_profile(&db, email, &request).await {
        Ok(response) => {
            log::info!("✅ Profile updated: {}", email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("⚠️ Failed to update profile {}: {}", email, e);
            e.to_response()
        }
    }
}
