use actix_web::{cookie::Cookie, web, HttpResponse};
use crate::{database::MongoDB, services::auth_service};
use crate::services::auth_service::{AuthResponse, LoginRequest, RegisterRequest};

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    db: web::Data<MongoDB>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /auth/login - email: {}", request.email);

    match auth_service::login(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Invalid request or user already exists")
    )
)]
pub async fn register(
    db: web::Data<MongoDB>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    log::info!("📝 POST /auth/register - email: {}", request.email);

    match auth_service::register(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Registration successful: {}", request.email);
            HttpResponse::Created().json(response)
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", request.email, e);
            e.to_response()
        }
    }
}

/// POST /auth/logout - there is no server-side session table; the only job
/// here is telling the client to discard its credential, so the response
/// carries an already-expired `auth-token` cookie and always succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session cleared")
    )
)]
pub async fn logout() -> HttpResponse {
    log::info!("👋 POST /auth/logout");

    let expired = Cookie::build("auth-token", "")
        .path("/")
        .http_only(true)
        .expires(actix_web::cookie::time::OffsetDateTime::UNIX_EPOCH)
        .finish();

    HttpResponse::Ok().cookie(expired).json(serde_json::json!({
        "message": "Logged out successfully",
        "clearSession": true
    }))
}
