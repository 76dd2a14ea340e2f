use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scheme Service API",
        version = "1.0.0",
        description = "Backend for the government-scheme discovery application.\n\n**Authentication:** profile and saved-scheme endpoints require a Bearer session token issued by /auth/login.\n\n**Features:**\n- Local email/password authentication with signed session tokens\n- Profile read and partial update\n- Scheme catalog lookup and browse\n- Per-user saved-scheme bookmarks",
        contact(
            name = "Scheme Service Team"
        )
    ),
    paths(
        // Auth
        crate::api::auth::login,
        crate::api::auth::register,
        crate::api::auth::logout,

        // Health
        crate::api::health::health_check,

        // Profile
        crate::api::profile::get_profile,
        crate::api::profile::update_profile,

        // Saved schemes
        crate::api::saved_schemes::list_saved_schemes,
        crate::api::saved_schemes::add_saved_scheme,
        crate::api::saved_schemes::remove_saved_scheme,
        crate::api::saved_schemes::saved_scheme_details,

        // Schemes
        crate::api::schemes::browse_schemes,
        crate::api::schemes::get_scheme,
    ),
    components(
        schemas(
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::AuthResponse,
            crate::services::auth_service::UserInfo,
            crate::services::profile_service::ProfilePatch,
            crate::services::profile_service::UpdateProfileResponse,
            crate::services::saved_scheme_service::SaveSchemeRequest,
            crate::services::scheme_service::SchemesResponse,
            crate::models::Scheme,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Session issuance and teardown. Local email/password only."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Profile", description = "Read and partially update the caller's profile."),
        (name = "Saved Schemes", description = "Per-user scheme bookmarks: list, add, remove, hydrated details."),
        (name = "Schemes", description = "Read-only scheme catalog: browse with filters or fetch by id."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your session token"))
                        .build(),
                ),
            );
        }
    }
}
