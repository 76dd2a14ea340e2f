use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use scheme_service::{api, database, middleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let cors_origin =
        env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    log::info!("🚀 Starting Scheme Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Auth endpoints (session issuance and teardown)
            .service(
                web::scope("/api/v1/auth")
                    .route("/register", web::post().to(api::auth::register))
                    .route("/login", web::post().to(api::auth::login))
                    .route("/logout", web::post().to(api::auth::logout)),
            )
            // Profile: read and partial update - requires session token
            .service(
                web::scope("/api/v1/profile")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("", web::get().to(api::profile::get_profile))
                    .route("", web::post().to(api::profile::update_profile)),
            )
            // Saved schemes: per-user bookmarks - requires session token
            .service(
                web::scope("/api/v1/saved-schemes")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/details", web::get().to(api::saved_schemes::saved_scheme_details))
                    .route("", web::get().to(api::saved_schemes::list_saved_schemes))
                    .route("", web::post().to(api::saved_schemes::add_saved_scheme))
                    .route("", web::delete().to(api::saved_schemes::remove_saved_scheme)),
            )
            // Scheme catalog (READ ONLY, public)
            .service(
                web::scope("/api/v1/schemes")
                    .route("", web::get().to(api::schemes::browse_schemes))
                    .route("/{id}", web::get().to(api::schemes::get_scheme)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
