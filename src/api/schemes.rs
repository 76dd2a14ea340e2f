use actix_web::{web, HttpResponse};
use crate::{database::MongoDB, services::scheme_service};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct BrowseQuery {
    pub q: Option<String>,
    pub state: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/schemes",
    tag = "Schemes",
    responses(
        (status = 200, description = "List of schemes matching the filters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn browse_schemes(
    db: web::Data<MongoDB>,
    query: web::Query<BrowseQuery>,
) -> HttpResponse {
    log::info!("🔍 GET /schemes - q: {:?}", query.q);

    match scheme_service::browse_schemes(
        &db,
        query.q.as_deref(),
        query.state.as_deref(),
        query.category.as_deref(),
        query.limit,
    )
    .await
    {
        Ok(response) => {
            log::info!("✅ Schemes retrieved: {}", response.count);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Failed to browse schemes: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/schemes/{id}",
    tag = "Schemes",
    params(
        ("id" = String, Path, description = "Opaque scheme identifier")
    ),
    responses(
        (status = 200, description = "Scheme found"),
        (status = 404, description = "Scheme not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_scheme(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("📄 GET /schemes/{}", id);

    match scheme_service::get_scheme_by_id(&db, &id).await {
        Ok(scheme) => {
            log::info!("✅ Scheme {} found", id);
            HttpResponse::Ok().json(scheme)
        }
        Err(e) => {
            log::warn!("⚠️ Scheme {} lookup failed: {}", id, e);
            e.to_response()
        }
    }
}
