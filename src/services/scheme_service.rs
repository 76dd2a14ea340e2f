use crate::{database::MongoDB, models::Scheme, utils::AppError};
use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};
use serde::Serialize;

const MAX_BROWSE_LIMIT: i64 = 50;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SchemesResponse {
    pub success: bool,
    pub schemes: Vec<Scheme>,
    pub count: usize,
}

/// GET /schemes/{id} - one immutable scheme by its opaque string id.
pub async fn get_scheme_by_id(db: &MongoDB, id: &str) -> Result<Scheme, AppError> {
    let collection = db.collection::<Scheme>("schemes");

    collection
        .find_one(doc! { "_id": id })
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::NotFound("Scheme not found".to_string()))
}

/// Builds the browse filter: case-insensitive regex on name/tags for the
/// text query, plus exact state/category matches.
fn build_browse_filter(q: Option<&str>, state: Option<&str>, category: Option<&str>) -> Document {
    let mut filter = Document::new();

    if let Some(q) = q.map(str::trim).filter(|s| !s.is_empty()) {
        filter.insert(
            "$or",
            vec![
                doc! { "schemeName": { "$regex": q, "$options": "i" } },
                doc! { "tags": { "$regex": q, "$options": "i" } },
            ],
        );
    }

    if let Some(state) = state.map(str::trim).filter(|s| !s.is_empty()) {
        filter.insert("state", state);
    }

    if let Some(category) = category.map(str::trim).filter(|s| !s.is_empty()) {
        filter.insert("category", category);
    }

    filter
}

/// GET /schemes - browse the catalog with optional text query and filters,
/// sorted by name, capped at 50 results.
pub async fn browse_schemes(
    db: &MongoDB,
    q: Option<&str>,
    state: Option<&str>,
    category: Option<&str>,
    limit: Option<i64>,
) -> Result<SchemesResponse, AppError> {
    let collection = db.collection::<Scheme>("schemes");

    let filter = build_browse_filter(q, state, category);
    let limit = limit
        .filter(|l| *l > 0)
        .unwrap_or(MAX_BROWSE_LIMIT)
        .min(MAX_BROWSE_LIMIT);

    let options = mongodb::options::FindOptions::builder()
        .sort(doc! { "schemeName": 1 })
        .limit(limit)
        .build();

    let mut cursor = collection
        .find(filter)
        .with_options(options)
        .await
        .map_err(AppError::database)?;

    let mut schemes = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(scheme) => schemes.push(scheme),
            Err(e) => log::error!("❌ Error reading scheme: {}", e),
        }
    }

    let count = schemes.len();

    Ok(SchemesResponse {
        success: true,
        schemes,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_builds_an_empty_filter() {
        let filter = build_browse_filter(None, None, None);
        assert!(filter.is_empty());

        let filter = build_browse_filter(Some("  "), Some(""), None);
        assert!(filter.is_empty());
    }

    #[test]
    fn text_query_searches_name_and_tags() {
        let filter = build_browse_filter(Some("pension"), None, None);
        let or = filter.get_array("$or").unwrap();
        assert_eq!(or.len(), 2);
    }

    #[test]
    fn state_and_category_are_exact_matches() {
        let filter = build_browse_filter(None, Some("Maharashtra"), Some("Education"));
        assert_eq!(filter.get_str("state").unwrap(), "Maharashtra");
        assert_eq!(filter.get_str("category").unwrap(), "Education");
        assert!(filter.get("$or").is_none());
    }
}
