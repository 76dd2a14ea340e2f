use crate::{
    database::MongoDB,
    models::{Scheme, User},
    utils::AppError,
};
use futures::stream::StreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SaveSchemeRequest {
    #[serde(rename = "_id")]
    pub scheme_id: Option<String>,
}

/// Pulls a usable scheme id out of the request body. Absent or blank ids are
/// a 400, not a silent no-op.
fn normalize_scheme_id(raw: Option<&str>) -> Result<String, AppError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or_else(|| AppError::MissingParameter("Scheme id (_id) is required".to_string()))
}

/// GET - full saved list for the user, empty if the field was never set.
pub async fn list_saved_schemes(db: &MongoDB, email: &str) -> Result<Vec<String>, AppError> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! { "email": email })
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(user.saved_schemes)
}

/// POST - idempotent append. A single atomic `$addToSet` on the user
/// document, so two concurrent adds can never lose an entry; the post-image
/// is returned to the client. `$addToSet` appends at the end when the id is
/// absent, preserving insertion order.
pub async fn add_saved_scheme(
    db: &MongoDB,
    email: &str,
    request: SaveSchemeRequest,
) -> Result<Vec<String>, AppError> {
    let scheme_id = normalize_scheme_id(request.scheme_id.as_deref())?;
    let collection = db.collection::<User>("users");

    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let user = collection
        .find_one_and_update(
            doc! { "email": email },
            doc! { "$addToSet": { "savedSchemes": &scheme_id } },
        )
        .with_options(options)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    log::info!("✅ Scheme {} saved for {}", scheme_id, email);
    Ok(user.saved_schemes)
}

/// DELETE - atomic `$pull`. Removing an id that is not present is a success
/// no-op; the unchanged list comes back.
pub async fn remove_saved_scheme(
    db: &MongoDB,
    email: &str,
    request: SaveSchemeRequest,
) -> Result<Vec<String>, AppError> {
    let scheme_id = normalize_scheme_id(request.scheme_id.as_deref())?;
    let collection = db.collection::<User>("users");

    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let user = collection
        .find_one_and_update(
            doc! { "email": email },
            doc! { "$pull": { "savedSchemes": &scheme_id } },
        )
        .with_options(options)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    log::info!("✅ Scheme {} removed for {}", scheme_id, email);
    Ok(user.saved_schemes)
}

/// GET details - hydrates the saved ids against the Scheme Catalog, in saved
/// order. Ids that no longer resolve (scheme deleted upstream) are skipped,
/// never an error.
pub async fn saved_scheme_details(db: &MongoDB, email: &str) -> Result<Vec<Scheme>, AppError> {
    let saved_ids = list_saved_schemes(db, email).await?;

    if saved_ids.is_empty() {
        return Ok(Vec::new());
    }

    let schemes = db.collection::<Scheme>("schemes");

    let mut cursor = schemes
        .find(doc! { "_id": { "$in": &saved_ids } })
        .await
        .map_err(AppError::database)?;

    let mut by_id = HashMap::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(scheme) => {
                by_id.insert(scheme._id.clone(), scheme);
            }
            Err(e) => log::error!("❌ Error reading scheme: {}", e),
        }
    }

    // Saved order, dangling ids dropped
    let details = saved_ids
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect();

    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_is_a_missing_parameter() {
        assert!(matches!(
            normalize_scheme_id(None).unwrap_err(),
            AppError::MissingParameter(_)
        ));
    }

    #[test]
    fn blank_id_is_a_missing_parameter() {
        assert!(matches!(
            normalize_scheme_id(Some("   ")).unwrap_err(),
            AppError::MissingParameter(_)
        ));
    }

    #[test]
    fn id_is_trimmed() {
        assert_eq!(normalize_scheme_id(Some(" s1 ")).unwrap(), "s1");
    }

    #[test]
    fn request_body_uses_the_mongo_id_key() {
        let req: SaveSchemeRequest =
            serde_json::from_value(serde_json::json!({ "_id": "s1" })).unwrap();
        assert_eq!(req.scheme_id.as_deref(), Some("s1"));

        let req: SaveSchemeRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(req.scheme_id.is_none());
    }
}
