use crate::{database::MongoDB, models::User, utils::AppError};
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};

/// Explicit profile patch: every updatable field is enumerated, unknown keys
/// are rejected at deserialization. `email`, `password` and `savedSchemes`
/// are deliberately absent - they cannot be changed through this path.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProfilePatch {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    #[serde(rename = "incomeRange")]
    pub income_range: Option<String>,
    #[serde(rename = "educationLevel")]
    pub education_level: Option<String>,
    #[serde(rename = "employmentStatus")]
    pub employment_status: Option<String>,
    pub occupation: Option<String>,
    #[serde(rename = "familySize")]
    pub family_size: Option<String>,
    pub category: Option<String>,
    pub disability: Option<String>,
    #[serde(rename = "disabilityDetails")]
    pub disability_details: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub message: String,
}

/// Builds the `$set` document from a patch: only fields that are present are
/// merged (partial update, never replace), and `updatedAt` is stamped on
/// every write.
fn build_update_doc(patch: &ProfilePatch) -> Document {
    let mut update = Document::new();

    let fields: [(&str, &Option<String>); 16] = [
        ("Name", &patch.name),
        ("phoneNumber", &patch.phone_number),
        ("dateOfBirth", &patch.date_of_birth),
        ("gender", &patch.gender),
        ("address", &patch.address),
        ("city", &patch.city),
        ("state", &patch.state),
        ("pincode", &patch.pincode),
        ("incomeRange", &patch.income_range),
        ("educationLevel", &patch.education_level),
        ("employmentStatus", &patch.employment_status),
        ("occupation", &patch.occupation),
        ("familySize", &patch.family_size),
        ("category", &patch.category),
        ("disability", &patch.disability),
        ("disabilityDetails", &patch.disability_details),
    ];

    for (key, value) in fields {
        if let Some(value) = value {
            update.insert(key, value.clone());
        }
    }

    update.insert("updatedAt", BsonDateTime::now());
    update
}

/// GET profile - fetch the user by email and strip the credential before it
/// can reach any response.
pub async fn get_profile(db: &MongoDB, email: &str) -> Result<User, AppError> {
    let collection = db.collection::<User>("users");

    let mut user = collection
        .find_one(doc! { "email": email })
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    user.password = None;
    Ok(user)
}

/// POST profile - merge the patch into the stored document. Single atomic
/// `$set`; a zero matched count means the user does not exist.
pub async fn update_profile(
    db: &MongoDB,
    email: &str,
    patch: &ProfilePatch,
) -> Result<UpdateProfileResponse, AppError> {
    let collection = db.collection::<User>("users");

    let update = build_update_doc(patch);

    let result = collection
        .update_one(doc! { "email": email }, doc! { "$set": update })
        .await
        .map_err(AppError::database)?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(UpdateProfileResponse {
        success: true,
        message: "Profile updated successfully".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_doc_contains_only_present_fields_plus_timestamp() {
        let patch = ProfilePatch {
            name: Some("A".to_string()),
            city: Some("Pune".to_string()),
            ..Default::default()
        };

        let update = build_update_doc(&patch);

        assert_eq!(update.get_str("Name").unwrap(), "A");
        assert_eq!(update.get_str("city").unwrap(), "Pune");
        assert!(update.get("phoneNumber").is_none());
        assert!(update.get_datetime("updatedAt").is_ok());
        assert_eq!(update.len(), 3);
    }

    #[test]
    fn empty_patch_still_stamps_updated_at() {
        let update = build_update_doc(&ProfilePatch::default());
        assert_eq!(update.len(), 1);
        assert!(update.get_datetime("updatedAt").is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = serde_json::from_value::<ProfilePatch>(serde_json::json!({
            "city": "Pune",
            "email": "evil@x.com"
        }));
        assert!(err.is_err());

        let err = serde_json::from_value::<ProfilePatch>(serde_json::json!({
            "password": "pwned"
        }));
        assert!(err.is_err());

        let err = serde_json::from_value::<ProfilePatch>(serde_json::json!({
            "savedSchemes": ["s1"]
        }));
        assert!(err.is_err());
    }

    #[test]
    fn null_fields_are_treated_as_omitted() {
        let patch: ProfilePatch = serde_json::from_value(serde_json::json!({
            "city": "Pune",
            "gender": null
        }))
        .unwrap();
        let update = build_update_doc(&patch);
        assert!(update.get("gender").is_none());
        assert_eq!(update.get_str("city").unwrap(), "Pune");
    }
}
