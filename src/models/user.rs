use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// User document in the `users` collection. `email` is the primary key used
/// by every handler; field names match the stored documents (the profile form
/// historically wrote `Name` with a capital N, so that spelling is kept).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub email: String,
    /// bcrypt hash. Must be stripped (set to None) before the document is
    /// returned to any client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    // Profile fields (all optional; partial-update semantics)
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "phoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(rename = "dateOfBirth", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(rename = "incomeRange", skip_serializing_if = "Option::is_none")]
    pub income_range: Option<String>,
    #[serde(rename = "educationLevel", skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(rename = "employmentStatus", skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(rename = "familySize", skip_serializing_if = "Option::is_none")]
    pub family_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability: Option<String>,
    #[serde(rename = "disabilityDetails", skip_serializing_if = "Option::is_none")]
    pub disability_details: Option<String>,

    /// Bookmarked scheme ids, insertion order. Unset on old documents, so it
    /// defaults to empty on read.
    #[serde(rename = "savedSchemes", default)]
    pub saved_schemes: Vec<String>,

    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<BsonDateTime>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<BsonDateTime>,
    #[serde(rename = "lastLogin", skip_serializing_if = "Option::is_none")]
    pub last_login: Option<BsonDateTime>,
}
