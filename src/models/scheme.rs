use serde::{Deserialize, Serialize};

/// Scheme document in the `schemes` collection. Keyed by an opaque string
/// `_id` and maintained by an external data pipeline; this service only
/// reads it.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Scheme {
    #[serde(rename = "_id")]
    pub _id: String,
    #[serde(rename = "schemeName", skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<String>,
    #[serde(rename = "schemeShortTitle", skip_serializing_if = "Option::is_none")]
    pub scheme_short_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    #[serde(
        rename = "detailedDescription_md",
        skip_serializing_if = "Option::is_none"
    )]
    pub detailed_description_md: Option<String>,
    #[serde(rename = "openDate", skip_serializing_if = "Option::is_none")]
    pub open_date: Option<String>,
    #[serde(rename = "closeDate", skip_serializing_if = "Option::is_none")]
    pub close_date: Option<String>,
    #[serde(rename = "nodalMinistryName", skip_serializing_if = "Option::is_none")]
    pub nodal_ministry_name: Option<String>,
}
