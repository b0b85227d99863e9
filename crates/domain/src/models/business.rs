//! Business-matching partner listings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessListing {
    pub id: i64,
    pub slug: Option<String>,
    pub name: String,
    pub sector: String,
    pub location: String,
    pub budget: String,
    pub match_score: f32,
    #[serde(default)]
    pub special_features: Vec<String>,
    pub logo_url: Option<String>,
}

impl BusinessListing {
    /// Key used in routes and session storage: slug, else id.
    pub fn route_key(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => self.id.to_string(),
        }
    }
}
