//! Fixed queries behind the curated storefront selections.

/// Queries used by the hero-phone and accessory selections.
///
/// # Defaults
///
/// - `hero_query`: `"iPhone"`
/// - `hero_search_limit`: 30
/// - `hero_fallback_category`: `"smartphones"`
/// - `accessory_queries`: `"case"`, `"charger"`, `"headphone"` (run in order)
/// - `accessory_search_limit`: 20
/// - `phone_category`: `"smartphones"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CuratedQueries {
    /// Free-text query used to find the hero phone.
    pub hero_query: String,
    /// Page size for the hero search and its category fallback.
    pub hero_search_limit: u32,
    /// Category scanned when the hero search yields no phone.
    pub hero_fallback_category: String,
    /// Accessory searches, run strictly one after another.
    pub accessory_queries: Vec<String>,
    /// Page size for each accessory search.
    pub accessory_search_limit: u32,
    /// Category that anchors the full catalog browse.
    pub phone_category: String,
}

impl Default for CuratedQueries {
    fn default() -> Self {
        Self {
            hero_query: "iPhone".to_string(),
            hero_search_limit: 30,
            hero_fallback_category: "smartphones".to_string(),
            accessory_queries: vec![
                "case".to_string(),
                "charger".to_string(),
                "headphone".to_string(),
            ],
            accessory_search_limit: 20,
            phone_category: "smartphones".to_string(),
        }
    }
}
