use serde::{Deserialize, Serialize};

use super::repo_types::Category;

/// Raw `GET /services` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceQuery {
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

/// Catalog filter after boundary normalization; `None` means "don't filter".
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ServiceFilter {
    pub category: Option<Category>,
    pub location: Option<String>,
    pub search: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<ServiceQuery> for ServiceFilter {
    fn from(q: ServiceQuery) -> Self {
        // "all" and unknown names both mean no category filter
        let category = non_blank(q.category).and_then(|c| c.parse::<Category>().ok());

        let location = non_blank(q.location).filter(|l| {
            let l = l.to_lowercase();
            l != "all" && l != "all locations"
        });

        Self {
            category,
            location,
            search: non_blank(q.search),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct ChatLinkResponse {
    pub whatsapp_link: String,
}
