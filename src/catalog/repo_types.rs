use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;

/// Closed set of bookable service categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Venues,
    Catering,
    Decoration,
    Photography,
    Makeup,
    Dj,
    Transport,
    Gifts,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Venues,
        Category::Catering,
        Category::Decoration,
        Category::Photography,
        Category::Makeup,
        Category::Dj,
        Category::Transport,
        Category::Gifts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Venues => "venues",
            Category::Catering => "catering",
            Category::Decoration => "decoration",
            Category::Photography => "photography",
            Category::Makeup => "makeup",
            Category::Dj => "dj",
            Category::Transport => "transport",
            Category::Gifts => "gifts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown service category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive; surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A bookable service as returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub price_range: String,
    pub location: String,
    pub rating: f64,
    pub image_url: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub availability: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Raw `services` row; `category` is text in the table.
#[derive(Debug, FromRow)]
pub struct ServiceRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price_range: String,
    pub location: String,
    pub rating: f64,
    pub image_url: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub availability: bool,
    pub created_at: OffsetDateTime,
}

impl TryFrom<ServiceRow> for Service {
    type Error = UnknownCategory;

    fn try_from(r: ServiceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            category: r.category.parse()?,
            id: r.id,
            name: r.name,
            description: r.description,
            price_range: r.price_range,
            location: r.location,
            rating: r.rating,
            image_url: r.image_url,
            contact_phone: r.contact_phone,
            contact_email: r.contact_email,
            availability: r.availability,
            created_at: r.created_at,
        })
    }
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection was not empty; nothing was written.
    AlreadySeeded { existing: u64 },
    Inserted { count: u64 },
}
