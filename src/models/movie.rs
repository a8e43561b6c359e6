use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: f32,
    pub duration: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub language: String,
}

impl Movie {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre.iter().any(|g| g == genre)
    }
}

/// Admin "add movie" form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMovie {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(range(min = 1, message = "duration must be a positive number of minutes"))]
    pub duration_minutes: u32,
    pub description: Option<String>,
    /// Comma separated, e.g. "Action, Adventure".
    #[validate(length(min = 1, message = "genre is required"))]
    pub genre: String,
    #[serde(default)]
    pub rating: f32,
    #[validate(length(min = 1, message = "language is required"))]
    pub language: String,
    pub poster: Option<String>,
}

impl Record for Movie {
    type Draft = NewMovie;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: NewMovie) -> Self {
        Movie {
            id,
            title: draft.title.trim().to_string(),
            poster: draft.poster,
            description: draft.description,
            rating: draft.rating,
            duration: format_duration(draft.duration_minutes),
            genre: draft
                .genre
                .split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect(),
            language: draft.language.trim().to_string(),
        }
    }
}

/// 181 -> "3h 1m"
pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

// Catalog backends send ids either as "1" or as 1.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
