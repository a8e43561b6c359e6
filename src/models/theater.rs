use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theater {
    pub id: u64,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub screens: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTheater {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: u32,
    #[validate(range(min = 1, message = "screens must be positive"))]
    pub screens: u32,
}

impl Record for Theater {
    type Draft = NewTheater;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: NewTheater) -> Self {
        Theater {
            id,
            name: draft.name.trim().to_string(),
            location: draft.location.trim().to_string(),
            capacity: draft.capacity,
            screens: draft.screens,
        }
    }
}
