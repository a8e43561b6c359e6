use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showtime {
    pub id: u64,
    pub movie: String,
    pub theater: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub screen: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewShowtime {
    #[validate(length(min = 1, message = "movie is required"))]
    pub movie: String,
    #[validate(length(min = 1, message = "theater is required"))]
    pub theater: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    #[validate(range(min = 1, message = "screen number is required"))]
    pub screen: u32,
}

impl Record for Showtime {
    type Draft = NewShowtime;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: NewShowtime) -> Self {
        Showtime {
            id,
            movie: draft.movie,
            theater: draft.theater,
            date: draft.date,
            time: draft.time,
            screen: draft.screen,
        }
    }
}

// Time inputs post "19:30".
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
