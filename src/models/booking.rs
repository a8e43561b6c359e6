use serde::{Deserialize, Serialize};

use crate::storage::Record;

/// Row of the admin bookings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: u64,
    pub user: String,
    pub movie: String,
    pub theater: String,
    pub seats: u32,
    pub amount: u32,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user: String,
    pub movie: String,
    pub theater: String,
    pub seats: u32,
    pub amount: u32,
}

impl Record for BookingRecord {
    type Draft = NewBooking;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: NewBooking) -> Self {
        BookingRecord {
            id,
            user: draft.user,
            movie: draft.movie,
            theater: draft.theater,
            seats: draft.seats,
            amount: draft.amount,
        }
    }
}
