use serde::{Deserialize, Serialize};

/// Row letters of the auditorium, front to back.
pub const ROWS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];

/// Seats per row, numbered from 1.
pub const SEATS_PER_ROW: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Selected,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub row: char,
    pub number: u8,
    pub status: SeatStatus,
    pub price: u32,
}

impl Seat {
    pub fn new(row_index: usize, number: u8, status: SeatStatus) -> Self {
        let row = ROWS[row_index];
        Self {
            id: format!("{}{}", row, number),
            row,
            number,
            status,
            price: price_for_row(row_index),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.status == SeatStatus::Selected
    }
}

/// Ticket price by row index: the first three rows are the top tier, the
/// next four the middle one, the rest the cheapest.
pub fn price_for_row(row_index: usize) -> u32 {
    match row_index {
        0..=2 => 200,
        3..=6 => 150,
        _ => 100,
    }
}
