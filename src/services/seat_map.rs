//! Seat map of a single showing: generation, selection toggling and the
//! derived selection summary.

use rand::Rng;
use serde::Serialize;

use crate::models::seat::{price_for_row, Seat, SeatStatus, ROWS, SEATS_PER_ROW};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatMapError {
    #[error("seat {0} does not exist")]
    UnknownSeat(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatMap {
    seats: Vec<Seat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub seats: Vec<String>,
    pub count: usize,
    pub total_price: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatRow<'a> {
    pub row: char,
    pub price: u32,
    pub seats: &'a [Seat],
}

impl SeatMap {
    /// Lays out every row front to back; each seat starts booked with
    /// probability `booked_probability`, otherwise available.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, booked_probability: f64) -> Self {
        let p = booked_probability.clamp(0.0, 1.0);
        let mut seats = Vec::with_capacity(ROWS.len() * SEATS_PER_ROW as usize);

        for row_index in 0..ROWS.len() {
            for number in 1..=SEATS_PER_ROW {
                let status = if rng.random_bool(p) {
                    SeatStatus::Booked
                } else {
                    SeatStatus::Available
                };
                seats.push(Seat::new(row_index, number, status));
            }
        }

        Self { seats }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn get(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    /// Flips an available seat to selected and back. Booked seats are left
    /// as they are.
    pub fn toggle(&mut self, seat_id: &str) -> Result<SeatStatus, SeatMapError> {
        let seat = self
            .seats
            .iter_mut()
            .find(|s| s.id == seat_id)
            .ok_or_else(|| SeatMapError::UnknownSeat(seat_id.to_string()))?;

        seat.status = match seat.status {
            SeatStatus::Booked => SeatStatus::Booked,
            SeatStatus::Available => SeatStatus::Selected,
            SeatStatus::Selected => SeatStatus::Available,
        };

        Ok(seat.status)
    }

    pub fn selected(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| s.is_selected())
    }

    pub fn total_price(&self) -> u32 {
        self.selected().map(|s| s.price).sum()
    }

    pub fn count(&self, status: SeatStatus) -> usize {
        self.seats.iter().filter(|s| s.status == status).count()
    }

    pub fn summary(&self) -> SelectionSummary {
        let seats: Vec<String> = self.selected().map(|s| s.id.clone()).collect();
        SelectionSummary {
            count: seats.len(),
            seats,
            total_price: self.total_price(),
        }
    }

    /// Seats grouped per row, each with the row's price tier.
    pub fn rows(&self) -> Vec<SeatRow<'_>> {
        self.seats
            .chunk_by(|a, b| a.row == b.row)
            .map(|chunk| {
                let row = chunk[0].row;
                let index = ROWS.iter().position(|r| *r == row).unwrap_or(ROWS.len() - 1);
                SeatRow {
                    row,
                    price: price_for_row(index),
                    seats: chunk,
                }
            })
            .collect()
    }
}
