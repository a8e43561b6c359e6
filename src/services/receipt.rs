use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::models::schema::{BookingStatus, PaymentStatus};
use crate::services::sessions::SeatSession;

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub reference: String,
    pub issued_at: DateTime<Utc>,
    pub movie_title: String,
    pub language: String,
    pub theater: String,
    pub screen: String,
    pub show_date: String,
    pub show_time: String,
    pub seats: Vec<String>,
    pub total_price: u32,
    pub booking_status: BookingStatus,
    /// No payment is taken, so this stays pending.
    pub payment_status: PaymentStatus,
}

impl Receipt {
    pub fn from_session(session: &SeatSession, issued_at: DateTime<Utc>) -> Self {
        let summary = session.seat_map.summary();
        let showing = &session.showing;
        let short_id = session.id.simple().to_string();

        Receipt {
            reference: format!("CB-{}", short_id[..8].to_uppercase()),
            issued_at,
            movie_title: showing.movie_title.clone(),
            language: showing.language.clone(),
            theater: showing.theater.clone(),
            screen: showing.screen.clone(),
            show_date: showing.show_date.clone(),
            show_time: showing.show_time.clone(),
            seats: summary.seats,
            total_price: summary.total_price,
            booking_status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
        }
    }

    /// Printable receipt document.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    pub fn file_name(&self) -> String {
        let title: String = self
            .movie_title
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("BookingReceipt_{}.txt", title)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Booking Receipt")?;
        writeln!(f, "Reference: {}", self.reference)?;
        writeln!(f)?;
        writeln!(f, "Movie: {}", self.movie_title)?;
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Theater: {}", self.theater)?;
        writeln!(f, "Screen: {}", self.screen)?;
        writeln!(f, "Date: {}", self.show_date)?;
        writeln!(f, "Time: {}", self.show_time)?;
        writeln!(f, "Seats: {}", self.seats.join(", "))?;
        writeln!(f, "Total Amount: ₹{}", self.total_price)?;
        writeln!(f, "Booking Status: {}", self.booking_status)?;
        writeln!(f, "Payment Status: {}", self.payment_status)?;
        writeln!(f)?;
        writeln!(f, "Thank you for booking with us!")
    }
}
