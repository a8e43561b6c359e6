pub mod booking;
pub mod movie;
pub mod schema;
pub mod seat;
pub mod showtime;
pub mod theater;

pub use booking::{BookingRecord, NewBooking};
pub use movie::{Movie, NewMovie};
pub use seat::{Seat, SeatStatus};
pub use showtime::{NewShowtime, Showtime};
pub use theater::{NewTheater, Theater};
