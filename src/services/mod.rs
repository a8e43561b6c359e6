pub mod catalog;
pub mod receipt;
pub mod seat_map;
pub mod sessions;
