pub mod booking;
pub mod route;
pub mod station;
