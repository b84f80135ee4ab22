pub mod geo;
pub mod query;
