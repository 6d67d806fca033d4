pub mod config;
pub mod error;
pub mod model;
pub mod series;
pub mod table;
