pub mod error;
pub mod filtering;
pub mod store;
