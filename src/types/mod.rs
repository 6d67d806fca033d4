pub mod compact_date;
pub mod parameter;
pub mod schema;
pub mod site;
