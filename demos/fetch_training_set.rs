//! demos/fetch_training_set.rs
//!
//! Fetches several years of daily NASA POWER data for a few cities and writes
//! them to `data/weather_train.parquet`, the table `forecast_location` reads.
//!
//! To run this example:
//! cargo run --example fetch_training_set

use power_forecast::{default_train_path, CompactDate, LatLon, NasaPower, Site};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let sites = [
        Site::new("Chattanooga", LatLon(35.0456, -85.3097)),
        Site::new("Denver", LatLon(39.7392, -104.9903)),
        Site::new("Seattle", LatLon(47.6062, -122.3321)),
    ];

    let client = NasaPower::new()?;
    let frame = client
        .training_set()
        .sites(&sites)
        .start("20150101".parse::<CompactDate>()?)
        .end("20231231".parse::<CompactDate>()?)
        .output(default_train_path())
        .call()
        .await?;

    println!("{}", frame.head(Some(5)));
    println!("Wrote {} rows to {:?}", frame.height(), default_train_path());
    Ok(())
}
