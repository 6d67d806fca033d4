//! demos/forecast_location.rs
//!
//! Fits a yearly-seasonal model to one city's daily maximum temperature and
//! writes a two-year forecast band chart next to the data.
//!
//! Run `fetch_training_set` first, then:
//! cargo run --example forecast_location -- Chattanooga

use power_forecast::{forecast_location, ChartTarget, ForecastConfig};
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let city = std::env::args().nth(1).unwrap_or_else(|| "Chattanooga".to_string());
    let chart = PathBuf::from("data").join(format!("forecast_{}.html", city.to_lowercase()));

    let result = forecast_location()
        .location(&city)
        .config(ForecastConfig::default())
        .chart(ChartTarget::Html(chart.clone()))
        .call()?;

    let table = result.forecast.to_frame()?;
    println!("Loaded {} rows for {}", result.history.len(), city);
    println!("{}", table.tail(Some(5)));
    println!("Chart written to {:?}", chart);
    Ok(())
}
