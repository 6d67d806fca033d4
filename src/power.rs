//! This module provides the main entry point for fetching NASA POWER daily
//! point data, either for a single point or as a multi-site training set.

use crate::dataset::store::{stack_tables, write_table};
use crate::error::PowerError;
use crate::types::compact_date::CompactDate;
use crate::types::site::{LatLon, Site};
use crate::weather_data::fetcher::PointFetcher;
use crate::weather_data::request::{FetchConfig, PointRequest};
use bon::bon;
use log::info;
use polars::prelude::DataFrame;
use std::path::PathBuf;

/// The client for NASA POWER daily point data.
///
/// Every fetch is a single HTTP request returning one observation table with
/// the seventeen columns listed in [`crate::OBSERVATION_COLUMNS`].
///
/// # Examples
///
/// ```rust,no_run
/// # use power_forecast::{NasaPower, LatLon, CompactDate, PowerError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), PowerError> {
/// let client = NasaPower::new()?;
/// let frame = client
///     .daily_point()
///     .location("Chattanooga")
///     .coordinate(LatLon(35.0456, -85.3097))
///     .start("20200101".parse::<CompactDate>()?)
///     .end("20200105".parse::<CompactDate>()?)
///     .call()
///     .await?;
/// assert_eq!(frame.height(), 5);
/// # Ok(())
/// # }
/// ```
pub struct NasaPower {
    fetcher: PointFetcher,
}

#[bon]
impl NasaPower {
    /// A client against the public endpoint with default settings.
    pub fn new() -> Result<Self, PowerError> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self, PowerError> {
        Ok(Self {
            fetcher: PointFetcher::new(config)?,
        })
    }

    pub fn config(&self) -> &FetchConfig {
        self.fetcher.config()
    }

    /// Fetches daily observations for one point over an inclusive date range.
    ///
    /// # Arguments
    ///
    /// * `.location(impl Into<String>)`: **Required.** Label written to every row.
    /// * `.coordinate(LatLon)`: **Required.** The point to query.
    /// * `.start(impl Into<CompactDate>)` / `.end(...)`: **Required.** Inclusive bounds, start ≤ end.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::Fetch`] when the range is inverted, the request
    /// fails, or the response cannot be reshaped into a table.
    #[builder]
    pub async fn daily_point(
        &self,
        #[builder(into)] location: String,
        coordinate: LatLon,
        #[builder(into)] start: CompactDate,
        #[builder(into)] end: CompactDate,
    ) -> Result<DataFrame, PowerError> {
        let request = PointRequest::new(location, coordinate, start, end)?;
        Ok(self.fetcher.fetch(&request).await?)
    }

    /// Fetches every site in turn and stacks the results, in site order, into
    /// one table. With `.output(path)` the table is also written to disk
    /// (Parquet or CSV by extension).
    ///
    /// Requests run one after another. The first failure aborts the whole set.
    #[builder]
    pub async fn training_set(
        &self,
        sites: &[Site],
        #[builder(into)] start: CompactDate,
        #[builder(into)] end: CompactDate,
        output: Option<PathBuf>,
    ) -> Result<DataFrame, PowerError> {
        let mut frames = Vec::with_capacity(sites.len());
        for site in sites {
            let request = PointRequest::new(site.name.clone(), site.coordinate, start, end)?;
            frames.push(self.fetcher.fetch(&request).await?);
        }
        let mut stacked = stack_tables(frames)?;
        info!(
            "Built training set of {} rows for {} sites",
            stacked.height(),
            sites.len()
        );

        if let Some(path) = output {
            write_table(&mut stacked, &path)?;
        }
        Ok(stacked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::store::read_table;
    use crate::types::schema::LOCATION;
    use crate::weather_data::error::FetchError;
    use crate::weather_data::extractor::tests::synthetic_response;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NasaPower {
        NasaPower::with_config(FetchConfig::builder().base_url(server.uri()).build()).unwrap()
    }

    #[tokio::test]
    async fn test_daily_point_accepts_naive_dates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("start", "20200101"))
            .and(query_param("end", "20200103"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(synthetic_response(&["20200101", "20200102", "20200103"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let frame = client_for(&server)
            .daily_point()
            .location("Chattanooga")
            .coordinate(LatLon(35.0456, -85.3097))
            .start(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .end(NaiveDate::from_ymd_opt(2020, 1, 3).unwrap())
            .call()
            .await
            .unwrap();
        assert_eq!(frame.height(), 3);
    }

    #[tokio::test]
    async fn test_inverted_range_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .daily_point()
            .location("x")
            .coordinate(LatLon(0.0, 0.0))
            .start(CompactDate::from_ymd(2020, 2, 1).unwrap())
            .end(CompactDate::from_ymd(2020, 1, 1).unwrap())
            .call()
            .await;
        assert!(matches!(
            result,
            Err(PowerError::Fetch(FetchError::InvalidDateRange { .. }))
        ));
    }

    #[tokio::test]
    async fn test_training_set_stacks_sites_and_writes_parquet() {
        let server = MockServer::start().await;
        let dates = ["20210301", "20210302"];
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(synthetic_response(&dates)))
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("weather_train.parquet");
        let sites = [
            Site::new("Chattanooga", LatLon(35.0456, -85.3097)),
            Site::new("Denver", LatLon(39.7392, -104.9903)),
        ];

        let frame = client_for(&server)
            .training_set()
            .sites(&sites)
            .start(CompactDate::from_ymd(2021, 3, 1).unwrap())
            .end(CompactDate::from_ymd(2021, 3, 2).unwrap())
            .output(path.clone())
            .call()
            .await
            .unwrap();

        assert_eq!(frame.shape(), (4, 17));
        let locations: Vec<Option<&str>> = frame
            .column(LOCATION)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            locations,
            vec![Some("Chattanooga"), Some("Chattanooga"), Some("Denver"), Some("Denver")]
        );
        assert!(read_table(&path).unwrap().equals(&frame));
    }

    #[tokio::test]
    async fn test_training_set_without_sites_keeps_schema() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather_train.parquet");
        let frame = client_for(&server)
            .training_set()
            .sites(&[])
            .start(CompactDate::from_ymd(2021, 3, 1).unwrap())
            .end(CompactDate::from_ymd(2021, 3, 2).unwrap())
            .output(path.clone())
            .call()
            .await
            .unwrap();

        assert_eq!(frame.shape(), (0, 17));
        assert_eq!(read_table(&path).unwrap().width(), 17);
    }

    #[tokio::test]
    async fn test_training_set_aborts_on_first_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let sites = [
            Site::new("A", LatLon(1.0, 1.0)),
            Site::new("B", LatLon(2.0, 2.0)),
        ];
        let result = client_for(&server)
            .training_set()
            .sites(&sites)
            .start(CompactDate::from_ymd(2021, 3, 1).unwrap())
            .end(CompactDate::from_ymd(2021, 3, 2).unwrap())
            .call()
            .await;
        assert!(matches!(
            result,
            Err(PowerError::Fetch(FetchError::HttpStatus { .. }))
        ));
    }
}
