use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use power_forecast::{observation_frame_from_slice, CompactDate, LatLon, PointRequest, PowerParameter};
use serde_json::{json, Map, Value};

/// A ten-year daily response with every parameter populated.
fn decade_response() -> (Vec<u8>, PointRequest) {
    let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
    let keys: Vec<String> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| d.format("%Y%m%d").to_string())
        .collect();

    let mut parameters = Map::new();
    for (p, parameter) in PowerParameter::ALL.iter().enumerate() {
        let values: Map<String, Value> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), json!(p as f64 + (i % 365) as f64 * 0.1)))
            .collect();
        parameters.insert(parameter.code().to_string(), Value::Object(values));
    }
    let body = json!({
        "header": { "fill_value": -999.0 },
        "properties": { "parameter": parameters }
    });

    let request = PointRequest::new(
        "Chattanooga",
        LatLon(35.0456, -85.3097),
        CompactDate::new(start),
        CompactDate::new(end),
    )
    .unwrap();
    (serde_json::to_vec(&body).unwrap(), request)
}

fn bench_observation_frame(c: &mut Criterion) {
    let (body, request) = decade_response();
    c.bench_function("observation_frame_from_slice", |b| {
        b.iter(|| observation_frame_from_slice(black_box(&body), black_box(&request), false))
    });
    c.bench_function("observation_frame_from_slice_masked", |b| {
        b.iter(|| observation_frame_from_slice(black_box(&body), black_box(&request), true))
    });
}

criterion_group!(benches, bench_observation_frame);
criterion_main!(benches);
