//! Filled-band forecast charts.

use crate::forecast::table::{ForecastTable, YHAT, YHAT_LOWER, YHAT_UPPER};
use log::info;
use plotly::color::{Rgb, Rgba};
use plotly::common::{Fill, Line, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to write chart to '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Where a rendered chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartTarget {
    /// A standalone HTML file.
    Html(PathBuf),
    /// The default browser.
    Browser,
}

/// Shaded band between the bounds with the central estimate drawn on top,
/// across the whole extended date range.
pub fn band_chart(table: &ForecastTable, title: &str) -> Plot {
    let dates: Vec<String> = table
        .ds()
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    // Plotly fills "tonexty" against the previous trace, so lower goes first.
    let lower = Scatter::new(dates.clone(), table.yhat_lower().to_vec())
        .name(YHAT_LOWER)
        .mode(Mode::Lines)
        .line(Line::new().width(0.0))
        .show_legend(false);
    let upper = Scatter::new(dates.clone(), table.yhat_upper().to_vec())
        .name(YHAT_UPPER)
        .mode(Mode::Lines)
        .line(Line::new().width(0.0))
        .fill(Fill::ToNextY)
        .fill_color(Rgba::new(69, 157, 230, 0.3));
    let central = Scatter::new(dates, table.yhat().to_vec())
        .name(YHAT)
        .mode(Mode::Lines)
        .line(Line::new().color(Rgb::new(235, 117, 0)).width(1.5));

    let mut plot = Plot::new();
    plot.add_trace(lower);
    plot.add_trace(upper);
    plot.add_trace(central);
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(title))
            .x_axis(Axis::new().title(Title::with_text("date")))
            .y_axis(Axis::new().title(Title::with_text(YHAT))),
    );
    plot
}

pub fn render(table: &ForecastTable, title: &str, target: &ChartTarget) -> Result<(), ChartError> {
    let plot = band_chart(table, title);
    match target {
        ChartTarget::Html(path) => {
            crate::utils::ensure_parent_dir_exists(path)
                .and_then(|_| std::fs::write(path, plot.to_html()))
                .map_err(|e| ChartError::Write(path.clone(), e))?;
            info!("Wrote forecast chart to {:?}", path);
        }
        ChartTarget::Browser => {
            plot.show();
            info!("Opened forecast chart in browser");
        }
    }
    Ok(())
}
