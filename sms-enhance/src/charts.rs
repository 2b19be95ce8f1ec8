//! Dashboard doughnut charts, as Chart.js configuration.

use std::str::FromStr;

use palette::{IntoColor, Oklch, Srgb};
use pagedom::Dom;
use serde::Serialize;

use crate::error::Error;

/// Canvas of the students-per-department chart.
pub const DEPARTMENT_CHART: &str = "departmentChart";

/// Canvas of the students-per-year chart.
pub const YEAR_CHART: &str = "yearChart";

/// How much darker a slice gets on hover, in OKLCH lightness.
const HOVER_DARKEN: f32 = 0.08;

/// A Chart.js chart configuration (`new Chart(canvas, config)`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<u32>,
    pub background_color: Vec<String>,
    pub hover_background_color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                legend: Legend {
                    position: LegendPosition::Bottom,
                },
            },
        }
    }
}

impl ChartConfig {
    /// A doughnut chart of `slices` (label, value, `#rrggbb` colour).
    pub fn doughnut(slices: &[(&str, u32, &str)]) -> Result<Self, Error> {
        let mut labels = Vec::with_capacity(slices.len());
        let mut data = Vec::with_capacity(slices.len());
        let mut background = Vec::with_capacity(slices.len());
        let mut hover = Vec::with_capacity(slices.len());

        for (label, value, color) in slices {
            let rgb = parse_hex(color)?;
            labels.push(label.to_string());
            data.push(*value);
            background.push(to_hex(rgb));
            hover.push(to_hex(darken(rgb, HOVER_DARKEN)));
        }

        Ok(Self {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    data,
                    background_color: background,
                    hover_background_color: hover,
                }],
            },
            options: ChartOptions::default(),
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Students per department.
pub fn department_chart() -> Result<ChartConfig, Error> {
    ChartConfig::doughnut(&[
        ("Computer Science", 30, "#4e73df"),
        ("Information Technology", 25, "#1cc88a"),
        ("Electrical Engineering", 20, "#36b9cc"),
    ])
}

/// Students per year of study.
pub fn year_chart() -> Result<ChartConfig, Error> {
    ChartConfig::doughnut(&[
        ("First Year", 35, "#1cc88a"),
        ("Second Year", 30, "#36b9cc"),
        ("Third Year", 25, "#f6c23e"),
        ("Fourth Year", 10, "#e74a3b"),
    ])
}

/// Build the configuration of every chart whose canvas is on the page,
/// keyed by canvas ID.
pub fn bootstrap_charts(dom: &Dom) -> Result<Vec<(String, ChartConfig)>, Error> {
    let builders: [(&str, fn() -> Result<ChartConfig, Error>); 2] =
        [(DEPARTMENT_CHART, department_chart), (YEAR_CHART, year_chart)];

    let mut charts = Vec::new();
    for (canvas, build) in builders {
        if dom.read(|doc| doc.contains(canvas)) {
            charts.push((canvas.to_string(), build()?));
        } else {
            log::debug!("[charts] no #{canvas} on this page");
        }
    }
    Ok(charts)
}

fn parse_hex(color: &str) -> Result<Srgb<u8>, Error> {
    Srgb::<u8>::from_str(color).map_err(|_| Error::InvalidColor(color.to_string()))
}

fn to_hex(color: Srgb<u8>) -> String {
    format!("#{color:x}")
}

fn darken(color: Srgb<u8>, amount: f32) -> Srgb<u8> {
    let mut oklch: Oklch = color.into_format::<f32>().into_color();
    oklch.l = (oklch.l - amount).max(0.0);
    let srgb: Srgb = oklch.into_color();
    srgb.into_format::<u8>()
}
