use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One nutrient reading. Concentrations are in ppm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub po4: Option<f64>,
    #[serde(default)]
    pub no3: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub entries: Vec<Entry>,
}

/// Create/update payload, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryInput {
    pub date: String,
    #[serde(default)]
    pub po4: Option<f64>,
    #[serde(default)]
    pub no3: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

/// HTML forms post every field as text; blank means absent.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryForm {
    pub date: String,
    #[serde(default)]
    pub po4: String,
    #[serde(default)]
    pub no3: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Po4,
    No3,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Po4, Metric::No3];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Po4 => "PO4",
            Metric::No3 => "NO3",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Metric::Po4 => "po4",
            Metric::No3 => "no3",
        }
    }

    pub fn unit(self) -> &'static str {
        "ppm"
    }

    pub fn value_of(self, entry: &Entry) -> Option<f64> {
        match self {
            Metric::Po4 => entry.po4,
            Metric::No3 => entry.no3,
        }
    }

    pub fn parse(value: &str) -> Option<Metric> {
        match value.trim().to_ascii_lowercase().as_str() {
            "po4" => Some(Metric::Po4),
            "no3" => Some(Metric::No3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Targets {
    pub po4: TargetRange,
    pub no3: TargetRange,
}

impl Targets {
    pub fn for_metric(&self, metric: Metric) -> TargetRange {
        match metric {
            Metric::Po4 => self.po4,
            Metric::No3 => self.no3,
        }
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            po4: TargetRange { min: 0.03, max: 0.10 },
            no3: TargetRange { min: 2.0, max: 15.0 },
        }
    }
}

/// Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DerivedSummary {
    pub latest: Option<Entry>,
    pub previous: Option<Entry>,
    pub delta_po4: Option<f64>,
    pub delta_no3: Option<f64>,
    pub current_ratio: Option<f64>,
    pub average_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Position in the full ascending entry list, so gaps survive.
    pub index: usize,
    pub value: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub index: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetBand {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartProjection {
    pub y_min: f64,
    pub y_max: f64,
    pub points: Vec<ProjectedPoint>,
    pub band: Option<TargetBand>,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub metric: Metric,
    pub unit: &'static str,
    pub target: TargetRange,
    pub series: ChartSeries,
    pub projection: ChartProjection,
    pub grid: [f64; 5],
    pub label_stride: usize,
}
