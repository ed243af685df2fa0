//! JSON shapes exchanged with the pricing-insights service.
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{ApiError, FailureKind, JobStatus};

/// Status string the service reports once insights are available.
pub const FINISHED_STATUS: &str = "FINISHED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitRequest<'a> {
    pub pricing_page_url: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    pub request_uuid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    /// A JSON document serialized into a string; decoded by [`decode_insights`].
    #[serde(default)]
    pub insights_json: Option<String>,
}

impl StatusResponse {
    /// Interpret the poll response. Only a finished job has its insights decoded.
    pub fn into_status(self) -> Result<JobStatus, ApiError> {
        if self.status != FINISHED_STATUS {
            return Ok(JobStatus::Pending {
                status: self.status,
            });
        }
        match self.insights_json.as_deref().map(str::trim) {
            None | Some("") | Some("null") => Err(ApiError::new(
                FailureKind::MissingInsights,
                "job finished without insights_json",
            )),
            Some(raw) => Ok(JobStatus::Finished {
                insights: decode_insights(raw)?,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsPayload {
    pub insights: Vec<InsightRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub impact_score: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "deserialize_sequence_number")]
    pub sequence_number: u32,
    pub grid_coordinates: GridCoordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCoordinates {
    pub from: GridPoint,
    pub to: GridPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub column: CellLabel,
    pub row: CellLabel,
}

/// Columns arrive as letters and rows as numbers, but the service is not
/// consistent about either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellLabel {
    Number(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellLabel::Number(n) => write!(f, "{n}"),
            // `3.0` reads as row 3.
            CellLabel::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{}", *x as i64),
            CellLabel::Float(x) => write!(f, "{x}"),
            CellLabel::Text(s) => f.write_str(s),
        }
    }
}

/// Sequence numbers arrive as integers, integral floats or numeric strings.
fn deserialize_sequence_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|x| x.is_finite() && *x >= 0.0 && x.fract() == 0.0)
                .map(|x| x as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| D::Error::custom(format!("invalid sequence_number {value}")))
}

/// Second-stage parse of the `insights_json` string.
pub fn decode_insights(raw: &str) -> Result<Vec<InsightRecord>, ApiError> {
    serde_json::from_str::<InsightsPayload>(raw)
        .map(|payload| payload.insights)
        .map_err(|err| ApiError::new(FailureKind::MalformedInsights, err.to_string()))
}
