//! Insights engine: HTTP client for the pricing-insights service and the
//! background runtime that executes submit/poll commands.
mod api;
mod engine;
mod types;
mod wire;

pub use api::{ApiSettings, InsightsApi, ReqwestInsightsApi, DEFAULT_BASE_URL, INSIGHTS_PATH};
pub use engine::{EngineEvents, EngineHandle, EngineStartError};
pub use types::{ApiError, EngineEvent, FailureKind, JobStatus, JobTicket, RequestId};
pub use wire::{
    decode_insights, CellLabel, GridCoordinates, GridPoint, InsightRecord, InsightsPayload,
    StatusResponse, SubmitRequest, SubmitResponse, FINISHED_STATUS,
};
