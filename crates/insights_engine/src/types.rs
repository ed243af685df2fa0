use std::fmt;

use thiserror::Error;

use crate::InsightRecord;

/// Client-side identifier of one submission, echoed back in every event.
pub type RequestId = u64;

/// Server-assigned identifier of an analysis job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobTicket {
    pub uuid: String,
}

impl JobTicket {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }
}

impl fmt::Display for JobTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uuid)
    }
}

/// What a status poll observed.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    /// Any status other than finished, kept verbatim.
    Pending { status: String },
    Finished { insights: Vec<InsightRecord> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Submitted {
        request_id: RequestId,
        ticket: JobTicket,
    },
    Polled {
        request_id: RequestId,
        ticket: JobTicket,
        status: JobStatus,
    },
    Failed {
        request_id: RequestId,
        error: ApiError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidBaseUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The response body was not the JSON shape the endpoint returns.
    MalformedResponse,
    /// A finished job carried no `insights_json`.
    MissingInsights,
    /// `insights_json` did not decode into an insights payload.
    MalformedInsights,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::MissingInsights => write!(f, "finished job without insights"),
            FailureKind::MalformedInsights => write!(f, "malformed insights"),
        }
    }
}
