use std::time::Duration;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start an analysis job for `url`.
    SubmitUrl { request_id: RequestId, url: String },
    /// Ask the service for the status of `job` once `delay` has elapsed.
    PollJob {
        request_id: RequestId,
        job: String,
        delay: Duration,
    },
    /// A request ended without insights; the platform records why.
    LogFailure { request_id: RequestId, reason: String },
}
