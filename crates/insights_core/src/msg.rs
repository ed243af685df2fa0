use crate::{Insight, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input field.
    InputChanged(String),
    /// User pressed "Generate Report".
    SubmitClicked,
    /// The service accepted the URL and assigned a job uuid.
    JobAccepted { request_id: RequestId, job: String },
    /// A poll came back with a status other than finished.
    JobPending { request_id: RequestId, status: String },
    /// The job finished and its insights were decoded.
    InsightsReady {
        request_id: RequestId,
        insights: Vec<Insight>,
    },
    /// Submitting or polling failed.
    RequestFailed { request_id: RequestId, reason: String },
    /// Move the card highlight down.
    SelectNextCard,
    /// Move the card highlight up.
    SelectPreviousCard,
    /// UI/render tick to animate the busy indicator.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
