use std::sync::mpsc;
use std::thread;

use chrono::{DateTime, Local};
use insights_core::{Effect, GridCell, GridRange, Insight, Msg};
use insights_engine::{
    EngineEvent, EngineEvents, EngineHandle, GridPoint, InsightRecord, JobStatus, JobTicket,
};
use insights_logging::{insight_debug, insight_error, insight_info};

/// Runs core effects against the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    last_submitted_at: Option<DateTime<Local>>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: EngineEvents, msg_tx: mpsc::Sender<Msg>) -> Self {
        spawn_event_loop(events, msg_tx);
        Self {
            engine,
            last_submitted_at: None,
        }
    }

    pub fn last_submitted_at(&self) -> Option<DateTime<Local>> {
        self.last_submitted_at
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUrl { request_id, url } => {
                    insight_info!("SubmitUrl request_id={} url={}", request_id, url);
                    self.last_submitted_at = Some(Local::now());
                    self.engine.submit(request_id, url);
                }
                Effect::PollJob {
                    request_id,
                    job,
                    delay,
                } => {
                    insight_debug!(
                        "PollJob request_id={} job={} delay_ms={}",
                        request_id,
                        job,
                        delay.as_millis()
                    );
                    self.engine.poll(request_id, JobTicket::new(job), delay);
                }
                Effect::LogFailure { request_id, reason } => {
                    insight_error!("Request {} ended without insights: {}", request_id, reason);
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(event_to_msg(event)).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Submitted { request_id, ticket } => {
            insight_info!("Request {} accepted as job {}", request_id, ticket);
            Msg::JobAccepted {
                request_id,
                job: ticket.uuid,
            }
        }
        EngineEvent::Polled {
            request_id,
            ticket,
            status: JobStatus::Pending { status },
        } => {
            insight_debug!("Request {} job {} status {}", request_id, ticket, status);
            Msg::JobPending { request_id, status }
        }
        EngineEvent::Polled {
            request_id,
            ticket,
            status: JobStatus::Finished { insights },
        } => {
            insight_info!(
                "Request {} job {} finished with {} insights",
                request_id,
                ticket,
                insights.len()
            );
            Msg::InsightsReady {
                request_id,
                insights: insights.into_iter().map(to_core_insight).collect(),
            }
        }
        EngineEvent::Failed { request_id, error } => Msg::RequestFailed {
            request_id,
            reason: error.to_string(),
        },
    }
}

fn to_core_insight(record: InsightRecord) -> Insight {
    Insight {
        title: record.title,
        description: record.description,
        impact_score: Insight::clamp_score(record.impact_score),
        tags: record.tags,
        sequence_number: record.sequence_number,
        grid: GridRange {
            from: to_core_cell(&record.grid_coordinates.from),
            to: to_core_cell(&record.grid_coordinates.to),
        },
    }
}

fn to_core_cell(point: &GridPoint) -> GridCell {
    GridCell::new(point.column.to_string(), point.row.to_string())
}
