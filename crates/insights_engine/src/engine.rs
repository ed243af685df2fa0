use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use insights_logging::{insight_debug, insight_info};
use thiserror::Error;

use crate::api::{ApiSettings, InsightsApi, ReqwestInsightsApi};
use crate::{ApiError, EngineEvent, JobTicket, RequestId};

#[derive(Debug, Error)]
pub enum EngineStartError {
    #[error("cannot build api client: {0}")]
    Api(#[from] ApiError),
    #[error("cannot start runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    Submit {
        request_id: RequestId,
        url: String,
    },
    Poll {
        request_id: RequestId,
        ticket: JobTicket,
        delay: Duration,
    },
}

/// Sends commands to the engine thread. Dropping every handle stops the
/// thread and cancels anything still waiting on its runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of the engine's event stream.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(api: Arc<dyn InsightsApi>) -> io::Result<(Self, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("insights-engine")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("insights-engine-cmd".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, event_tx).await;
                    });
                }
                insight_debug!("engine command channel closed; shutting down runtime");
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<(Self, EngineEvents), EngineStartError> {
        let api = ReqwestInsightsApi::new(settings)?;
        insight_info!("engine targeting {}", api.endpoint());
        Ok(Self::spawn(Arc::new(api))?)
    }

    pub fn submit(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            url: url.into(),
        });
    }

    pub fn poll(&self, request_id: RequestId, ticket: JobTicket, delay: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::Poll {
            request_id,
            ticket,
            delay,
        });
    }
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn InsightsApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Submit { request_id, url } => match api.submit(&url).await {
            Ok(ticket) => EngineEvent::Submitted { request_id, ticket },
            Err(error) => EngineEvent::Failed { request_id, error },
        },
        EngineCommand::Poll {
            request_id,
            ticket,
            delay,
        } => {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match api.status(&ticket).await {
                Ok(status) => EngineEvent::Polled {
                    request_id,
                    ticket,
                    status,
                },
                Err(error) => EngineEvent::Failed { request_id, error },
            }
        }
    };
    let _ = event_tx.send(event);
}
