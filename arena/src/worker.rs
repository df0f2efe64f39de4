//! Background API worker.
//!
//! The render loop must never block on the network: the countdown keeps
//! ticking while a round trip is in flight. A single background task owns
//! the API client and talks to the UI over bounded channels. Failures
//! come back as responses, never as task panics.

use argubot::{Argubot, ArgumentResponse, SessionSummary};
use tokio::sync::mpsc;
use tracing::warn;

/// Requests the UI sends to the worker.
#[derive(Debug)]
pub enum WorkerRequest {
    /// Open a session with the opening statement.
    Start(String),
    /// Submit one argument in the active session.
    Argue { session_id: String, text: String },
    /// Close the session and fetch the final report.
    End { session_id: String },
}

/// Which request a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Start,
    Argue,
    End,
}

/// Responses the worker sends back to the UI.
#[derive(Debug)]
pub enum WorkerResponse {
    Started(ArgumentResponse),
    Exchange(ArgumentResponse),
    Ended(SessionSummary),
    Failed { request: RequestKind, error: String },
}

/// Spawn the worker task and return the UI's channel endpoints.
pub fn spawn_worker(
    client: Argubot,
) -> (mpsc::Sender<WorkerRequest>, mpsc::Receiver<WorkerResponse>) {
    let (request_tx, mut request_rx) = mpsc::channel::<WorkerRequest>(8);
    let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>(8);

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let response = match request {
                WorkerRequest::Start(statement) => {
                    match client.start_session(&statement).await {
                        Ok(r) => WorkerResponse::Started(r),
                        Err(e) => {
                            warn!(error = %e, "start_session failed");
                            WorkerResponse::Failed {
                                request: RequestKind::Start,
                                error: e.to_string(),
                            }
                        }
                    }
                }
                WorkerRequest::Argue { session_id, text } => {
                    match client.send_argument(&session_id, &text).await {
                        Ok(r) => WorkerResponse::Exchange(r),
                        Err(e) => {
                            warn!(error = %e, "send_argument failed");
                            WorkerResponse::Failed {
                                request: RequestKind::Argue,
                                error: e.to_string(),
                            }
                        }
                    }
                }
                WorkerRequest::End { session_id } => {
                    match client.end_session(&session_id).await {
                        Ok(summary) => WorkerResponse::Ended(summary),
                        Err(e) => {
                            warn!(error = %e, "end_session failed");
                            WorkerResponse::Failed {
                                request: RequestKind::End,
                                error: e.to_string(),
                            }
                        }
                    }
                }
            };

            if response_tx.send(response).await.is_err() {
                // UI side is gone; nothing left to do.
                break;
            }
        }
    });

    (request_tx, response_rx)
}
