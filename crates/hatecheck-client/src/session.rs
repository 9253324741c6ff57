//! One-call-at-a-time controller for an interactive surface.
//!
//! Per call: `Idle -> Validating -> (Rejected | Sending) -> (Succeeded | Failed) -> Idle`.
//!
//! - Validation runs synchronously inside [`AnalysisSession::submit`]; a
//!   rejected text never leaves the process and never changes state.
//! - While a call is `Sending`, further submissions are refused with
//!   [`SubmitError::Busy`].
//! - Network I/O runs on a spawned task, but the outcome is only handed
//!   over through [`AnalysisSession::next_outcome`], which takes `&mut self`,
//!   so outcomes are processed one at a time.
//! - Taking the outcome (success or failure) returns the session to `Idle`.
//! - [`AnalysisSession::cancel`] and `Drop` abort the outstanding task; its
//!   result can never be observed afterwards.

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::ClassificationClient;
use crate::error::{ClientError, Result, ValidationError};
use crate::types::{AnalysisRequest, AnalysisResult};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    Sending(RequestId),
}

/// Result of one submitted call.
#[derive(Debug)]
pub struct Outcome {
    pub id: RequestId,
    pub result: Result<AnalysisResult>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("request {0} is still in flight")]
    Busy(RequestId),

    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

struct InFlight {
    id: RequestId,
    task: JoinHandle<Result<AnalysisResult>>,
}

pub struct AnalysisSession {
    client: Arc<ClassificationClient>,
    in_flight: Option<InFlight>,
    next_id: RequestId,
}

impl AnalysisSession {
    pub fn new(client: Arc<ClassificationClient>) -> Self {
        Self {
            client,
            in_flight: None,
            next_id: 0,
        }
    }

    pub fn state(&self) -> CallState {
        match &self.in_flight {
            Some(in_flight) => CallState::Sending(in_flight.id),
            None => CallState::Idle,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate `raw_text` and, if it passes, start classifying it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, raw_text: &str) -> std::result::Result<RequestId, SubmitError> {
        if let Some(in_flight) = &self.in_flight {
            return Err(SubmitError::Busy(in_flight.id));
        }

        let request = AnalysisRequest::new(raw_text)?;

        self.next_id += 1;
        let id = self.next_id;
        let client = Arc::clone(&self.client);
        let task = tokio::spawn(async move { client.send(&request).await });

        debug!("Request {} sending", id);
        self.in_flight = Some(InFlight { id, task });
        Ok(id)
    }

    /// Wait for the outstanding call to finish and take its outcome.
    ///
    /// Returns `None` immediately when nothing is in flight, and `None` if
    /// the call was cancelled. Cancel safe: dropping the future leaves the
    /// call in flight.
    pub async fn next_outcome(&mut self) -> Option<Outcome> {
        let in_flight = self.in_flight.as_mut()?;
        let joined = (&mut in_flight.task).await;
        let id = in_flight.id;
        self.in_flight = None;

        let result = match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => return None,
            Err(e) => Err(ClientError::Internal(format!("request task failed: {}", e))),
        };

        debug!("Request {} resolved", id);
        Some(Outcome { id, result })
    }

    /// Like [`next_outcome`](Self::next_outcome), but give up as soon as
    /// `stop` resolves. The outstanding call is then cancelled and `None`
    /// returned.
    pub async fn drain_until<F>(&mut self, stop: F) -> Option<Outcome>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            outcome = self.next_outcome() => return outcome,
            _ = stop => {}
        }
        self.cancel();
        None
    }

    /// Abort the outstanding call, if any.
    pub fn cancel(&mut self) -> Option<RequestId> {
        let in_flight = self.in_flight.take()?;
        in_flight.task.abort();
        debug!("Request {} cancelled", in_flight.id);
        Some(in_flight.id)
    }
}

impl Drop for AnalysisSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ServiceError;
    use crate::transport::{RawResponse, Transport};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    const OK_BODY: &[u8] =
        br#"{"success":true,"prediction":"Hate Speech","confidence":0.91,"hate_probability":0.91}"#;

    /// Holds every predict call until the gate is opened.
    struct GatedTransport {
        gate: Notify,
        reply: std::result::Result<RawResponse, ServiceError>,
        calls: AtomicUsize,
        completed: AtomicBool,
    }

    impl GatedTransport {
        fn new(reply: std::result::Result<RawResponse, ServiceError>) -> Arc<Self> {
            Arc::new(Self {
                gate: Notify::new(),
                reply,
                calls: AtomicUsize::new(0),
                completed: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn get(&self, _url: &str) -> std::result::Result<RawResponse, ServiceError> {
            unreachable!("session never checks health")
        }

        async fn post_json(
            &self,
            _url: &str,
            _body: &Value,
        ) -> std::result::Result<RawResponse, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            self.completed.store(true, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn session_with(transport: Arc<GatedTransport>) -> AnalysisSession {
        let client = ClassificationClient::with_transport(ClientConfig::default(), transport);
        AnalysisSession::new(Arc::new(client))
    }

    fn ok_reply() -> std::result::Result<RawResponse, ServiceError> {
        Ok(RawResponse {
            status: 200,
            body: OK_BODY.to_vec(),
        })
    }

    #[tokio::test]
    async fn test_busy_while_sending() {
        let transport = GatedTransport::new(ok_reply());
        let mut session = session_with(transport.clone());

        let id = session.submit("you people are the worst").unwrap();
        assert_eq!(session.state(), CallState::Sending(id));
        assert_eq!(
            session.submit("another one"),
            Err(SubmitError::Busy(id))
        );

        transport.gate.notify_one();
        let outcome = session.next_outcome().await.unwrap();
        assert_eq!(outcome.id, id);
        assert_eq!(outcome.result.unwrap().prediction, "Hate Speech");
        assert_eq!(session.state(), CallState::Idle);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);

        // re-enabled
        let next = session.submit("another one").unwrap();
        assert_eq!(next, id + 1);
    }

    #[tokio::test]
    async fn test_rejected_input_never_sends() {
        let transport = GatedTransport::new(ok_reply());
        let mut session = session_with(transport.clone());

        assert_eq!(
            session.submit("   "),
            Err(SubmitError::Rejected(ValidationError::EmptyInput))
        );
        assert_eq!(
            session.submit("hi"),
            Err(SubmitError::Rejected(ValidationError::TooShort { len: 2 }))
        );
        assert_eq!(session.state(), CallState::Idle);
        assert!(session.next_outcome().await.is_none());

        tokio::task::yield_now().await;
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_returns_to_idle() {
        let transport = GatedTransport::new(Err(ServiceError::Timeout));
        let mut session = session_with(transport.clone());

        session.submit("some text here").unwrap();
        transport.gate.notify_one();

        let outcome = session.next_outcome().await.unwrap();
        assert_eq!(
            outcome.result.unwrap_err(),
            ClientError::Service(ServiceError::Timeout)
        );
        assert!(!session.is_busy());
        assert!(session.submit("some text here").is_ok());
    }

    #[tokio::test]
    async fn test_cancel_discards_outcome() {
        let transport = GatedTransport::new(ok_reply());
        let mut session = session_with(transport.clone());

        let id = session.submit("some text here").unwrap();
        tokio::task::yield_now().await;
        assert_eq!(session.cancel(), Some(id));
        assert_eq!(session.cancel(), None);
        assert!(session.next_outcome().await.is_none());

        transport.gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!transport.completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drain_until_waits_for_outcome() {
        let transport = GatedTransport::new(ok_reply());
        let mut session = session_with(transport.clone());

        let id = session.submit("some text here").unwrap();
        transport.gate.notify_one();

        let outcome = session.drain_until(std::future::pending()).await.unwrap();
        assert_eq!(outcome.id, id);
        assert!(outcome.result.is_ok());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_drain_until_stops_on_signal() {
        let transport = GatedTransport::new(ok_reply());
        let mut session = session_with(transport.clone());

        session.submit("some text here").unwrap();
        tokio::task::yield_now().await;

        let stop = tokio::time::sleep(Duration::from_millis(20));
        assert!(session.drain_until(stop).await.is_none());
        assert_eq!(session.state(), CallState::Idle);

        transport.gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!transport.completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drop_aborts_outstanding_call() {
        let transport = GatedTransport::new(ok_reply());
        let mut session = session_with(transport.clone());

        session.submit("some text here").unwrap();
        tokio::task::yield_now().await;
        drop(session);

        transport.gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!transport.completed.load(Ordering::SeqCst));
    }
}
