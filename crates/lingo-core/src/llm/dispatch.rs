//! Model call dispatch.
//!
//! The model call is the only slow step of a chat turn. The dispatcher runs
//! it on a dedicated tokio task and hands the result back to the caller over
//! a oneshot channel, so the request handler only ever awaits the receiver.
//! When a timeout is configured and elapses, the task is aborted and the
//! call is reported as failed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use lingo_types::error::LlmError;

use super::client::ModelClient;

/// Runs model calls off the request path.
///
/// Holds the shared client constructed at startup; every dispatch reuses it.
pub struct ModelDispatcher<M: ModelClient + 'static> {
    client: Arc<M>,
    timeout: Option<Duration>,
}

impl<M: ModelClient + 'static> ModelDispatcher<M> {
    /// Create a dispatcher. `timeout` of `None` waits indefinitely.
    pub fn new(client: Arc<M>, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }

    /// Send `prompt` on a spawned task and await its reply.
    pub async fn dispatch(&self, prompt: String) -> Result<String, LlmError> {
        let (tx, rx) = oneshot::channel();
        let client = Arc::clone(&self.client);
        let started = Instant::now();

        let handle = tokio::spawn(async move {
            let result = client.send_prompt(&prompt).await;
            // The receiver is gone if the caller timed out.
            let _ = tx.send(result);
        });

        let received = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(received) => received,
                Err(_) => {
                    handle.abort();
                    warn!(
                        model = self.client.name(),
                        timeout_secs = limit.as_secs(),
                        "Model call timed out"
                    );
                    return Err(LlmError::Timeout(limit.as_secs()));
                }
            },
            None => rx.await,
        };

        debug!(
            model = self.client.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model call finished"
        );

        received.map_err(|_| LlmError::Provider {
            message: "model task ended without a reply".to_string(),
        })?
    }
}
