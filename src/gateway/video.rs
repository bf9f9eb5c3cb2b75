//! Long-running video job tracking.
//!
//! A submitted job moves `Submitted -> Polling -> {Completed, TimedOut, Failed}`.
//! The loop runs on `tokio::time`, so a paused runtime clock drives it in tests.

use std::time::Duration;

use tokio::time::{Instant, sleep, timeout_at};

use crate::auth::Credential;
use crate::config::VideoPollConfig;
use crate::error::{GatewayError, ProviderError};
use crate::provider::GenerativeProvider;
use crate::types::gemini::LongRunningOperation;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum VideoJobState {
    /// Accepted by the provider; the submission response has not been inspected yet.
    Submitted(LongRunningOperation),
    /// Waiting on the provider; `polls` status fetches issued so far.
    Polling { name: String, polls: u32 },
    Completed { uri: String },
    TimedOut,
    Failed(GatewayError),
}

impl VideoJobState {
    /// Terminal state for a finished operation.
    fn finished(operation: &LongRunningOperation) -> Self {
        if let Some(error) = &operation.error {
            return Self::Failed(ProviderError::from_operation_error(error).into());
        }
        match operation.video_uri() {
            Some(uri) => Self::Completed { uri },
            None => Self::Failed(GatewayError::NoVideoProduced),
        }
    }
}

/// Drives one submitted job to a terminal state.
pub(crate) struct VideoJob<'a> {
    provider: &'a dyn GenerativeProvider,
    credential: &'a Credential,
    config: VideoPollConfig,
    started: Instant,
    state: VideoJobState,
}

impl<'a> VideoJob<'a> {
    /// Start tracking `operation`. The polling budget is measured from now.
    pub(crate) fn new(
        provider: &'a dyn GenerativeProvider,
        credential: &'a Credential,
        config: VideoPollConfig,
        operation: LongRunningOperation,
    ) -> Self {
        Self {
            provider,
            credential,
            config,
            started: Instant::now(),
            state: VideoJobState::Submitted(operation),
        }
    }

    #[cfg(test)]
    pub(crate) const fn state(&self) -> &VideoJobState {
        &self.state
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Perform one transition. No-op once terminal.
    pub(crate) async fn advance(&mut self) {
        let next = match &self.state {
            VideoJobState::Submitted(operation) if operation.done => {
                VideoJobState::finished(operation)
            }
            VideoJobState::Submitted(operation) => {
                tracing::debug!(operation = %operation.name, "Video job submitted");
                VideoJobState::Polling {
                    name: operation.name.clone(),
                    polls: 0,
                }
            }
            VideoJobState::Polling { name, polls } => {
                if self.elapsed() >= self.config.timeout {
                    self.abandon(name, *polls)
                } else {
                    sleep(self.config.poll_interval).await;
                    // A status fetch may not outlive the budget.
                    let deadline = self.started + self.config.timeout;
                    match timeout_at(deadline, self.poll(name, *polls + 1)).await {
                        Ok(next) => next,
                        Err(_) => self.abandon(name, *polls + 1),
                    }
                }
            }
            terminal => terminal.clone(),
        };
        self.state = next;
    }

    fn abandon(&self, name: &str, polls: u32) -> VideoJobState {
        tracing::warn!(
            operation = %name,
            polls,
            timeout_secs = self.config.timeout.as_secs(),
            "Video job abandoned after polling budget ran out"
        );
        VideoJobState::TimedOut
    }

    async fn poll(&self, name: &str, polls: u32) -> VideoJobState {
        match self.provider.get_operation(self.credential, name).await {
            Ok(operation) if operation.done => VideoJobState::finished(&operation),
            Ok(_) => {
                tracing::debug!(
                    operation = %name,
                    polls,
                    elapsed_secs = self.elapsed().as_secs(),
                    "Video job still running"
                );
                VideoJobState::Polling {
                    name: name.to_string(),
                    polls,
                }
            }
            Err(error) => VideoJobState::Failed(error.into()),
        }
    }

    /// Advance until terminal and return the download reference.
    pub(crate) async fn run(mut self) -> Result<String, GatewayError> {
        loop {
            match &self.state {
                VideoJobState::Completed { uri } => return Ok(uri.clone()),
                VideoJobState::TimedOut => {
                    return Err(GatewayError::VideoTimeout {
                        timeout: self.config.timeout,
                    });
                }
                VideoJobState::Failed(error) => return Err(error.clone()),
                _ => self.advance().await,
            }
        }
    }
}
