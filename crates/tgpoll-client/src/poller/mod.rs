//! Offset-tracking long-polling loop.
//!
//! One fetch is in flight at a time: fetch, dispatch, advance the offset,
//! repeat. The offset only moves past an update after the consumer has
//! accepted it, so a crash or a closed consumer risks redelivery of the last
//! batch, never silent loss.

mod backoff;
mod consumer;


pub use backoff::Backoff;
pub use consumer::{ConsumerClosed, UpdateConsumer};

use crate::error::{classify_rejection, FetchError, PollError, RejectionClass};
use crate::source::{PollRequest, UpdateSource};
use std::time::Duration;
use tgpoll_core::config::{AckMode, DecodePolicy, PollingSettings};
use tgpoll_core::entities::{Update, UpdateKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Settings the loop runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    pub timeout: Duration,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
    pub batch_limit: Option<u32>,
    /// `None` leaves the service's default filter in place.
    pub allowed_updates: Option<Vec<UpdateKind>>,
    pub ack_mode: AckMode,
    pub decode_policy: DecodePolicy,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self::from(&PollingSettings::default())
    }
}

impl From<&PollingSettings> for PollingConfig {
    fn from(s: &PollingSettings) -> Self {
        Self {
            timeout: s.timeout(),
            backoff_base: s.backoff_base(),
            backoff_max: s.backoff_max(),
            batch_limit: Some(s.batch_limit),
            allowed_updates: if s.allowed_updates.is_empty() {
                None
            } else {
                Some(s.allowed_updates.clone())
            },
            ack_mode: s.ack_mode,
            decode_policy: s.decode_policy,
        }
    }
}

/// Where the loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
    Dispatching,
    BackingOff,
    Stopped,
}

/// Counters for what the loop has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollStats {
    pub polls: u64,
    pub delivered: u64,
    pub transport_errors: u64,
    pub rejections: u64,
    pub decode_errors: u64,
    /// Updates dropped because their id was already acknowledged.
    pub stale_skipped: u64,
}

/// Drives an `UpdateSource` and feeds an `UpdateConsumer`.
pub struct Poller<S> {
    source: S,
    config: PollingConfig,
    /// Lowest update id not yet acknowledged. Written only by the loop.
    offset: i64,
    state: PollState,
    backoff: Backoff,
    stats: PollStats,
    cancel: CancellationToken,
}

impl<S: UpdateSource> Poller<S> {
    pub fn new(source: S, config: PollingConfig) -> Self {
        let backoff = Backoff::new(config.backoff_base, config.backoff_max);
        Self {
            source,
            config,
            offset: 0,
            state: PollState::Idle,
            backoff,
            stats: PollStats::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Stop when `token` is cancelled, e.g. a token shared with the rest of
    /// the process's shutdown path.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Resume from a previously saved offset instead of 0.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn stats(&self) -> &PollStats {
        &self.stats
    }

    /// A token that stops the loop when cancelled.
    ///
    /// `run` borrows the poller mutably, so callers keep a clone of this to
    /// stop it from elsewhere.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Ask the loop to stop at its next suspension point.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Poll until stopped, the consumer closes, or a fatal error.
    ///
    /// Cancellation interrupts a pending fetch or backoff wait but never a
    /// dispatch in progress. The offset reached so far is kept either way.
    pub async fn run<C>(&mut self, consumer: &C) -> Result<(), PollError>
    where
        C: UpdateConsumer + ?Sized,
    {
        info!("polling started at offset {}", self.offset);
        let result = self.run_loop(consumer).await;
        self.state = PollState::Stopped;
        match &result {
            Ok(()) => info!("polling stopped at offset {}", self.offset),
            Err(e) => error!("polling stopped at offset {}: {e}", self.offset),
        }
        result
    }

    async fn run_loop<C>(&mut self, consumer: &C) -> Result<(), PollError>
    where
        C: UpdateConsumer + ?Sized,
    {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(());
            }

            self.state = PollState::Polling;
            self.stats.polls += 1;
            let request = self.request();
            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Ok(()),
                result = self.source.fetch(&request) => result,
            };

            match fetched {
                Ok(updates) => {
                    self.backoff.reset();
                    self.state = PollState::Dispatching;
                    if let Err(ConsumerClosed) = self.dispatch(updates, consumer).await {
                        info!("update consumer closed, stopping poll");
                        return Ok(());
                    }
                }
                Err(err) => {
                    let delay = self.on_fetch_error(err)?;
                    self.state = PollState::BackingOff;
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => return Ok(()),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }

    fn request(&self) -> PollRequest {
        PollRequest {
            offset: self.offset,
            timeout: self.config.timeout,
            limit: self.config.batch_limit,
            allowed_updates: self.config.allowed_updates.clone(),
        }
    }

    /// Deliver a batch in order, advancing the offset per the ack mode.
    async fn dispatch<C>(&mut self, updates: Vec<Update>, consumer: &C) -> Result<(), ConsumerClosed>
    where
        C: UpdateConsumer + ?Sized,
    {
        if !updates.is_empty() {
            debug!("dispatching {} update(s) from offset {}", updates.len(), self.offset);
        }

        let mut acked = self.offset;
        for update in updates {
            let id = update.update_id;
            if id < self.offset {
                self.stats.stale_skipped += 1;
                warn!("skipping update {id}: already acknowledged (offset {})", self.offset);
                continue;
            }

            debug!("update {id}: {:?}", update.kind());
            consumer.on_update(update).await?;
            self.stats.delivered += 1;

            acked = acked.max(id.saturating_add(1));
            if self.config.ack_mode == AckMode::PerUpdate {
                self.offset = acked;
            }
        }
        self.offset = acked;
        Ok(())
    }

    /// Decide how long to back off, or stop with an error.
    fn on_fetch_error(&mut self, err: FetchError) -> Result<Duration, PollError> {
        match err {
            FetchError::Transport(msg) => {
                self.stats.transport_errors += 1;
                let delay = self.backoff.next_delay();
                warn!("telegram poll error (retry in {delay:?}): {msg}");
                Ok(delay)
            }
            FetchError::ServiceRejected {
                code,
                description,
                retry_after,
            } => {
                self.stats.rejections += 1;
                match classify_rejection(code) {
                    RejectionClass::Fatal => Err(PollError::Rejected { code, description }),
                    RejectionClass::Transient => {
                        let mut delay = self.backoff.next_delay();
                        if let Some(secs) = retry_after {
                            delay = delay.max(Duration::from_secs(secs));
                        }
                        warn!("telegram API error {code} (retry in {delay:?}): {description}");
                        Ok(delay)
                    }
                }
            }
            FetchError::Decode(source) => {
                self.stats.decode_errors += 1;
                match self.config.decode_policy {
                    DecodePolicy::Stop => Err(PollError::Decode {
                        offset: self.offset,
                        source,
                    }),
                    DecodePolicy::Retry => {
                        let delay = self.backoff.next_delay();
                        error!(
                            "telegram parse error at offset {} (retry in {delay:?}): {source}",
                            self.offset
                        );
                        Ok(delay)
                    }
                }
            }
        }
    }
}

impl<S: UpdateSource + 'static> Poller<S> {
    /// Run the loop on its own task, delivering updates through a bounded
    /// channel of `capacity`.
    pub fn spawn(mut self, capacity: usize) -> (mpsc::Receiver<Update>, PollerHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        let cancel = self.cancellation_token();
        let join = tokio::spawn(async move {
            self.run(&tx).await?;
            Ok::<_, PollError>(self.offset)
        });
        (rx, PollerHandle { cancel, join })
    }
}

/// Control over a spawned poller.
pub struct PollerHandle {
    cancel: CancellationToken,
    join: JoinHandle<Result<i64, PollError>>,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Wait for the loop to finish. Yields the final offset.
    pub async fn join(self) -> Result<i64, PollError> {
        self.join
            .await
            .map_err(|e| PollError::Task(e.to_string()))?
    }
}
