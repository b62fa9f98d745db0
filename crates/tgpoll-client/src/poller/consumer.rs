use async_trait::async_trait;
use tgpoll_core::entities::Update;
use thiserror::Error;
use tokio::sync::mpsc;

/// The consumer can no longer accept updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("update consumer closed")]
pub struct ConsumerClosed;

/// Receives decoded updates from the poller, once each, in id order.
///
/// Returning `Ok` means the update has been handed off; only then may the
/// poller acknowledge it. Implementations that fan out to per-kind handlers
/// or worker tasks do so behind this call.
#[async_trait]
pub trait UpdateConsumer: Send + Sync {
    async fn on_update(&self, update: Update) -> Result<(), ConsumerClosed>;
}

/// Hand updates to another task. `send` waits for channel capacity, so the
/// poller never acknowledges an update the receiver has not been given.
#[async_trait]
impl UpdateConsumer for mpsc::Sender<Update> {
    async fn on_update(&self, update: Update) -> Result<(), ConsumerClosed> {
        self.send(update).await.map_err(|_| ConsumerClosed)
    }
}
