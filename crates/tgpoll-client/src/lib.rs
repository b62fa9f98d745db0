//! # tgpoll-client
//!
//! `getUpdates` fetcher and the offset-tracking long-polling loop.

pub mod error;
pub mod fetcher;
pub mod poller;
pub mod source;

pub use error::{classify_rejection, FetchError, PollError, RejectionClass};
pub use fetcher::HttpFetcher;
pub use poller::{
    Backoff, ConsumerClosed, PollState, PollStats, Poller, PollerHandle, PollingConfig,
    UpdateConsumer,
};
pub use source::{PollRequest, UpdateSource};
