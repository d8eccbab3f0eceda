//! Single-shot, cancellable fetch streams.
//!
//! A [`Fetch`] wraps exactly one remote call. Nothing happens until the
//! stream is first polled; it then yields one `ApiResult<T>` and ends.
//! Cancelling before the result arrives drops the in-flight request and the
//! stream ends without yielding.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::stream::{FusedStream, Stream, StreamExt};
use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::ApiResult;

/// Lifecycle of one [`Fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchPhase {
    /// Created, not yet polled. No request has been sent.
    Idle,
    InFlight,
    /// The single result has been yielded.
    Emitted,
    /// The stream has ended after emitting.
    Completed,
    /// Cancelled before a result was produced; nothing was yielded.
    Cancelled,
}

impl FetchPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchPhase::Completed | FetchPhase::Cancelled)
    }
}

pub struct Fetch<T> {
    label: &'static str,
    future: Option<BoxFuture<'static, Option<ApiResult<T>>>>,
    token: CancellationToken,
    phase: FetchPhase,
}

impl<T> fmt::Debug for Fetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetch")
            .field("label", &self.label)
            .field("phase", &self.phase)
            .finish()
    }
}

impl<T: Send + 'static> Fetch<T> {
    /// Wrap `work` with its own cancellation token.
    pub fn new<F>(label: &'static str, work: F) -> Self
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        Self::with_token(label, CancellationToken::new(), work)
    }

    /// Wrap `work`, cancelled whenever `token` is.
    ///
    /// Pass a child of a scope token to cancel a group of fetches at once.
    pub fn with_token<F>(
        label: &'static str,
        token: CancellationToken,
        work: F,
    ) -> Self
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let cancelled = token.clone();
        let future = async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => None,
                result = work => Some(result),
            }
        }
        .boxed();

        Self {
            label,
            future: Some(future),
            token,
            phase: FetchPhase::Idle,
        }
    }

    /// A fetch that yields `result` without doing any work.
    pub fn ready(label: &'static str, result: ApiResult<T>) -> Self {
        Self::new(label, std::future::ready(result))
    }
}

impl<T> Fetch<T> {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Token that cancels this fetch from elsewhere, e.g. another task.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Abort the call. No result is yielded afterwards.
    pub fn cancel(&mut self) {
        self.token.cancel();
        if matches!(self.phase, FetchPhase::Idle | FetchPhase::InFlight) {
            self.future = None;
            self.phase = FetchPhase::Cancelled;
            trace!(label = self.label, "fetch cancelled");
        }
    }

    /// Drive the fetch to its single result, or `None` when cancelled.
    pub async fn outcome(mut self) -> Option<ApiResult<T>> {
        self.next().await
    }
}

impl<T> Stream for Fetch<T> {
    type Item = ApiResult<T>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        let Some(future) = this.future.as_mut() else {
            if this.phase == FetchPhase::Emitted {
                this.phase = FetchPhase::Completed;
            }
            return Poll::Ready(None);
        };

        if this.phase == FetchPhase::Idle {
            this.phase = FetchPhase::InFlight;
            trace!(label = this.label, "fetch started");
        }

        match future.as_mut().poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(outcome) => {
                this.future = None;
                match outcome {
                    Some(result) => {
                        this.phase = FetchPhase::Emitted;
                        Poll::Ready(Some(result))
                    }
                    None => {
                        this.phase = FetchPhase::Cancelled;
                        trace!(label = this.label, "fetch cancelled");
                        Poll::Ready(None)
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.future {
            Some(_) => (0, Some(1)),
            None => (0, Some(0)),
        }
    }
}

impl<T> FusedStream for Fetch<T> {
    fn is_terminated(&self) -> bool {
        self.future.is_none()
    }
}
