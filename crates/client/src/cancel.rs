//! Cancellation and timeouts for node calls.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use futures_timer::Delay;
use futures_util::future::{select, Either};
use tokio::sync::Notify;

use crate::error::BuildError;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// A cloneable handle that aborts pending builds. Cancellation is permanent.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// A fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every build holding a clone of this token
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// True once `cancel` has been called
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled
    pub async fn cancelled(&self) {
        loop {
            // register before checking the flag so a concurrent cancel is not missed
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Run `fut` until it resolves, `token` is cancelled, or `timeout` elapses.
pub async fn guarded<F, T, E>(token: &CancelToken, timeout: Duration, fut: F) -> Result<T, BuildError>
where
    F: Future<Output = Result<T, E>>,
    BuildError: From<E>,
{
    if token.is_cancelled() {
        return Err(BuildError::Cancelled);
    }

    let stop = async {
        match select(Box::pin(token.cancelled()), Delay::new(timeout)).await {
            Either::Left(_) => BuildError::Cancelled,
            Either::Right(_) => BuildError::TimedOut(timeout),
        }
    };

    match select(Box::pin(fut), Box::pin(stop)).await {
        Either::Left((res, _)) => res.map_err(Into::into),
        Either::Right((e, _)) => {
            tracing::warn!(err = %e, "abandoning node call");
            Err(e)
        }
    }
}
