//! The timed suspension between page requests.
//!
//! The Places API rejects a `pagetoken` that is presented too soon after the
//! response that issued it, so the orchestrator waits before every
//! continuation request. That wait goes through [`Pause`] so it can be
//! interrupted, and so tests can observe it without sleeping.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::PlacesError;

#[async_trait]
pub trait Pause: Send + Sync {
    /// Suspends the caller for `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Interrupted`] if the wait is cut short.
    async fn pause(&self, duration: Duration) -> Result<(), PlacesError>;
}

#[async_trait]
impl<T> Pause for Arc<T>
where
    T: Pause + ?Sized,
{
    async fn pause(&self, duration: Duration) -> Result<(), PlacesError> {
        (**self).pause(duration).await
    }
}

/// [`Pause`] backed by `tokio::time::sleep`.
///
/// When built with [`TokioPause::interruptible`], flipping the watch value to
/// `true` ends any pause in progress (and every later one) with
/// [`PlacesError::Interrupted`]. Dropping the sender leaves pauses
/// uninterruptible.
#[derive(Debug, Clone, Default)]
pub struct TokioPause {
    interrupt: Option<watch::Receiver<bool>>,
}

impl TokioPause {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn interruptible(interrupt: watch::Receiver<bool>) -> Self {
        Self {
            interrupt: Some(interrupt),
        }
    }
}

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) -> Result<(), PlacesError> {
        let Some(interrupt) = &self.interrupt else {
            tokio::time::sleep(duration).await;
            return Ok(());
        };

        let mut interrupt = interrupt.clone();
        let sleep = tokio::time::sleep(duration);
        tokio::pin!(sleep);

        tokio::select! {
            () = &mut sleep => Ok(()),
            interrupted = async { interrupt.wait_for(|stop| *stop).await.is_ok() } => {
                if interrupted {
                    tracing::debug!(?duration, "page pause interrupted");
                    return Err(PlacesError::Interrupted);
                }
                // Sender gone: nothing can interrupt us any more.
                sleep.await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_pause_completes() {
        let result = TokioPause::new().pause(Duration::from_millis(1)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn interruptible_pause_completes_when_not_signalled() {
        let (_tx, rx) = watch::channel(false);
        let result = TokioPause::interruptible(rx)
            .pause(Duration::from_millis(1))
            .await;
        assert!(result.is_ok(), "got: {result:?}");
    }

    #[tokio::test]
    async fn already_signalled_pause_is_interrupted() {
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let result = TokioPause::interruptible(rx)
            .pause(Duration::from_secs(60))
            .await;
        assert!(matches!(result, Err(PlacesError::Interrupted)));
    }

    #[tokio::test]
    async fn signal_during_pause_interrupts_it() {
        let (tx, rx) = watch::channel(false);
        let pause = TokioPause::interruptible(rx);

        let handle = tokio::spawn(async move { pause.pause(Duration::from_secs(60)).await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("pause should end promptly once signalled")
            .expect("pause task should not panic");
        assert!(matches!(result, Err(PlacesError::Interrupted)));
    }

    #[tokio::test]
    async fn dropped_sender_falls_back_to_plain_sleep() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let result = TokioPause::interruptible(rx)
            .pause(Duration::from_millis(1))
            .await;
        assert!(result.is_ok(), "got: {result:?}");
    }
}
