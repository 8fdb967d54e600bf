//! Debouncer - emits a value only after input has been quiet for a fixed delay

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delays propagation of a changing value.
///
/// Each `push` cancels the pending emission and starts the delay again, so a
/// burst of inputs produces a single settled value: the last one. Settled
/// values arrive on the receiver returned by [`Debouncer::new`].
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    sender: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver of its settled values
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            sender,
            pending: None,
        };
        (debouncer, receiver)
    }

    /// Record a new raw value, rescheduling the emission from zero
    pub fn push(&mut self, value: T) {
        self.cancel();

        let sender = self.sender.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means nobody is listening any more
            let _ = sender.send(value);
        }));
    }

    /// Drop the pending value without emitting it
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// A value is waiting for the quiet period to elapse
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_last_value_once() {
        let (mut debouncer, mut settled) = Debouncer::new(DELAY);

        debouncer.push("a".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.push("ab".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.push("abc".to_string());
        let last_change = Instant::now();

        let value = settled.recv().await.unwrap();
        assert_eq!(value, "abc");
        assert!(last_change.elapsed() >= DELAY);

        sleep(DELAY * 2).await;
        assert!(settled.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_emitted_before_delay() {
        let (mut debouncer, mut settled) = Debouncer::new(DELAY);

        debouncer.push(1u32);
        sleep(Duration::from_millis(299)).await;
        assert!(settled.try_recv().is_err());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(settled.try_recv().unwrap(), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_inputs_each_settle() {
        let (mut debouncer, mut settled) = Debouncer::new(DELAY);

        debouncer.push("first");
        sleep(Duration::from_millis(400)).await;
        debouncer.push("second");
        sleep(Duration::from_millis(400)).await;

        assert_eq!(settled.try_recv().unwrap(), "first");
        assert_eq!(settled.try_recv().unwrap(), "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_suppress_emission() {
        let (mut debouncer, mut settled) = Debouncer::new(DELAY);
        debouncer.push("cancelled");
        debouncer.cancel();
        sleep(DELAY * 2).await;
        assert!(settled.try_recv().is_err());

        debouncer.push("dropped");
        drop(debouncer);
        sleep(DELAY * 2).await;
        assert!(settled.recv().await.is_none());
    }
}
