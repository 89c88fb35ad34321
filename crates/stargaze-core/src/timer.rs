// Cancellable one-shot timers on top of tokio tasks
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// A restartable one-shot timer
///
/// Starting it again aborts whatever was pending, and dropping it aborts
/// too, so at most one scheduled action is ever live per timer.
#[derive(Debug, Default)]
pub struct OneShot {
    handle: Option<JoinHandle<()>>,
}

impl OneShot {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Run `action` after `delay` unless cancelled or restarted first
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True while the delay is still running (or the action hasn't finished)
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for OneShot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Fire-and-forget: send `event` on `tx` after `delay`
///
/// Nothing cancels these; receivers decide whether the event still matters.
pub fn fire_after<T>(delay: Duration, tx: UnboundedSender<T>, event: T) -> JoinHandle<()>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        // Receiver gone means the app is shutting down
        let _ = tx.send(event);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_fires_once() {
        let fired = Arc::new(AtomicU32::new(0));
        let mut timer = OneShot::new();

        let counter = fired.clone();
        timer.start(Duration::from_millis(100), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(timer.is_pending());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_aborts_previous() {
        let fired = Arc::new(AtomicU32::new(0));
        let mut timer = OneShot::new();

        for _ in 0..3 {
            let counter = fired.clone();
            timer.start(Duration::from_millis(100), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let fired = Arc::new(AtomicU32::new(0));
        {
            let mut timer = OneShot::new();
            let counter = fired.clone();
            timer.start(Duration::from_millis(100), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_after_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        fire_after(Duration::from_millis(1500), tx, 42u64);

        let early = tokio::time::timeout(Duration::from_millis(1400), rx.recv()).await;
        assert!(early.is_err());
        assert_eq!(rx.recv().await, Some(42));
    }
}
