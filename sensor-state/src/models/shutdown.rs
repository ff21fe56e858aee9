use log::{error, info};
use std::future::Future;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;

pub(crate) struct ShutdownSignal {
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    fn new(notify: Arc<Notify>) -> Self {
        Self { notify }
    }

    /// Waits for `run_for_millis` or, without a deadline, for Ctrl+C, then
    /// stores a stop permit in the notifier.
    async fn listen_for_shutdown(&self, run_for_millis: Option<u64>) {
        if let Some(time_to_live_millis) = run_for_millis {
            tokio::time::sleep(std::time::Duration::from_millis(time_to_live_millis)).await;
            self.notify.notify_one();
        } else {
            self.notify_after(signal::ctrl_c()).await;
        }
    }

    /// Notifies once `signal` resolves, whether it succeeded or failed.
    async fn notify_after<F>(&self, signal: F)
    where
        F: Future<Output = std::io::Result<()>>,
    {
        match signal.await {
            Ok(()) => info!("Ctrl+C received. Sending stop signal..."),
            Err(e) => error!("Error while waiting for Ctrl+C, stopping: {}", e),
        }
        self.notify.notify_one();
    }
}

pub(crate) fn listen_for_shutdown(
    notify: Arc<Notify>,
    run_for_millis: Option<u64>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_signal = ShutdownSignal::new(notify);
        shutdown_signal.listen_for_shutdown(run_for_millis).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_shutdown_signal_with_timeout() {
        let notify = Arc::new(Notify::new());
        let shutdown_signal = ShutdownSignal::new(notify.clone());

        let handle = tokio::spawn(async move {
            shutdown_signal.listen_for_shutdown(Some(200)).await;
        });

        // Wait for the notify to be called
        let result = timeout(Duration::from_millis(500), notify.notified()).await;
        assert!(result.is_ok(), "Shutdown signal was not sent in time");

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_permit_survives_late_waiter() {
        let notify = Arc::new(Notify::new());
        listen_for_shutdown(notify.clone(), Some(10)).await.unwrap();

        // Nobody was waiting when the signal fired.
        let result = timeout(Duration::from_millis(100), notify.notified()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_failed_signal_still_notifies() {
        let notify = Arc::new(Notify::new());
        let shutdown_signal = ShutdownSignal::new(notify.clone());

        shutdown_signal
            .notify_after(std::future::ready(Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "no signal handler",
            ))))
            .await;

        let result = timeout(Duration::from_millis(100), notify.notified()).await;
        assert!(result.is_ok(), "Shutdown signal was not sent after a signal error");
    }
}
