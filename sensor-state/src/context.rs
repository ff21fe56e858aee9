//! Delivery contexts callbacks are marshalled onto before they write state.

use log::debug;
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

use common::traits::DeliveryContext;
use common::types::Task;

/// Runs every task immediately on the dispatching thread.
///
/// Suitable when the provider already calls back on the consuming context, and
/// in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineContext;

impl DeliveryContext for InlineContext {
    fn dispatch(&self, task: Task) {
        task();
    }
}

/// Single consumer loop running dispatched tasks one at a time, in FIFO order.
///
/// Plays the role of the UI thread: every state write and every observer
/// notification of the pipelines runs on this loop.
pub struct MainLoop {
    sender: mpsc::UnboundedSender<Task>,
    abort_signal: Arc<Notify>,
}

impl MainLoop {
    /// Spawns the loop on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn spawn() -> (Arc<Self>, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let abort_signal = Arc::new(Notify::new());
        let handle = tokio::spawn(run(receiver, abort_signal.clone()));
        (
            Arc::new(Self {
                sender,
                abort_signal,
            }),
            handle,
        )
    }

    /// Stops the loop. Tasks still queued are dropped.
    pub fn shutdown(&self) {
        self.abort_signal.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl DeliveryContext for MainLoop {
    fn dispatch(&self, task: Task) {
        if self.sender.send(task).is_err() {
            debug!("Main loop stopped, dropping task");
        }
    }
}

async fn run(mut receiver: mpsc::UnboundedReceiver<Task>, abort_signal: Arc<Notify>) {
    loop {
        tokio::select! {
            biased;

            _ = abort_signal.notified() => {
                break;
            }

            task = receiver.recv() => match task {
                Some(task) => task(),
                None => break,
            }
        }
    }
    debug!("Main loop finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;
    use tokio::sync::oneshot;

    #[test]
    fn test_inline_runs_immediately() {
        let ran = Arc::new(Mutex::new(false));
        InlineContext.dispatch(Box::new({
            let ran = ran.clone();
            move || *ran.lock().unwrap() = true
        }));
        assert!(*ran.lock().unwrap());
    }

    #[tokio::test]
    async fn test_main_loop_runs_tasks_in_order() {
        let (main_loop, handle) = MainLoop::spawn();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..50 {
            let order = order.clone();
            main_loop.dispatch(Box::new(move || order.lock().unwrap().push(i)));
        }
        let (done_tx, done_rx) = oneshot::channel();
        main_loop.dispatch(Box::new(move || {
            let _ = done_tx.send(());
        }));
        done_rx.await.unwrap();

        assert_eq!(*order.lock().unwrap(), (0..50).collect::<Vec<_>>());

        main_loop.shutdown();
        handle.await.unwrap();
        assert!(main_loop.is_closed());
    }

    #[tokio::test]
    async fn test_main_loop_serialises_foreign_threads() {
        let (main_loop, handle) = MainLoop::spawn();
        let loop_threads = Arc::new(Mutex::new(Vec::new()));

        let producers: Vec<_> = (0..4)
            .map(|_| {
                let main_loop = main_loop.clone();
                let loop_threads = loop_threads.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        let loop_threads = loop_threads.clone();
                        main_loop.dispatch(Box::new(move || {
                            loop_threads.lock().unwrap().push(thread::current().id());
                        }));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        let (done_tx, done_rx) = oneshot::channel();
        main_loop.dispatch(Box::new(move || {
            let _ = done_tx.send(());
        }));
        done_rx.await.unwrap();

        assert_eq!(loop_threads.lock().unwrap().len(), 100);

        main_loop.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_after_shutdown_is_dropped() {
        let (main_loop, handle) = MainLoop::spawn();
        main_loop.shutdown();
        handle.await.unwrap();

        let ran = Arc::new(Mutex::new(false));
        main_loop.dispatch(Box::new({
            let ran = ran.clone();
            move || *ran.lock().unwrap() = true
        }));
        assert!(!*ran.lock().unwrap());
    }
}
