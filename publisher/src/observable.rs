use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use common::traits::Notifiable;

use crate::listener::Listener;
use crate::publisher::{Publishable, Publisher, Subscription};
use crate::PublisherError;

/// Latest value of some reading plus the observers interested in it.
///
/// `set` swaps the whole value in one step and then signals every observer
/// exactly once. Observers get no payload; they call `get` to read the value
/// that is current when they run.
#[derive(Clone)]
pub struct ObservableState<T> {
    value: Arc<watch::Sender<T>>,
    publisher: Publisher,
}

impl<T> ObservableState<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Creates a state holding `T::default()`.
    pub fn new() -> Self {
        Self::with_value(T::default())
    }

    pub fn with_value(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            value: Arc::new(sender),
            publisher: Publisher::new(),
        }
    }

    /// Replaces the current value and notifies observers once.
    pub fn set(&self, value: T) {
        self.value.send_replace(value);
        self.publisher.notify_listeners();
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Registers `observer` to be called after every `set`.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Uuid) + Send + Sync + 'static,
    {
        let mut listener = Listener::new(observer);
        self.publisher.subscribe(&mut listener)
    }

    pub fn subscribe_listener(&self, listener: &mut dyn Notifiable) -> Subscription {
        self.publisher.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: Uuid) -> Result<(), PublisherError> {
        self.publisher.unregister_listener(id)
    }

    /// Receiver for async consumers that would rather await changes.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.value.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.publisher.len()
    }
}

impl<T> Default for ObservableState<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Pair {
        a: i32,
        b: i32,
    }

    struct Counter {
        calls: AtomicUsize,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn on_changed(&self, _id: Uuid) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_get_before_set_returns_default() {
        let state = ObservableState::<Pair>::new();
        assert_eq!(state.get(), Pair::default());
    }

    #[test]
    fn test_set_replaces_value() {
        let state = ObservableState::<Pair>::new();
        state.set(Pair { a: 1, b: 2 });
        assert_eq!(state.get(), Pair { a: 1, b: 2 });
    }

    #[test]
    fn test_each_observer_notified_once_per_set() {
        let state = ObservableState::<Pair>::new();
        let counters: Vec<Arc<Counter>> = (0..5).map(|_| Arc::new(Counter::new())).collect();
        for counter in &counters {
            let mut listener = listener!(counter.on_changed);
            state.subscribe_listener(&mut listener);
        }

        state.set(Pair { a: 3, b: 4 });

        for counter in &counters {
            assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_observer_reads_new_value() {
        let state = ObservableState::<Pair>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        state.subscribe({
            let reader = state.clone();
            let seen = seen.clone();
            move |_id| seen.lock().unwrap().push(reader.get())
        });

        state.set(Pair { a: 1, b: 1 });
        state.set(Pair { a: 2, b: 2 });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Pair { a: 1, b: 1 }, Pair { a: 2, b: 2 }]
        );
    }

    #[test]
    fn test_unsubscribe_inside_notification() {
        let state = ObservableState::<Pair>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        state.subscribe({
            let state = state.clone();
            let calls = calls.clone();
            move |id| {
                calls.fetch_add(1, Ordering::SeqCst);
                state.unsubscribe(id).unwrap();
            }
        });

        state.set(Pair { a: 1, b: 0 });
        state.set(Pair { a: 2, b: 0 });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_inside_notification() {
        let state = ObservableState::<Pair>::new();
        let late_calls = Arc::new(AtomicUsize::new(0));
        state.subscribe({
            let state = state.clone();
            let late_calls = late_calls.clone();
            move |id| {
                let late_calls = late_calls.clone();
                state.subscribe(move |_| {
                    late_calls.fetch_add(1, Ordering::SeqCst);
                });
                state.unsubscribe(id).unwrap();
            }
        });

        state.set(Pair { a: 1, b: 0 });
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        state.set(Pair { a: 2, b: 0 });
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_handle_stops_notifications() {
        let state = ObservableState::<Pair>::new();
        let counter = Arc::new(Counter::new());
        let mut listener = listener!(counter.on_changed);
        let subscription = state.subscribe_listener(&mut listener);

        state.set(Pair { a: 1, b: 0 });
        subscription.unsubscribe();
        state.set(Pair { a: 2, b: 0 });

        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.get(), Pair { a: 2, b: 0 });
    }

    #[test]
    fn test_readers_never_see_half_updates() {
        let state = ObservableState::<Pair>::new();
        let writer = {
            let state = state.clone();
            std::thread::spawn(move || {
                for i in 0..10_000 {
                    state.set(Pair { a: i, b: -i });
                }
            })
        };
        for _ in 0..10_000 {
            let pair = state.get();
            assert_eq!(pair.a, -pair.b);
        }
        writer.join().unwrap();
    }

    #[tokio::test]
    async fn test_watch_receiver_sees_changes() {
        let state = ObservableState::<Pair>::new();
        let mut receiver = state.watch();

        state.set(Pair { a: 7, b: 8 });

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), Pair { a: 7, b: 8 });
    }
}
