//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering observers and
//! signalling them when a piece of state changes, plus [`ObservableState`], a
//! single-value record built on top of it.
//!
//! Observers are plain callbacks (`Fn(Uuid)`) receiving their subscription id.
//! Notification is push-then-pull: the callback carries no payload and the
//! observer reads the current value with [`ObservableState::get`].
//!
//! ### Example
//!
//! ```
//! use publisher::ObservableState;
//!
//! let state = ObservableState::<f64>::new();
//!
//! // Register an observer
//! let reader = state.clone();
//! let subscription = state.subscribe(move |_id| {
//!     println!("Observer read: {}", reader.get());
//! });
//!
//! // Notify all observers
//! state.set(9.81);
//!
//! // Unregister the observer
//! subscription.unsubscribe();
//!
//! // Verify that no observers are left
//! assert_eq!(state.subscriber_count(), 0);
//! ```

pub mod listener;
mod macros;
pub mod observable;
pub mod publisher;

pub use listener::Listener;
pub use observable::ObservableState;
pub use publisher::{Publishable, Publisher, Subscription};

#[derive(PartialEq, Clone, Debug)]
pub enum PublisherError {
    ListenerNotFound(String),
}

impl std::fmt::Display for PublisherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublisherError::ListenerNotFound(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PublisherError {}
