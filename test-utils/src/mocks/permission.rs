use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use common::traits::PermissionPort;
use common::types::{Permission, PermissionCallback};

/// Permission capability whose prompts are answered by the test.
///
/// Prompts stay pending until [`MockPermissionPort::respond`] is called, unless
/// the mock was built with [`MockPermissionPort::answering`].
#[derive(Default)]
pub struct MockPermissionPort {
    granted: AtomicBool,
    prompts: AtomicUsize,
    pending: Mutex<Vec<PermissionCallback>>,
    auto_answer: Option<bool>,
}

impl MockPermissionPort {
    pub fn new(already_granted: bool) -> Self {
        let port = Self::default();
        port.granted.store(already_granted, Ordering::SeqCst);
        port
    }

    /// Answers every prompt synchronously, from inside `request_permission`.
    pub fn answering(answer: bool) -> Self {
        Self {
            auto_answer: Some(answer),
            ..Self::default()
        }
    }

    /// Resolves every pending prompt with `granted`. Returns how many were pending.
    pub fn respond(&self, granted: bool) -> usize {
        self.granted.store(granted, Ordering::SeqCst);
        let pending: Vec<PermissionCallback> = self.pending.lock().unwrap().drain(..).collect();
        let answered = pending.len();
        for on_result in pending {
            on_result(granted);
        }
        answered
    }

    /// Changes the grant outside of any prompt (e.g. from system settings).
    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn pending_prompts(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}

impl PermissionPort for MockPermissionPort {
    fn is_granted(&self, _permission: Permission) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request_permission(&self, _permission: Permission, on_result: PermissionCallback) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        match self.auto_answer {
            Some(answer) => {
                self.granted.store(answer, Ordering::SeqCst);
                on_result(answer);
            }
            None => self.pending.lock().unwrap().push(on_result),
        }
    }
}
