use log::{debug, info, warn};
use std::sync::{Arc, Mutex};

use common::traits::PermissionPort;
use common::types::{Permission, PermissionState, Task};
use publisher::ObservableState;

use crate::helpers::lock;

#[derive(Default)]
struct GateInner {
    state: PermissionState,
    continuations: Vec<Task>,
}

/// Runtime permission gate in front of the location pipeline.
///
/// The current [`PermissionState`] is published through an
/// [`ObservableState`] so a UI can show a notice on denial; the gate itself
/// never retries a denied prompt.
pub struct PermissionGate<P> {
    port: Arc<P>,
    permission: Permission,
    inner: Arc<Mutex<GateInner>>,
    state: ObservableState<PermissionState>,
}

impl<P> PermissionGate<P>
where
    P: PermissionPort,
{
    pub fn new(port: Arc<P>, permission: Permission) -> Self {
        Self {
            port,
            permission,
            inner: Arc::new(Mutex::new(GateInner::default())),
            state: ObservableState::new(),
        }
    }

    /// Makes sure the permission is granted, then runs `on_granted`.
    ///
    /// When the capability already reports a grant, `on_granted` runs before
    /// this returns and no prompt is shown. Otherwise a prompt is issued (only
    /// one at a time) and `on_granted` runs when, and only if, it is accepted.
    /// Returns the state right after the call.
    pub fn ensure_permission<F>(&self, on_granted: F) -> PermissionState
    where
        F: FnOnce() + Send + 'static,
    {
        if self.port.is_granted(self.permission) {
            let (previous, continuations) = {
                let mut inner = lock(&self.inner);
                let previous = std::mem::replace(&mut inner.state, PermissionState::Granted);
                (previous, std::mem::take(&mut inner.continuations))
            };
            if previous != PermissionState::Granted {
                debug!("{} already granted", self.permission.manifest_name());
                self.state.set(PermissionState::Granted);
            }
            on_granted();
            continuations.into_iter().for_each(|continuation| continuation());
            return PermissionState::Granted;
        }

        let prompt = {
            let mut inner = lock(&self.inner);
            inner.continuations.push(Box::new(on_granted));
            if inner.state == PermissionState::Requesting {
                false
            } else {
                inner.state = PermissionState::Requesting;
                true
            }
        };
        if !prompt {
            debug!("Permission prompt already in flight, queueing continuation");
            return PermissionState::Requesting;
        }

        info!("Requesting {}", self.permission.manifest_name());
        self.state.set(PermissionState::Requesting);
        let inner = self.inner.clone();
        let state = self.state.clone();
        let permission = self.permission;
        self.port.request_permission(
            permission,
            Box::new(move |granted| resolve(&inner, &state, permission, granted)),
        );
        self.current_state()
    }

    /// Synchronous capability check; never prompts.
    pub fn is_granted(&self) -> bool {
        self.port.is_granted(self.permission)
    }

    pub fn current_state(&self) -> PermissionState {
        lock(&self.inner).state
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Observable view of the gate state.
    pub fn state(&self) -> &ObservableState<PermissionState> {
        &self.state
    }
}

fn resolve(
    inner: &Mutex<GateInner>,
    state: &ObservableState<PermissionState>,
    permission: Permission,
    granted: bool,
) {
    let continuations = {
        let mut inner = lock(inner);
        if inner.state != PermissionState::Requesting {
            debug!("Ignoring permission result outside of a pending request");
            return;
        }
        inner.state = if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        std::mem::take(&mut inner.continuations)
    };

    if granted {
        info!("{} granted", permission.manifest_name());
        state.set(PermissionState::Granted);
        continuations.into_iter().for_each(|continuation| continuation());
    } else {
        warn!("{} denied", permission.manifest_name());
        state.set(PermissionState::Denied);
    }
}
