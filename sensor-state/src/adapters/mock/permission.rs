use log::info;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

use common::traits::{DeliveryContext, PermissionPort};
use common::types::{Permission, PermissionCallback};

use super::current_runtime;
use crate::models::config::SimulationConfig;
use crate::models::errors::SensorStateError;

/// Permission prompt answered by a simulated user after a short delay.
///
/// The answer is delivered on the given context, like a platform activity result.
pub struct SimulatedPermissions {
    runtime: Handle,
    context: Arc<dyn DeliveryContext>,
    granted: Arc<AtomicBool>,
    grant_on_prompt: bool,
    prompt_delay: Duration,
    prompts: AtomicUsize,
}

impl SimulatedPermissions {
    /// Returns a Runtime error when called outside of a tokio runtime.
    pub fn new(
        config: &SimulationConfig,
        context: Arc<dyn DeliveryContext>,
    ) -> Result<Self, SensorStateError> {
        Ok(Self {
            runtime: current_runtime()?,
            context,
            granted: Arc::new(AtomicBool::new(config.permission_already_granted)),
            grant_on_prompt: config.grant_on_prompt,
            prompt_delay: Duration::from_millis(config.prompt_delay_millis),
            prompts: AtomicUsize::new(0),
        })
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl PermissionPort for SimulatedPermissions {
    fn is_granted(&self, _permission: Permission) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request_permission(&self, permission: Permission, on_result: PermissionCallback) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        info!("Prompting user for {}", permission.manifest_name());

        let answer = self.grant_on_prompt;
        let delay = self.prompt_delay;
        let granted = self.granted.clone();
        let context = self.context.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            granted.store(answer, Ordering::SeqCst);
            context.dispatch(Box::new(move || on_result(answer)));
        });
    }
}
