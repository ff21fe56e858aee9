/// Lifecycle of a sensor listener adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ListenerState {
    #[default]
    Stopped,
    Running,
    /// The provider has no such sensor; starting is a no-op.
    Unavailable,
}

impl ListenerState {
    pub fn is_running(&self) -> bool {
        matches!(self, ListenerState::Running)
    }
}
