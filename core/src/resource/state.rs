/// Fetch lifecycle: idle until the first request, then loading →
/// success/error, re-entering loading on refetch without resetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of one resource kind's fetch state. Prior `data` and
/// `error_message` survive a refetch's loading phase; a failed fetch leaves
/// `data` untouched.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub status: ResourceStatus,
    pub data: T,
    pub error_message: Option<String>,
}

impl<T: Default> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            status: ResourceStatus::Idle,
            data: T::default(),
            error_message: None,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == ResourceStatus::Loading
    }
}

/// Snapshot of one mutation kind's tracking, independent of the fetch state
/// and of every other mutation kind.
#[derive(Debug, Clone, Default)]
pub struct MutationState {
    pub loading: bool,
    pub error_message: Option<String>,
}
