//! Interior state cells shared by the resource hooks.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::state::{MutationState, ResourceState, ResourceStatus};

/// Fetch-side cell. Each `begin` takes a monotonically increasing sequence
/// number; a response is applied only while its sequence is still the
/// latest issued, so a slow early fetch cannot overwrite a faster later
/// one.
pub struct FetchSlot<T> {
    state: std::sync::RwLock<ResourceState<T>>,
    generation: AtomicU64,
}

impl<T: Clone + Default> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            state: std::sync::RwLock::new(ResourceState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.read().expect("fetch slot poisoned").clone()
    }

    /// Enter the loading phase and claim a sequence number. Prior data and
    /// error are retained, not reset.
    pub fn begin(&self) -> u64 {
        let seq = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().expect("fetch slot poisoned").status = ResourceStatus::Loading;
        seq
    }

    /// Apply a successful response. Returns false (and changes nothing)
    /// when a newer fetch has been issued since `seq`.
    pub fn complete(&self, seq: u64, data: T) -> bool {
        if self.generation.load(Ordering::SeqCst) != seq {
            return false;
        }
        let mut state = self.state.write().expect("fetch slot poisoned");
        state.status = ResourceStatus::Success;
        state.data = data;
        state.error_message = None;
        true
    }

    /// Record a failed response. Prior data stays untouched. Stale failures
    /// are discarded like stale successes.
    pub fn fail(&self, seq: u64, message: String) -> bool {
        if self.generation.load(Ordering::SeqCst) != seq {
            return false;
        }
        let mut state = self.state.write().expect("fetch slot poisoned");
        state.status = ResourceStatus::Error;
        state.error_message = Some(message);
        true
    }
}

impl<T: Clone + Default> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutation-side cell: one per mutation kind, so a pending delete never
/// blocks or shadows a fetch or a concurrent create.
#[derive(Default)]
pub struct MutationSlot {
    loading: AtomicBool,
    error: std::sync::RwLock<Option<String>>,
}

impl MutationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) {
        self.loading.store(true, Ordering::SeqCst);
        *self.error.write().expect("mutation slot poisoned") = None;
    }

    pub fn succeed(&self) {
        self.loading.store(false, Ordering::SeqCst);
    }

    pub fn fail(&self, message: String) {
        self.loading.store(false, Ordering::SeqCst);
        *self.error.write().expect("mutation slot poisoned") = Some(message);
    }

    pub fn snapshot(&self) -> MutationState {
        MutationState {
            loading: self.loading.load(Ordering::SeqCst),
            error_message: self.error.read().expect("mutation slot poisoned").clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fetch_lifecycle_retains_prior_data_during_reload() {
        let slot: FetchSlot<Vec<u32>> = FetchSlot::new();
        assert_eq!(slot.snapshot().status, ResourceStatus::Idle);

        let seq = slot.begin();
        assert_eq!(slot.snapshot().status, ResourceStatus::Loading);
        assert!(slot.complete(seq, vec![1, 2]));

        // Refetch: loading again, old data still visible.
        let seq2 = slot.begin();
        let mid = slot.snapshot();
        assert_eq!(mid.status, ResourceStatus::Loading);
        assert_eq!(mid.data, vec![1, 2]);

        assert!(slot.fail(seq2, "falhou".to_string()));
        let after = slot.snapshot();
        assert_eq!(after.status, ResourceStatus::Error);
        assert_eq!(after.data, vec![1, 2]);
        assert_eq!(after.error_message.as_deref(), Some("falhou"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let slot: FetchSlot<Vec<u32>> = FetchSlot::new();
        let slow = slot.begin();
        let fast = slot.begin();

        // Later-issued fetch resolves first.
        assert!(slot.complete(fast, vec![9]));
        // The earlier, slower one arrives afterwards and is dropped.
        assert!(!slot.complete(slow, vec![1]));
        assert_eq!(slot.snapshot().data, vec![9]);

        // Stale failures are dropped too.
        assert!(!slot.fail(slow, "late error".to_string()));
        assert_eq!(slot.snapshot().status, ResourceStatus::Success);
    }

    #[test]
    fn success_clears_previous_error() {
        let slot: FetchSlot<Vec<u32>> = FetchSlot::new();
        let seq = slot.begin();
        slot.fail(seq, "falhou".to_string());

        let seq = slot.begin();
        assert!(slot.complete(seq, vec![3]));
        let state = slot.snapshot();
        assert_eq!(state.error_message, None);
        assert_eq!(state.status, ResourceStatus::Success);
    }

    #[test]
    fn mutation_slot_is_independent_of_fetch_slot() {
        let list: FetchSlot<Vec<u32>> = FetchSlot::new();
        let delete = MutationSlot::new();

        // Delete in flight.
        delete.begin();
        assert!(delete.snapshot().loading);

        // A concurrent fetch completes and updates data regardless.
        let seq = list.begin();
        assert!(list.complete(seq, vec![5]));
        assert_eq!(list.snapshot().data, vec![5]);
        assert!(delete.snapshot().loading);

        delete.fail("Erro ao deletar transação.".to_string());
        let state = delete.snapshot();
        assert!(!state.loading);
        assert!(state.error_message.is_some());
        // The fetch side never saw the mutation failure.
        assert_eq!(list.snapshot().error_message, None);
    }
}
