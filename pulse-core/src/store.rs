use std::cell::{Cell, RefCell};
use std::sync::Arc;

use crate::types::AnalysisResult;

/// Identifies one upload attempt. Only the most recent ticket may publish a
/// result or clear the loading flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// Session-lifetime holder of the latest analysis result.
///
/// Single writer (the upload flow), many readers (the views). All methods
/// take `&self`; implementations use interior mutability since everything
/// runs on one event loop.
pub trait ResultStore {
    fn result(&self) -> Option<Arc<AnalysisResult>>;
    fn set_result(&self, result: Arc<AnalysisResult>);
    fn is_loading(&self) -> bool;
    fn set_loading(&self, loading: bool);
    fn generation(&self) -> u64;
    fn set_generation(&self, generation: u64);

    /// Start a new attempt, superseding any earlier one.
    fn begin_upload(&self) -> UploadTicket {
        let next = self.generation().wrapping_add(1);
        self.set_generation(next);
        self.set_loading(true);
        UploadTicket(next)
    }

    fn is_current(&self, ticket: UploadTicket) -> bool {
        self.generation() == ticket.0
    }

    fn finish_upload(&self, ticket: UploadTicket) {
        if self.is_current(ticket) {
            self.set_loading(false);
        }
    }

    /// Replace the stored result wholesale. Returns false if the ticket was
    /// superseded, in which case nothing changes.
    fn publish(&self, ticket: UploadTicket, result: Arc<AnalysisResult>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.set_result(result);
        true
    }
}

/// Clears the loading flag when dropped, including when the owning future
/// is dropped mid-request.
pub(crate) struct LoadingGuard<'a, S: ResultStore + ?Sized> {
    store: &'a S,
    ticket: UploadTicket,
}

impl<'a, S: ResultStore + ?Sized> LoadingGuard<'a, S> {
    pub(crate) fn new(store: &'a S, ticket: UploadTicket) -> Self {
        Self { store, ticket }
    }
}

impl<S: ResultStore + ?Sized> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.store.finish_upload(self.ticket);
    }
}

/// Plain in-memory store for the CLI and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    result: RefCell<Option<Arc<AnalysisResult>>>,
    loading: Cell<bool>,
    generation: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(result: AnalysisResult) -> Self {
        let store = Self::new();
        store.set_result(Arc::new(result));
        store
    }
}

impl ResultStore for MemoryStore {
    fn result(&self) -> Option<Arc<AnalysisResult>> {
        self.result.borrow().clone()
    }

    fn set_result(&self, result: Arc<AnalysisResult>) {
        *self.result.borrow_mut() = Some(result);
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    fn generation(&self) -> u64 {
        self.generation.get()
    }

    fn set_generation(&self, generation: u64) {
        self.generation.set(generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.result().is_none());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_superseded_ticket_cannot_publish_or_clear_loading() {
        let store = MemoryStore::new();
        let first = store.begin_upload();
        let second = store.begin_upload();
        assert!(!store.is_current(first));

        assert!(!store.publish(first, Arc::new(AnalysisResult::default())));
        assert!(store.result().is_none());

        store.finish_upload(first);
        assert!(store.is_loading(), "stale finish must not clear the newer upload");

        assert!(store.publish(second, Arc::new(AnalysisResult::default())));
        store.finish_upload(second);
        assert!(!store.is_loading());
        assert!(store.result().is_some());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let store = MemoryStore::new();
        let ticket = store.begin_upload();
        {
            let _guard = LoadingGuard::new(&store, ticket);
            assert!(store.is_loading());
        }
        assert!(!store.is_loading());
    }
}
