use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{persist::PersistQueue, PersistHandle, Placement, Record};
use crate::StorageError;

/// One in-memory record list plus the queue that persists it.
pub(crate) struct Collection<T: Record> {
    items: RwLock<Vec<T>>,
    queue: PersistQueue,
}

impl<T: Record> Collection<T> {
    pub(crate) fn new(items: Vec<T>, queue: PersistQueue) -> Self {
        Self {
            items: RwLock::new(items),
            queue,
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.read().clone()
    }

    pub(crate) fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.read().iter().filter(|item| keep(item)).cloned().collect()
    }

    pub(crate) fn get(&self, id: &T::Id) -> Option<T> {
        self.read().iter().find(|item| item.id() == id).cloned()
    }

    pub(crate) fn insert(&self, item: T) -> PersistHandle {
        self.mutate(|items| match T::PLACEMENT {
            Placement::Append => items.push(item),
            Placement::Prepend => items.insert(0, item),
        })
    }

    /// Unknown ids are ignored; the collection is saved either way.
    pub(crate) fn update(&self, id: &T::Id, patch: T::Patch) -> PersistHandle {
        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
                item.apply(patch);
            }
        })
    }

    pub(crate) fn remove(&self, id: &T::Id) -> PersistHandle {
        self.mutate(|items| items.retain(|item| item.id() != id))
    }

    pub(crate) fn persist(&self) -> PersistHandle {
        let items = self.read();
        self.enqueue(&items)
    }

    // The snapshot is queued while the write lock is still held, so queue
    // order always matches mutation order.
    fn mutate(&self, change: impl FnOnce(&mut Vec<T>)) -> PersistHandle {
        let mut items = self.write();
        change(&mut items);
        self.enqueue(&items)
    }

    fn enqueue(&self, items: &[T]) -> PersistHandle {
        match serde_json::to_string(items) {
            Ok(payload) => self.queue.enqueue(payload),
            Err(e) => {
                tracing::error!("Error serializing {}: {e}", T::KEY);
                PersistHandle::failed(T::KEY, StorageError::Serialization(e))
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}
