use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::CollectionKey;
use crate::{backend::KeyValueStore, StorageError};

type WriteOutcome = Result<(), StorageError>;

struct WriteJob {
    payload: String,
    done: oneshot::Sender<WriteOutcome>,
}

/// Feeds one collection's serialized snapshots to a dedicated writer task.
///
/// Jobs for a key are written in the order they were queued. Each key has its
/// own task, so a write that never completes only holds up its own collection.
pub(crate) struct PersistQueue {
    key: CollectionKey,
    sender: mpsc::UnboundedSender<WriteJob>,
}

impl PersistQueue {
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(key: CollectionKey, backend: Arc<dyn KeyValueStore>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<WriteJob>();

        tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                let outcome = backend.set_item(key.as_str(), &job.payload).await;
                match &outcome {
                    Ok(()) => tracing::debug!("Saved {key} ({} bytes)", job.payload.len()),
                    Err(e) => tracing::error!("Error saving {key}: {e}"),
                }
                // the caller is free to have dropped its handle
                let _ = job.done.send(outcome);
            }
            tracing::debug!("Writer for {key} stopped");
        });

        Self { key, sender }
    }

    pub(crate) fn enqueue(&self, payload: String) -> PersistHandle {
        let (done, receiver) = oneshot::channel();
        match self.sender.send(WriteJob { payload, done }) {
            Ok(()) => PersistHandle::pending(self.key, receiver),
            Err(_) => {
                tracing::error!("Dropped write for {}: writer is gone", self.key);
                PersistHandle::failed(self.key, StorageError::WriterClosed(self.key))
            }
        }
    }
}

/// Completion signal for one queued write.
///
/// Mutations never wait on the disk. Dropping the handle is the
/// fire-and-forget path; awaiting [`PersistHandle::wait`] reports whether the
/// write made it to the backing store.
#[derive(Debug)]
pub struct PersistHandle {
    key: CollectionKey,
    state: HandleState,
}

#[derive(Debug)]
enum HandleState {
    Pending(oneshot::Receiver<WriteOutcome>),
    Failed(StorageError),
}

impl PersistHandle {
    fn pending(key: CollectionKey, receiver: oneshot::Receiver<WriteOutcome>) -> Self {
        Self {
            key,
            state: HandleState::Pending(receiver),
        }
    }

    pub(crate) fn failed(key: CollectionKey, error: StorageError) -> Self {
        Self {
            key,
            state: HandleState::Failed(error),
        }
    }

    pub fn key(&self) -> CollectionKey {
        self.key
    }

    pub async fn wait(self) -> Result<(), StorageError> {
        match self.state {
            HandleState::Pending(receiver) => receiver
                .await
                .unwrap_or(Err(StorageError::WriterClosed(self.key))),
            HandleState::Failed(e) => Err(e),
        }
    }
}
