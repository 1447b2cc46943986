use futures::future::{BoxFuture, FutureExt};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::waitlist_models::WaitlistEntry;

/// Durable destination for waitlist entries.
///
/// Entries are only ever appended; nothing in the service reads them back.
/// There is no deduplication, so submitting the same address twice yields
/// two rows.
pub trait WaitlistStore: Send + Sync {
    fn append(&self, entry: WaitlistEntry) -> BoxFuture<'_, Result<(), StoreError>>;
}

/// In-process store used for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<WaitlistEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().await.clone()
    }
}

impl WaitlistStore for MemoryStore {
    fn append(&self, entry: WaitlistEntry) -> BoxFuture<'_, Result<(), StoreError>> {
        async move {
            self.entries.lock().await.push(entry);
            Ok(())
        }
        .boxed()
    }
}
