/// Group synchronization: fetches the merged group set from the data
/// source, normalizes it, and publishes it into the shared store.
use std::rc::Rc;

use crate::errors::SyncError;
use crate::group_data::{TabGroup, now_ms};
use crate::messaging::MessagingClient;
use crate::state::SharedStore;

/// Fetch-and-publish controller. Sync is idempotent: every call replaces
/// the shared snapshot wholesale on success and leaves it untouched on
/// failure. There is no automatic retry; recovery is the next explicit or
/// listener-triggered sync.
pub struct GroupSyncController<M: MessagingClient> {
    client: M,
    store: Rc<SharedStore>,
}

impl<M: MessagingClient> GroupSyncController<M> {
    pub fn new(client: M, store: Rc<SharedStore>) -> Self {
        GroupSyncController { client, store }
    }

    pub fn store(&self) -> &Rc<SharedStore> {
        &self.store
    }

    /// Sync triggered by initial load, the change listener, or a mutation.
    pub async fn sync(&self) -> Result<Vec<TabGroup>, SyncError> {
        self.run(false).await
    }

    /// Sync triggered by the explicit refresh action; additionally raises
    /// the `refreshing` flag so the view can distinguish it from the
    /// initial load.
    pub async fn refresh(&self) -> Result<Vec<TabGroup>, SyncError> {
        self.run(true).await
    }

    async fn run(&self, refreshing: bool) -> Result<Vec<TabGroup>, SyncError> {
        let generation = self.store.begin_sync(refreshing);
        let outcome = self.client.get_groups().await.map(|response| {
            let now = now_ms();
            response
                .groups
                .into_iter()
                .map(|record| record.into_group(now))
                .collect::<Vec<TabGroup>>()
        });
        match &outcome {
            Ok(groups) => {
                self.store.finish_sync(generation, Ok(groups.clone()));
            }
            Err(err) => {
                log::error!("group sync failed: {err}");
                self.store
                    .finish_sync(generation, Err("Failed to load tab groups".to_string()));
            }
        }
        outcome
    }
}
