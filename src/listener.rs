/// Passive re-sync on external storage mutations.
///
/// The background data source persists groups under a known storage key;
/// whenever that key changes, the panel re-fetches without user action.
/// An in-flight guard coalesces notification storms: sync is idempotent,
/// so skipping a notification while one listener-triggered sync is still
/// pending loses nothing.
use std::cell::Cell;
use std::rc::Rc;

use crate::messaging::{GROUPS_STORAGE_KEY, MessagingClient};
use crate::sync::GroupSyncController;

pub struct ChangeListener<M: MessagingClient> {
    sync: Rc<GroupSyncController<M>>,
    in_flight: Cell<bool>,
}

impl<M: MessagingClient> ChangeListener<M> {
    pub fn new(sync: Rc<GroupSyncController<M>>) -> Rc<Self> {
        Rc::new(ChangeListener {
            sync,
            in_flight: Cell::new(false),
        })
    }

    /// Handle one storage-change notification. Notifications for keys
    /// other than the group storage key are ignored.
    pub async fn on_storage_changed(&self, key: &str) {
        if key != GROUPS_STORAGE_KEY {
            return;
        }
        if self.in_flight.replace(true) {
            log::debug!("group sync already in flight, skipping notification");
            return;
        }
        let _ = self.sync.sync().await;
        self.in_flight.set(false);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::{LocalPool, block_on};
    use futures::task::LocalSpawnExt;

    use super::*;
    use crate::state::SharedStore;
    use crate::test_util::{ChannelClient, MockClient, raw_group, response};

    #[test]
    fn test_notification_for_group_key_triggers_sync() {
        let client = Rc::new(MockClient::default());
        client
            .groups_results
            .borrow_mut()
            .push_back(Ok(response(vec![raw_group("1", "Synced")])));
        let sync = Rc::new(GroupSyncController::new(client.clone(), SharedStore::new()));
        let listener = ChangeListener::new(sync.clone());

        block_on(listener.on_storage_changed(GROUPS_STORAGE_KEY));

        assert_eq!(client.get_groups_calls.get(), 1);
        assert_eq!(sync.store().snapshot().groups[0].name, "Synced");
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let client = Rc::new(MockClient::default());
        let sync = Rc::new(GroupSyncController::new(client.clone(), SharedStore::new()));
        let listener = ChangeListener::new(sync);

        block_on(listener.on_storage_changed("settings"));

        assert_eq!(client.get_groups_calls.get(), 0);
    }

    #[test]
    fn test_overlapping_notifications_are_coalesced() {
        let client = Rc::new(ChannelClient::default());
        let sender = client.enqueue();
        let sync = Rc::new(GroupSyncController::new(client.clone(), SharedStore::new()));
        let listener = ChangeListener::new(sync);

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..3 {
            let listener = listener.clone();
            spawner
                .spawn_local(async move {
                    listener.on_storage_changed(GROUPS_STORAGE_KEY).await;
                })
                .unwrap();
        }
        pool.run_until_stalled();

        // Only the first notification issued a request.
        assert_eq!(client.get_groups_calls.get(), 1);

        sender.send(Ok(response(Vec::new()))).unwrap();
        pool.run_until_stalled();

        // Once the guard clears, the next notification syncs again.
        let followup = client.enqueue();
        {
            let listener = listener.clone();
            spawner
                .spawn_local(async move {
                    listener.on_storage_changed(GROUPS_STORAGE_KEY).await;
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(client.get_groups_calls.get(), 2);
        followup.send(Ok(response(Vec::new()))).unwrap();
        pool.run_until_stalled();
    }
}
