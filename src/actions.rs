/// User-initiated tab and group operations, forwarded to the data source
/// and the browser API.
///
/// Everything here is best-effort: failures are logged and, except for the
/// analyze flow, never surfaced to the user. Group-membership changes are
/// reflected either by an explicit follow-up sync (local-initiated
/// mutations) or by the passive change listener (tab closure).
use std::rc::Rc;

use chrono::Utc;

use crate::errors::{ActionError, NoActiveTabError};
use crate::group_data::TabGroup;
use crate::messaging::{BrowserTabs, MessagingClient};
use crate::state::SharedStore;
use crate::sync::GroupSyncController;

pub struct TabActionProxy<M: MessagingClient, B: BrowserTabs> {
    client: M,
    browser: B,
    sync: Rc<GroupSyncController<M>>,
    store: Rc<SharedStore>,
}

impl<M: MessagingClient, B: BrowserTabs> TabActionProxy<M, B> {
    pub fn new(client: M, browser: B, sync: Rc<GroupSyncController<M>>) -> Self {
        let store = sync.store().clone();
        TabActionProxy {
            client,
            browser,
            sync,
            store,
        }
    }

    /// Activate the given tab. No re-sync: activation does not change
    /// group membership.
    pub async fn switch_to_tab(&self, tab_id: i32) {
        if let Err(err) = self.browser.activate_tab(tab_id).await {
            log::warn!("failed to switch to tab {tab_id}: {err}");
        }
    }

    /// Close the given tab. The resulting group-size change is picked up
    /// by the storage change listener, not by an explicit sync here.
    pub async fn close_tab(&self, tab_id: i32) {
        if let Err(err) = self.browser.close_tab(tab_id).await {
            log::warn!("failed to close tab {tab_id}: {err}");
        }
    }

    /// Open every tab in the group that has a non-empty URL, sequentially
    /// and inactive so the panel stays visible. Individual failures are
    /// skipped, never aborting the remainder.
    pub async fn open_all_tabs(&self, group: &TabGroup) {
        for tab in &group.tabs {
            if tab.url.is_empty() {
                continue;
            }
            if let Err(err) = self.browser.create_tab(&tab.url, false).await {
                log::warn!("failed to open tab {:?}: {err}", tab.url);
            }
        }
    }

    /// Request group creation from the given tabs, then sync once
    /// unconditionally so the new group shows up without waiting for an
    /// external change notification.
    pub async fn create_group_from_tabs(&self, tab_ids: &[i32], name: Option<String>) {
        let name = name
            .unwrap_or_else(|| format!("Group {}", Utc::now().format("%Y-%m-%d %H:%M:%S")));
        if let Err(err) = self.client.create_group(tab_ids, &name).await {
            log::warn!("failed to create group {name:?}: {err}");
        }
        let _ = self.sync.sync().await;
    }

    /// Classify the active tab and sync to reveal any newly created group.
    /// Fails with [`NoActiveTabError`] when the current window has no
    /// active tab; any failure surfaces a generic error message. The
    /// shared loading flag spans the whole operation.
    pub async fn analyze_current_tab(&self) -> Result<(), ActionError> {
        self.store.set_loading(true);
        let result = self.analyze_inner().await;
        if let Err(err) = &result {
            log::error!("analyze current tab failed: {err}");
            self.store.set_error("Failed to analyze the current tab");
        }
        self.store.set_loading(false);
        result
    }

    async fn analyze_inner(&self) -> Result<(), ActionError> {
        let tab_id = self.browser.active_tab().await?.ok_or(NoActiveTabError)?;
        self.client.analyze_tab(tab_id).await?;
        let _ = self.sync.sync().await;
        Ok(())
    }

    /// Open the extension options page, best-effort.
    pub async fn open_options(&self) {
        if let Err(err) = self.browser.open_options_page().await {
            log::warn!("failed to open options page: {err}");
        }
    }
}
