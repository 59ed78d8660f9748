/// Messaging contract between the panel and the background data source,
/// plus the browser-API surface the panel consumes.
///
/// Both collaborators are traits so the reconciliation logic can be
/// exercised natively against mocks; the wasm bridge provides the real
/// implementations.
use std::rc::Rc;

use serde::Serialize;

use crate::errors::{ActionError, SyncError};
use crate::group_data::GroupsResponse;

/// Storage key whose change notifications carry group mutations.
pub const GROUPS_STORAGE_KEY: &str = "tabGroups";

/// Tagged-union request payload sent over the messaging bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum Request {
    #[serde(rename = "GET_GROUPS")]
    GetGroups,
    #[serde(rename = "ANALYZE_TAB")]
    AnalyzeTab {
        #[serde(rename = "tabId")]
        tab_id: i32,
    },
    #[serde(rename = "CREATE_GROUP")]
    CreateGroup {
        #[serde(rename = "tabIds")]
        tab_ids: Vec<i32>,
        name: String,
    },
}

/// Request/response client for the background data source.
#[allow(async_fn_in_trait)]
pub trait MessagingClient {
    /// Fetch the merged set of native and custom groups.
    async fn get_groups(&self) -> Result<GroupsResponse, SyncError>;

    /// Ask the data source to classify the given tab. The result beyond
    /// success/failure is unused by the panel.
    async fn analyze_tab(&self, tab_id: i32) -> Result<(), ActionError>;

    /// Ask the data source to create a named group from the given tabs.
    async fn create_group(&self, tab_ids: &[i32], name: &str) -> Result<(), ActionError>;
}

/// Browser tab surface consumed by the panel.
#[allow(async_fn_in_trait)]
pub trait BrowserTabs {
    /// Resolve the active tab id in the current window, if any.
    async fn active_tab(&self) -> Result<Option<i32>, ActionError>;

    async fn activate_tab(&self, tab_id: i32) -> Result<(), ActionError>;

    async fn close_tab(&self, tab_id: i32) -> Result<(), ActionError>;

    /// Create a tab for `url`; `active = false` keeps the panel focused.
    async fn create_tab(&self, url: &str, active: bool) -> Result<(), ActionError>;

    async fn open_options_page(&self) -> Result<(), ActionError>;
}

impl<C: MessagingClient> MessagingClient for Rc<C> {
    async fn get_groups(&self) -> Result<GroupsResponse, SyncError> {
        (**self).get_groups().await
    }

    async fn analyze_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        (**self).analyze_tab(tab_id).await
    }

    async fn create_group(&self, tab_ids: &[i32], name: &str) -> Result<(), ActionError> {
        (**self).create_group(tab_ids, name).await
    }
}

impl<B: BrowserTabs> BrowserTabs for Rc<B> {
    async fn active_tab(&self) -> Result<Option<i32>, ActionError> {
        (**self).active_tab().await
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        (**self).activate_tab(tab_id).await
    }

    async fn close_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        (**self).close_tab(tab_id).await
    }

    async fn create_tab(&self, url: &str, active: bool) -> Result<(), ActionError> {
        (**self).create_tab(url, active).await
    }

    async fn open_options_page(&self) -> Result<(), ActionError> {
        (**self).open_options_page().await
    }
}
