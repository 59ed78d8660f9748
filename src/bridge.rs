/// JS bridge to the extension background process and browser tab APIs.
///
/// The panel talks to its data source through `panel.js`, which wraps
/// `chrome.runtime.sendMessage`, `chrome.tabs.*`, and the storage change
/// event for the group storage key.
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::errors::{ActionError, SyncError};
use crate::group_data::{GroupsResponse, TabSnapshot};
use crate::listener::ChangeListener;
use crate::messaging::{BrowserTabs, GROUPS_STORAGE_KEY, MessagingClient, Request};

#[wasm_bindgen(module = "/panel.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn sendPanelMessage(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn activateTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn closeTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str, active: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openOptionsPage() -> Result<(), JsValue>;

    fn subscribeStorageChanges(key: &str, callback: &js_sys::Function) -> JsValue;

    fn unsubscribeStorageChanges(handle: &JsValue);
}

async fn send_request(request: &Request) -> Result<JsValue, SyncError> {
    let message = serde_wasm_bindgen::to_value(request)
        .map_err(|err| SyncError::Malformed(format!("{err:?}")))?;
    sendPanelMessage(message)
        .await
        .map_err(|err| SyncError::Transport(format!("{err:?}")))
}

/// Messaging client backed by the extension runtime.
#[derive(Clone, Copy, Default)]
pub struct ExtensionClient;

impl MessagingClient for ExtensionClient {
    async fn get_groups(&self) -> Result<GroupsResponse, SyncError> {
        let raw = send_request(&Request::GetGroups).await?;
        serde_wasm_bindgen::from_value(raw)
            .map_err(|err| SyncError::Malformed(format!("{err:?}")))
    }

    async fn analyze_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        send_request(&Request::AnalyzeTab { tab_id })
            .await
            .map(|_| ())
            .map_err(|err| ActionError::Failed(err.to_string()))
    }

    async fn create_group(&self, tab_ids: &[i32], name: &str) -> Result<(), ActionError> {
        let request = Request::CreateGroup {
            tab_ids: tab_ids.to_vec(),
            name: name.to_string(),
        };
        send_request(&request)
            .await
            .map(|_| ())
            .map_err(|err| ActionError::Failed(err.to_string()))
    }
}

/// Browser tab surface backed by `chrome.tabs`.
#[derive(Clone, Copy, Default)]
pub struct ExtensionBrowser;

impl BrowserTabs for ExtensionBrowser {
    async fn active_tab(&self) -> Result<Option<i32>, ActionError> {
        let raw = getActiveTab()
            .await
            .map_err(|err| ActionError::Failed(format!("{err:?}")))?;
        if raw.is_null() || raw.is_undefined() {
            return Ok(None);
        }
        let tab: TabSnapshot = serde_wasm_bindgen::from_value(raw)
            .map_err(|err| ActionError::Failed(format!("{err:?}")))?;
        Ok(Some(tab.id))
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        activateTab(tab_id)
            .await
            .map_err(|err| ActionError::Failed(format!("{err:?}")))
    }

    async fn close_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        closeTab(tab_id)
            .await
            .map_err(|err| ActionError::Failed(format!("{err:?}")))
    }

    async fn create_tab(&self, url: &str, active: bool) -> Result<(), ActionError> {
        createTab(url, active)
            .await
            .map_err(|err| ActionError::Failed(format!("{err:?}")))
    }

    async fn open_options_page(&self) -> Result<(), ActionError> {
        openOptionsPage()
            .await
            .map_err(|err| ActionError::Failed(format!("{err:?}")))
    }
}

/// RAII handle for the storage change subscription; dropping it
/// unsubscribes, so no listener outlives the panel.
pub struct StorageSubscription {
    handle: JsValue,
    _callback: Closure<dyn Fn(JsValue)>,
}

impl Drop for StorageSubscription {
    fn drop(&mut self) {
        unsubscribeStorageChanges(&self.handle);
    }
}

/// Wire the group storage key to the change listener.
pub fn watch_group_storage<M: MessagingClient + 'static>(
    listener: Rc<ChangeListener<M>>,
) -> StorageSubscription {
    let callback = Closure::wrap(Box::new(move |key: JsValue| {
        let listener = listener.clone();
        let key = key.as_string().unwrap_or_default();
        spawn_local(async move {
            listener.on_storage_changed(&key).await;
        });
    }) as Box<dyn Fn(JsValue)>);
    let handle = subscribeStorageChanges(GROUPS_STORAGE_KEY, callback.as_ref().unchecked_ref());
    StorageSubscription {
        handle,
        _callback: callback,
    }
}
