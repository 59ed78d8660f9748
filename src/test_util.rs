/// Shared fixtures and mock collaborators for the reconciliation tests.
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use futures::channel::oneshot;

use crate::errors::{ActionError, SyncError};
use crate::group_data::{GroupsResponse, RawGroupRecord, TabGroup, TabSnapshot};
use crate::messaging::{BrowserTabs, MessagingClient};

pub(crate) fn group(id: &str, name: &str) -> TabGroup {
    TabGroup {
        id: id.to_string(),
        name: name.to_string(),
        category: String::new(),
        tabs: Vec::new(),
        favorite: false,
        created_at: 0.0,
        last_updated: 0.0,
    }
}

pub(crate) fn tab(id: i32, url: &str) -> TabSnapshot {
    TabSnapshot {
        id,
        title: format!("tab-{id}"),
        url: url.to_string(),
        fav_icon_url: None,
    }
}

pub(crate) fn raw_group(id: &str, name: &str) -> RawGroupRecord {
    RawGroupRecord {
        id: id.to_string(),
        name: name.to_string(),
        tabs: Vec::new(),
        category: String::new(),
        favorite: false,
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn response(records: Vec<RawGroupRecord>) -> GroupsResponse {
    GroupsResponse { groups: records }
}

/// Messaging mock that answers immediately from scripted queues.
/// An empty queue means "succeed with defaults".
#[derive(Default)]
pub(crate) struct MockClient {
    pub get_groups_calls: Cell<usize>,
    pub groups_results: RefCell<VecDeque<Result<GroupsResponse, SyncError>>>,
    pub analyze_calls: RefCell<Vec<i32>>,
    pub analyze_results: RefCell<VecDeque<Result<(), ActionError>>>,
    pub create_calls: RefCell<Vec<(Vec<i32>, String)>>,
    pub create_results: RefCell<VecDeque<Result<(), ActionError>>>,
}

impl MessagingClient for MockClient {
    async fn get_groups(&self) -> Result<GroupsResponse, SyncError> {
        self.get_groups_calls.set(self.get_groups_calls.get() + 1);
        self.groups_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(response(Vec::new())))
    }

    async fn analyze_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        self.analyze_calls.borrow_mut().push(tab_id);
        self.analyze_results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn create_group(&self, tab_ids: &[i32], name: &str) -> Result<(), ActionError> {
        self.create_calls
            .borrow_mut()
            .push((tab_ids.to_vec(), name.to_string()));
        self.create_results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// Messaging mock whose `GET_GROUPS` responses stay pending until the test
/// resolves the matching oneshot sender, for interleaving in-flight syncs.
#[derive(Default)]
pub(crate) struct ChannelClient {
    pub get_groups_calls: Cell<usize>,
    pub pending: RefCell<VecDeque<oneshot::Receiver<Result<GroupsResponse, SyncError>>>>,
}

impl ChannelClient {
    pub(crate) fn enqueue(&self) -> oneshot::Sender<Result<GroupsResponse, SyncError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(rx);
        tx
    }
}

impl MessagingClient for ChannelClient {
    async fn get_groups(&self) -> Result<GroupsResponse, SyncError> {
        self.get_groups_calls.set(self.get_groups_calls.get() + 1);
        let receiver = self
            .pending
            .borrow_mut()
            .pop_front()
            .expect("unexpected GET_GROUPS request");
        receiver.await.expect("response sender dropped")
    }

    async fn analyze_tab(&self, _tab_id: i32) -> Result<(), ActionError> {
        panic!("unexpected ANALYZE_TAB request");
    }

    async fn create_group(&self, _tab_ids: &[i32], _name: &str) -> Result<(), ActionError> {
        panic!("unexpected CREATE_GROUP request");
    }
}

/// Browser-API mock recording every command it receives.
pub(crate) struct MockBrowser {
    pub active: RefCell<Result<Option<i32>, ActionError>>,
    pub activated: RefCell<Vec<i32>>,
    pub activate_results: RefCell<VecDeque<Result<(), ActionError>>>,
    pub closed: RefCell<Vec<i32>>,
    pub close_results: RefCell<VecDeque<Result<(), ActionError>>>,
    pub created: RefCell<Vec<(String, bool)>>,
    pub create_results: RefCell<VecDeque<Result<(), ActionError>>>,
    pub options_opened: Cell<usize>,
}

impl Default for MockBrowser {
    fn default() -> Self {
        MockBrowser {
            active: RefCell::new(Ok(None)),
            activated: RefCell::new(Vec::new()),
            activate_results: RefCell::new(VecDeque::new()),
            closed: RefCell::new(Vec::new()),
            close_results: RefCell::new(VecDeque::new()),
            created: RefCell::new(Vec::new()),
            create_results: RefCell::new(VecDeque::new()),
            options_opened: Cell::new(0),
        }
    }
}

impl MockBrowser {
    pub(crate) fn with_active_tab(tab_id: i32) -> Self {
        let browser = MockBrowser::default();
        *browser.active.borrow_mut() = Ok(Some(tab_id));
        browser
    }
}

impl BrowserTabs for MockBrowser {
    async fn active_tab(&self) -> Result<Option<i32>, ActionError> {
        self.active.borrow().clone()
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        self.activated.borrow_mut().push(tab_id);
        self.activate_results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn close_tab(&self, tab_id: i32) -> Result<(), ActionError> {
        self.closed.borrow_mut().push(tab_id);
        self.close_results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn create_tab(&self, url: &str, active: bool) -> Result<(), ActionError> {
        self.created.borrow_mut().push((url.to_string(), active));
        self.create_results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn open_options_page(&self) -> Result<(), ActionError> {
        self.options_opened.set(self.options_opened.get() + 1);
        Ok(())
    }
}
