/// Local, ephemeral view state for the panel: search text, filter, view
/// mode, and the selected group. Never persisted; resets on re-mount.
use crate::group_data::TabGroup;

/// Groups whose `created_at` falls within this window count as "recent".
pub const RECENT_WINDOW_MS: f64 = 3.0 * 24.0 * 60.0 * 60.0 * 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Recent,
    Favorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Groups,
    Tabs,
}

/// Panel-local UI state.
///
/// `selected` is a value copy captured at selection time; it does not
/// track later syncs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub search: String,
    pub filter: FilterMode,
    pub view_mode: ViewMode,
    pub selected: Option<TabGroup>,
}

impl ViewState {
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn select_group(&mut self, group: TabGroup) {
        self.selected = Some(group);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Apply search and filter to a group snapshot, preserving order.
    pub fn visible_groups(&self, groups: &[TabGroup], now: f64) -> Vec<TabGroup> {
        groups
            .iter()
            .filter(|group| matches_search(group, &self.search))
            .filter(|group| matches_filter(group, self.filter, now))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring match on the group name only.
pub fn matches_search(group: &TabGroup, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    group.name.to_lowercase().contains(&query.to_lowercase())
}

pub fn matches_filter(group: &TabGroup, filter: FilterMode, now: f64) -> bool {
    match filter {
        FilterMode::All => true,
        FilterMode::Recent => group.created_at > now - RECENT_WINDOW_MS,
        FilterMode::Favorites => group.favorite,
    }
}

/// Header counts derived from the current group snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelSummary {
    pub groups: usize,
    pub tabs: usize,
    pub categories: usize,
}

impl PanelSummary {
    pub fn of(groups: &[TabGroup]) -> Self {
        let tabs = groups.iter().map(|group| group.tabs.len()).sum();
        let mut categories: Vec<&str> = groups
            .iter()
            .map(|group| group.category.as_str())
            .filter(|category| !category.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        PanelSummary {
            groups: groups.len(),
            tabs,
            categories: categories.len(),
        }
    }
}
