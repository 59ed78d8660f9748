/// Side panel view: renders the shared group snapshot plus local view
/// state, and routes every mutation through the sync controller and the
/// action proxy.

use std::collections::HashSet;
use std::rc::Rc;

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::components::{GroupCard, TabRow, format_timestamp};
use crate::actions::TabActionProxy;
use crate::bridge::{ExtensionBrowser, ExtensionClient, watch_group_storage};
use crate::group_data::{TabGroup, TabSnapshot, now_ms};
use crate::listener::ChangeListener;
use crate::state::SharedStore;
use crate::sync::GroupSyncController;
use crate::view_state::{FilterMode, PanelSummary, ViewMode, ViewState};

/// Long-lived collaborators shared by every callback in the panel.
struct PanelServices {
    store: Rc<SharedStore>,
    sync: Rc<GroupSyncController<ExtensionClient>>,
    actions: Rc<TabActionProxy<ExtensionClient, ExtensionBrowser>>,
    listener: Rc<ChangeListener<ExtensionClient>>,
}

impl PanelServices {
    fn new() -> Rc<Self> {
        let store = SharedStore::new();
        let sync = Rc::new(GroupSyncController::new(ExtensionClient, store.clone()));
        let actions = Rc::new(TabActionProxy::new(
            ExtensionClient,
            ExtensionBrowser,
            sync.clone(),
        ));
        let listener = ChangeListener::new(sync.clone());
        Rc::new(PanelServices {
            store,
            sync,
            actions,
            listener,
        })
    }
}

#[function_component(Panel)]
pub fn panel() -> Html {
    let services = use_state(PanelServices::new);
    let view = use_state(ViewState::default);
    let selected_tabs = use_state(HashSet::<i32>::new);
    let update = use_force_update();

    // Subscribe to the shared store, wire the storage change listener, and
    // kick off the initial sync. The destructor unsubscribes and marks the
    // store dead so in-flight responses arriving after unmount are ignored.
    {
        let services = (*services).clone();
        use_effect_with((), move |_| {
            let subscriber_id = services
                .store
                .subscribe(Box::new(move || update.force_update()));
            let subscription = watch_group_storage(services.listener.clone());
            {
                let sync = services.sync.clone();
                spawn_local(async move {
                    let _ = sync.sync().await;
                });
            }
            move || {
                services.store.unsubscribe(subscriber_id);
                drop(subscription);
                services.store.shutdown();
            }
        });
    }

    let state = services.store.snapshot();
    let summary = PanelSummary::of(&state.groups);
    let visible = view.visible_groups(&state.groups, now_ms());

    // Search handler
    let on_search = {
        let view = view.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*view).clone();
                next.set_search(input.value());
                view.set(next);
            }
        })
    };

    // Filter button factory
    let on_filter = {
        let view = view.clone();
        move |filter: FilterMode| {
            let view = view.clone();
            Callback::from(move |_| {
                let mut next = (*view).clone();
                next.set_filter(filter);
                view.set(next);
            })
        }
    };

    // View mode tab factory
    let on_view_mode = {
        let view = view.clone();
        move |mode: ViewMode| {
            let view = view.clone();
            Callback::from(move |_| {
                let mut next = (*view).clone();
                next.set_view_mode(mode);
                view.set(next);
            })
        }
    };

    let on_select_group = {
        let view = view.clone();
        Callback::from(move |group: TabGroup| {
            let mut next = (*view).clone();
            next.select_group(group);
            view.set(next);
        })
    };

    let on_back = {
        let view = view.clone();
        Callback::from(move |_| {
            let mut next = (*view).clone();
            next.clear_selection();
            view.set(next);
        })
    };

    let on_refresh = {
        let sync = services.sync.clone();
        Callback::from(move |_| {
            let sync = sync.clone();
            spawn_local(async move {
                let _ = sync.refresh().await;
            });
        })
    };

    let on_analyze = {
        let actions = services.actions.clone();
        Callback::from(move |_| {
            let actions = actions.clone();
            spawn_local(async move {
                let _ = actions.analyze_current_tab().await;
            });
        })
    };

    let on_options = {
        let actions = services.actions.clone();
        Callback::from(move |_| {
            let actions = actions.clone();
            spawn_local(async move {
                actions.open_options().await;
            });
        })
    };

    let on_switch_tab = {
        let actions = services.actions.clone();
        Callback::from(move |tab_id: i32| {
            let actions = actions.clone();
            spawn_local(async move {
                actions.switch_to_tab(tab_id).await;
            });
        })
    };

    let on_close_tab = {
        let actions = services.actions.clone();
        Callback::from(move |tab_id: i32| {
            let actions = actions.clone();
            spawn_local(async move {
                actions.close_tab(tab_id).await;
            });
        })
    };

    let on_open_all = {
        let actions = services.actions.clone();
        Callback::from(move |group: TabGroup| {
            let actions = actions.clone();
            spawn_local(async move {
                actions.open_all_tabs(&group).await;
            });
        })
    };

    let on_toggle_tab = {
        let selected_tabs = selected_tabs.clone();
        Callback::from(move |tab_id: i32| {
            let mut next = (*selected_tabs).clone();
            if !next.remove(&tab_id) {
                next.insert(tab_id);
            }
            selected_tabs.set(next);
        })
    };

    let on_create_group = {
        let actions = services.actions.clone();
        let selected_tabs = selected_tabs.clone();
        Callback::from(move |_| {
            let tab_ids: Vec<i32> = selected_tabs.iter().copied().collect();
            if tab_ids.is_empty() {
                return;
            }
            selected_tabs.set(HashSet::new());
            let actions = actions.clone();
            spawn_local(async move {
                actions.create_group_from_tabs(&tab_ids, None).await;
            });
        })
    };

    let filter_class = |filter: FilterMode| {
        if view.filter == filter {
            "filter-button filter-button-active"
        } else {
            "filter-button"
        }
    };

    html! {
        <div class="padding-20">
            <div class="panel-header">
                <h1 class="panel-title">{"Tab Curator"}</h1>
                <span class="panel-summary">
                    {format!(
                        "{} groups, {} tabs, {} categories",
                        summary.groups, summary.tabs, summary.categories
                    )}
                </span>
            </div>

            <div class="flex-row-gap">
                <Button onclick={on_analyze} disabled={state.loading} variant={ButtonVariant::Primary}>
                    {"Analyze current tab"}
                </Button>
                <Button onclick={on_refresh} disabled={state.refreshing} variant={ButtonVariant::Secondary}>
                    {if state.refreshing { "Refreshing..." } else { "Refresh" }}
                </Button>
                <Button onclick={on_options} variant={ButtonVariant::Link}>
                    {"Options"}
                </Button>
            </div>

            if let Some(error) = state.error.clone() {
                <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                    {error}
                </Alert>
            }

            if state.loading {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            }

            <input
                class="panel-search"
                type="text"
                placeholder="Search groups..."
                value={view.search.clone()}
                oninput={on_search}
            />

            <div class="flex-row-gap">
                <button class={filter_class(FilterMode::All)} onclick={on_filter(FilterMode::All)}>
                    {"All"}
                </button>
                <button class={filter_class(FilterMode::Recent)} onclick={on_filter(FilterMode::Recent)}>
                    {"Recent"}
                </button>
                <button class={filter_class(FilterMode::Favorites)} onclick={on_filter(FilterMode::Favorites)}>
                    {"Favorites"}
                </button>
            </div>

            // View mode navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    <li class={if view.view_mode == ViewMode::Groups { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                        <button class="pf-v5-c-tabs__link" onclick={on_view_mode(ViewMode::Groups)}>
                            <span class="pf-v5-c-tabs__item-text">{"Groups"}</span>
                        </button>
                    </li>
                    <li class={if view.view_mode == ViewMode::Tabs { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                        <button class="pf-v5-c-tabs__link" onclick={on_view_mode(ViewMode::Tabs)}>
                            <span class="pf-v5-c-tabs__item-text">{"Tabs"}</span>
                        </button>
                    </li>
                </ul>
            </div>

            <div class="tab-pane-content">
                if let Some(selected) = view.selected.clone() {
                    {render_group_detail(&selected, &on_back, &on_open_all, &on_switch_tab, &on_close_tab)}
                } else {
                    {match view.view_mode {
                        ViewMode::Groups => render_group_list(&visible, &on_select_group),
                        ViewMode::Tabs => render_tab_list(
                            &visible,
                            &selected_tabs,
                            &on_toggle_tab,
                            &on_create_group,
                            &on_switch_tab,
                            &on_close_tab,
                        ),
                    }}
                }
            </div>

            <p class="footer-panel">
                {"Tab Curator v0.1.0"}
            </p>
        </div>
    }
}

fn render_group_list(groups: &[TabGroup], onselect: &Callback<TabGroup>) -> Html {
    if groups.is_empty() {
        return html! {
            <p class="empty-state">{"No groups to show."}</p>
        };
    }
    html! {
        <div class="flex-column-gap">
            {for groups.iter().map(|group| html! {
                <GroupCard key={group.id.clone()} group={group.clone()} onselect={onselect.clone()} />
            })}
        </div>
    }
}

fn render_group_detail(
    group: &TabGroup,
    on_back: &Callback<MouseEvent>,
    on_open_all: &Callback<TabGroup>,
    on_switch: &Callback<i32>,
    on_close: &Callback<i32>,
) -> Html {
    let open_all = {
        let on_open_all = on_open_all.clone();
        let group = group.clone();
        Callback::from(move |_| on_open_all.emit(group.clone()))
    };

    html! {
        <div class="group-detail">
            <button class="back-button" onclick={on_back.clone()}>{"\u{2190} Back"}</button>
            <h2 class="group-detail-name">{&group.name}</h2>
            <div class="group-card-meta">
                if !group.category.is_empty() {
                    <span class="group-category">{&group.category}</span>
                }
                <span class="group-created">{format_timestamp(group.created_at)}</span>
            </div>
            <Button onclick={open_all} variant={ButtonVariant::Secondary} block={true}>
                {format!("Open all {} tabs", group.tabs.iter().filter(|t| !t.url.is_empty()).count())}
            </Button>
            <div class="flex-column-gap">
                {for group.tabs.iter().map(|tab| html! {
                    <TabRow
                        key={tab.id}
                        tab={tab.clone()}
                        on_switch={on_switch.clone()}
                        on_close={on_close.clone()}
                    />
                })}
            </div>
        </div>
    }
}

fn render_tab_list(
    groups: &[TabGroup],
    selected: &HashSet<i32>,
    on_toggle: &Callback<i32>,
    on_create_group: &Callback<MouseEvent>,
    on_switch: &Callback<i32>,
    on_close: &Callback<i32>,
) -> Html {
    let tabs: Vec<&TabSnapshot> = groups.iter().flat_map(|group| group.tabs.iter()).collect();
    if tabs.is_empty() {
        return html! {
            <p class="empty-state">{"No tabs to show."}</p>
        };
    }

    html! {
        <div class="flex-column-gap">
            <Button
                onclick={on_create_group.clone()}
                disabled={selected.is_empty()}
                variant={ButtonVariant::Secondary}
                block={true}
            >
                {format!("New group from {} selected", selected.len())}
            </Button>
            {for tabs.iter().map(|tab| html! {
                <TabRow
                    key={tab.id}
                    tab={(*tab).clone()}
                    selected={selected.contains(&tab.id)}
                    on_toggle={Some(on_toggle.clone())}
                    on_switch={on_switch.clone()}
                    on_close={on_close.clone()}
                />
            })}
        </div>
    }
}
