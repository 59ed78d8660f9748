/// Reusable UI components for the panel.

use yew::prelude::*;

use crate::group_data::{TabGroup, TabSnapshot};

/// Format epoch milliseconds for display.
pub fn format_timestamp(ms: f64) -> String {
    chrono::DateTime::from_timestamp_millis(ms as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct GroupCardProps {
    pub group: TabGroup,
    pub onselect: Callback<TabGroup>,
}

#[function_component(GroupCard)]
pub fn group_card(props: &GroupCardProps) -> Html {
    let onclick = {
        let onselect = props.onselect.clone();
        let group = props.group.clone();
        Callback::from(move |_| onselect.emit(group.clone()))
    };

    html! {
        <div class="group-card" onclick={onclick}>
            <div class="group-card-header">
                <span class="group-name">{&props.group.name}</span>
                if props.group.favorite {
                    <span class="group-favorite">{"\u{2605}"}</span>
                }
            </div>
            <div class="group-card-meta">
                if !props.group.category.is_empty() {
                    <span class="group-category">{&props.group.category}</span>
                }
                <span class="group-tab-count">{format!("{} tabs", props.group.tabs.len())}</span>
                <span class="group-created">{format_timestamp(props.group.created_at)}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TabRowProps {
    pub tab: TabSnapshot,
    pub on_switch: Callback<i32>,
    pub on_close: Callback<i32>,
    #[prop_or(false)]
    pub selected: bool,
    /// When set, the row renders a selection checkbox.
    #[prop_or_default]
    pub on_toggle: Option<Callback<i32>>,
}

#[function_component(TabRow)]
pub fn tab_row(props: &TabRowProps) -> Html {
    let tab_id = props.tab.id;

    let on_switch = {
        let on_switch = props.on_switch.clone();
        Callback::from(move |_| on_switch.emit(tab_id))
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(tab_id))
    };

    let title = if props.tab.title.is_empty() {
        props.tab.url.clone()
    } else {
        props.tab.title.clone()
    };

    html! {
        <div class="tab-row">
            if let Some(on_toggle) = props.on_toggle.clone() {
                <input
                    type="checkbox"
                    class="tab-row-select"
                    checked={props.selected}
                    onchange={Callback::from(move |_| on_toggle.emit(tab_id))}
                />
            }
            if let Some(icon) = &props.tab.fav_icon_url {
                <img class="tab-row-icon" src={icon.clone()} alt="" />
            }
            <button class="tab-row-title" onclick={on_switch} title={props.tab.url.clone()}>
                {title}
            </button>
            <button class="tab-row-close" onclick={on_close}>{"\u{00d7}"}</button>
        </div>
    }
}
