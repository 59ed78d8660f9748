/// Yew view layer for the side panel.
pub mod components;
pub mod panel;
