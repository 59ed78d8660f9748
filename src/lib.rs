/// Tab Curator - browser extension side panel for tab groups
/// Built with Rust + WASM + Yew
///
/// The panel renders a point-in-time projection of tab groups owned by an
/// external background process and reconciles it over a message-passing
/// bridge: fetch, normalize, replace wholesale. The reconciliation logic is
/// target-independent; only the JS bridge and the Yew view are wasm-only.

pub mod actions;
pub mod errors;
pub mod group_data;
pub mod listener;
pub mod messaging;
pub mod state;
pub mod sync;
pub mod view_state;

#[cfg(target_arch = "wasm32")]
pub mod bridge;
#[cfg(target_arch = "wasm32")]
pub mod ui;

#[cfg(test)]
mod test_util;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the side panel
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_panel() {
    yew::Renderer::<ui::panel::Panel>::new().render();
}
