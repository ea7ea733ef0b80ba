pub mod api;
pub mod canvas;
pub mod components;
pub mod state;

use leptos::prelude::*;
use components::app::App;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("DecisionPulse API at {}", api::api_config().base_url());
    mount_to_body(App);
}
