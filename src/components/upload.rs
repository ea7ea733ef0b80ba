use leptos::prelude::*;
use leptos::task::spawn_local;
use pulse_core::submit;
use pulse_core::upload::EXPECTED_COLUMNS;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement, MouseEvent};
use crate::api::{api_config, BrowserTransport};
use crate::components::app::PageHeader;
use crate::state::AppState;

#[component]
pub fn UploadPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let selected: RwSignal<Option<File>, LocalStorage> = RwSignal::new_local(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading = state.loading;

    let on_file_change = move |ev: web_sys::Event| {
        let Some(target) = ev.target() else { return };
        let input: HtmlInputElement = target.unchecked_into();
        let file = input.files().and_then(|list| list.get(0));
        selected.set(file);
    };

    let on_upload = move |_: MouseEvent| {
        error.set(None);
        let file = selected.get_untracked();
        spawn_local(async move {
            let transport = BrowserTransport::new(state);
            match submit(&state, &transport, &api_config(), file.as_ref()).await {
                Ok(result) => log::info!("Upload complete: {} users", result.len()),
                // The page may have been left while the request ran.
                Err(e) => {
                    let _ = error.try_set(e.user_message());
                }
            }
        });
    };

    let on_cancel = move |_: MouseEvent| state.cancel_upload();

    view! {
        <div class="page page-narrow">
            <PageHeader
                title="Upload Data"
                subtitle="Import user behavior data for churn analysis"
            />
            <div class="upload-card">
                <div class="drop-zone">
                    <span class="drop-icon">"\u{21EA}"</span>
                    <input
                        type="file"
                        accept=".csv"
                        disabled=move || loading.get()
                        on:change=on_file_change
                    />
                    {move || selected.with(|f| f.as_ref().map(File::name)).map(|name| view! {
                        <p class="selected-file">
                            "Selected file: "<span>{name}</span>
                        </p>
                    })}
                </div>

                {move || error.get().map(|msg| view! { <div class="upload-error">{msg}</div> })}

                <div class="csv-format">
                    <p>"Expected CSV columns:"</p>
                    <code>{EXPECTED_COLUMNS.join(", ")}</code>
                </div>

                <button
                    class="upload-btn"
                    on:click=on_upload
                    disabled=move || loading.get()
                >
                    {move || if loading.get() { "Processing data..." } else { "Upload CSV" }}
                </button>
                {move || loading.get().then(|| view! {
                    <button class="cancel-btn" on:click=on_cancel>"Cancel"</button>
                })}
            </div>
        </div>
    }
}
