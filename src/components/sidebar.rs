use leptos::prelude::*;
use crate::state::{ActiveView, AppState};

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <aside class="sidebar">
            <h1 class="sidebar-brand">"DecisionPulse"</h1>
            <nav class="sidebar-nav">
                {ActiveView::ALL
                    .into_iter()
                    .map(move |item| {
                        view! {
                            <button
                                class=move || {
                                    if state.active_view.get() == item { "nav-btn active" } else { "nav-btn" }
                                }
                                on:click=move |_| state.active_view.set(item)
                            >
                                <span class="nav-icon">{item.glyph()}</span>
                                {item.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}
