use leptos::prelude::*;
use crate::state::{ActiveView, AppState};
use crate::components::sidebar::Sidebar;
use crate::components::dashboard::Dashboard;
use crate::components::upload::UploadPage;
use crate::components::insights::Insights;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    view! {
        <div class="app">
            <Sidebar />
            <main class="main">
                {move || match state.active_view.get() {
                    ActiveView::Dashboard => view! { <Dashboard /> }.into_any(),
                    ActiveView::Upload => view! { <UploadPage /> }.into_any(),
                    ActiveView::Insights => view! { <Insights /> }.into_any(),
                }}
            </main>
        </div>
    }
}

/// Title block shared by every page.
#[component]
pub fn PageHeader(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="page-header">
            <h2>{title}</h2>
            <p class="page-subtitle">{subtitle}</p>
        </div>
    }
}
