use leptos::prelude::*;

/// Pulsing placeholder block; `class` sets its size.
#[component]
pub fn Skeleton(#[prop(into)] class: String) -> impl IntoView {
    view! { <div class=format!("skeleton {class}") /> }
}
