use leptos::prelude::*;
use pulse_core::metrics::{risk_distribution, DashboardStats};
use pulse_core::view_state::DisplayState;
use crate::components::app::PageHeader;
use crate::components::risk_distribution::RiskDistribution;
use crate::components::skeleton::Skeleton;
use crate::state::AppState;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="page">
            <PageHeader
                title="Dashboard"
                subtitle="Overview of user behavior analytics and churn insights"
            />
            {move || match state.display_state() {
                DisplayState::NoResult => view! {
                    <div class="empty-card">"Upload a CSV file to get started"</div>
                }.into_any(),
                DisplayState::Loading => view! { <DashboardSkeleton /> }.into_any(),
                DisplayState::Ready => {
                    let result = state.result.get().unwrap_or_default();
                    let stats = DashboardStats::from_records(&result.data);
                    let buckets = risk_distribution(&result.data);
                    view! {
                        <div class="stat-grid">
                            {stats.cards().into_iter().map(|card| view! {
                                <div class="stat-card">
                                    <div class="stat-card-head">
                                        <p class="stat-label">{card.label}</p>
                                        <span class="stat-icon">{card.icon.glyph()}</span>
                                    </div>
                                    <p class="stat-value">{card.value}</p>
                                </div>
                            }).collect_view()}
                        </div>
                        <RiskDistribution buckets=buckets />
                    }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn DashboardSkeleton() -> impl IntoView {
    view! {
        <div class="stat-grid">
            {(0..4).map(|_| view! {
                <div class="stat-card skeleton-card">
                    <Skeleton class="h-4 w-half" />
                    <Skeleton class="h-8 w-third" />
                </div>
            }).collect_view()}
        </div>
        <div class="chart-card">
            <Skeleton class="h-5 w-48 mb-6" />
            <Skeleton class="h-full w-full" />
        </div>
    }
}
