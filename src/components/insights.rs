use leptos::prelude::*;
use pulse_core::insights::{insight_rows, SortDirection};
use pulse_core::view_state::TableState;
use crate::components::app::PageHeader;
use crate::components::skeleton::Skeleton;
use crate::state::AppState;

#[component]
pub fn Insights() -> impl IntoView {
    let state = expect_context::<AppState>();
    let direction = RwSignal::new(SortDirection::Descending);

    view! {
        <div class="page">
            <PageHeader
                title="User Insights"
                subtitle="Detailed churn predictions and recommended actions"
            />
            {move || match state.table_state() {
                TableState::Loading => view! { <TableSkeleton /> }.into_any(),
                TableState::NoResult => view! {
                    <div class="empty-card">"Upload a CSV file to view user-level insights"</div>
                }.into_any(),
                TableState::Empty => view! {
                    <div class="empty-card">"The uploaded file contained no users"</div>
                }.into_any(),
                TableState::Populated => view! { <InsightsTable direction=direction /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn InsightsTable(direction: RwSignal<SortDirection>) -> impl IntoView {
    let state = expect_context::<AppState>();

    let rows = move || {
        let result = state.result.get().unwrap_or_default();
        insight_rows(&result.data, direction.get())
            .into_iter()
            .map(|row| view! {
                <tr>
                    <td class="cell-strong">{row.user}</td>
                    <td class="cell-strong">{row.churn}</td>
                    <td><span class=row.risk_class>{row.risk_label}</span></td>
                    <td class="cell-action" title=row.reason>{row.action}</td>
                    <td class="cell-center">
                        <span class=row.anomaly.css_class() title=row.anomaly.title()>
                            {row.anomaly.glyph()}
                        </span>
                    </td>
                </tr>
            })
            .collect_view()
    };

    view! {
        <div class="table-wrap">
            <table>
                <thead>
                    <tr>
                        <th>"User ID"</th>
                        <th
                            class="sortable"
                            on:click=move |_| direction.update(|d| *d = d.toggled())
                        >
                            "Churn Probability "{move || direction.get().arrow()}
                        </th>
                        <th>"Risk Level"</th>
                        <th>"Recommended Action"</th>
                        <th class="cell-center">"Anomaly"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}

#[component]
fn TableSkeleton() -> impl IntoView {
    view! {
        <div class="table-skeleton">
            {(0..5).map(|_| view! {
                <div class="skeleton-row">
                    <Skeleton class="h-4 w-24" />
                    <Skeleton class="h-4 w-20" />
                    <Skeleton class="h-6 w-24 rounded-full" />
                    <Skeleton class="h-4 w-full" />
                    <Skeleton class="h-4 w-6 mx-auto" />
                </div>
            }).collect_view()}
        </div>
    }
}
