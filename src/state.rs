use std::sync::Arc;

use leptos::prelude::*;
use pulse_core::view_state::{DisplayState, TableState};
use pulse_core::{AnalysisResult, ResultStore};

use crate::api::UploadHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Upload,
    Insights,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [Self::Dashboard, Self::Upload, Self::Insights];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Upload => "Upload",
            Self::Insights => "Insights",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Dashboard => "\u{25A6}",
            Self::Upload => "\u{21EA}",
            Self::Insights => "\u{2630}",
        }
    }
}

/// Session state, created once in `App` and shared through context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub result: RwSignal<Option<Arc<AnalysisResult>>>,
    pub loading: RwSignal<bool>,
    pub active_view: RwSignal<ActiveView>,
    generation: StoredValue<u64>,
    in_flight: StoredValue<Option<UploadHandle>, LocalStorage>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            result: RwSignal::new(None),
            loading: RwSignal::new(false),
            active_view: RwSignal::new(ActiveView::Dashboard),
            generation: StoredValue::new(0),
            in_flight: StoredValue::new_local(None),
        }
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::select(self.result.with(Option::is_some), self.loading.get())
    }

    pub fn table_state(&self) -> TableState {
        let rows = self.result.with(|r| r.as_ref().map(|r| r.len()));
        TableState::select(rows, self.loading.get())
    }

    /// Track a new request, aborting whichever one it replaces.
    pub fn replace_in_flight(&self, handle: UploadHandle) {
        let previous = self.in_flight.try_update_value(|slot| slot.replace(handle)).flatten();
        if let Some(previous) = previous {
            log::info!("Aborting previous upload");
            previous.abort();
        }
    }

    /// Abort the current request, if any. Its submission then resolves as
    /// cancelled and releases the loading flag.
    pub fn cancel_upload(&self) {
        if let Some(handle) = self.in_flight.try_update_value(Option::take).flatten() {
            handle.abort();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore for AppState {
    fn result(&self) -> Option<Arc<AnalysisResult>> {
        self.result.get_untracked()
    }

    fn set_result(&self, result: Arc<AnalysisResult>) {
        self.result.set(Some(result));
    }

    fn is_loading(&self) -> bool {
        self.loading.get_untracked()
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    fn generation(&self) -> u64 {
        self.generation.get_value()
    }

    fn set_generation(&self, generation: u64) {
        self.generation.set_value(generation);
    }
}
