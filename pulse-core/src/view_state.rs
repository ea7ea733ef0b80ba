//! Which placeholder or content a view shows for a given store snapshot.
//!
//! Both views share the same three-way model: an upload in flight always
//! wins, then the absence of any result, then the content itself.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayState {
    /// Nothing uploaded yet and nothing in flight.
    NoResult,
    Loading,
    Ready,
}

impl DisplayState {
    pub fn select(has_result: bool, loading: bool) -> Self {
        if loading {
            Self::Loading
        } else if has_result {
            Self::Ready
        } else {
            Self::NoResult
        }
    }
}

/// Detail table states; `Ready` is split by whether there are rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableState {
    NoResult,
    Loading,
    Empty,
    Populated,
}

impl TableState {
    pub fn select(row_count: Option<usize>, loading: bool) -> Self {
        match (DisplayState::select(row_count.is_some(), loading), row_count) {
            (DisplayState::Loading, _) => Self::Loading,
            (DisplayState::NoResult, _) => Self::NoResult,
            (DisplayState::Ready, Some(0)) => Self::Empty,
            (DisplayState::Ready, _) => Self::Populated,
        }
    }
}
