//! Which of the mutually exclusive display regions is visible.

use crate::model::{ErrorView, RenderModel, WeatherSummary};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DisplayState {
    /// Search prompt, nothing looked up yet (or the last lookup was superseded).
    ///
    /// With overlapping lookups the first `BusyCleared` lands here even if a
    /// newer lookup is still in flight, so the busy indicator can disappear
    /// before that lookup renders. Lookups are not serialized.
    #[default]
    Idle,
    /// Search prompt with the busy indicator; a lookup is in flight.
    Busy,
    ShowingResult(WeatherSummary),
    ShowingError(ErrorView),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    BusyRequested,
    Rendered(RenderModel),
    BusyCleared,
}

impl DisplayState {
    pub fn apply(self, event: ViewEvent) -> DisplayState {
        match (self, event) {
            (_, ViewEvent::BusyRequested) => DisplayState::Busy,
            (_, ViewEvent::Rendered(RenderModel::Weather(summary))) => {
                DisplayState::ShowingResult(summary)
            }
            (_, ViewEvent::Rendered(RenderModel::Error(error))) => DisplayState::ShowingError(error),
            (DisplayState::Busy, ViewEvent::BusyCleared) => DisplayState::Idle,
            (state, ViewEvent::BusyCleared) => state,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, DisplayState::Busy)
    }
}
