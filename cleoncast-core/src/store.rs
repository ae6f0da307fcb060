//! Reducer for a lookup screen.
//!
//! `reduce` is pure: it updates [`ScreenState`] and returns the side effects the
//! runtime must carry out. Network and address updates never happen here.

use tracing::{debug, warn};

use crate::{
    FetchError, LocationQuery,
    screen::Screen,
    state::{ScreenState, Ticket, ViewState},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action<T> {
    /// The form was submitted with this location.
    Submit(LocationQuery),

    /// A request issued for `ticket` has finished.
    Settled { ticket: Ticket, query: LocationQuery, result: Result<T, FetchError> },
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one request for `query`, reporting back under `ticket`.
    Fetch { ticket: Ticket, query: LocationQuery },

    /// Write the submitted location into the shareable address.
    SyncLocation(LocationQuery),
}

/// Outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// Whether the state was modified.
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    pub fn unchanged() -> Self {
        Self { changed: false, effects: vec![] }
    }

    pub fn changed() -> Self {
        Self { changed: true, effects: vec![] }
    }

    pub fn changed_with(effect: Effect) -> Self {
        Self { changed: true, effects: vec![effect] }
    }
}

/// Apply `action` for a screen of kind `screen`.
///
/// Only the response to the latest submission is applied; anything older is
/// dropped, whatever order the responses arrive in.
pub fn reduce<T>(state: &mut ScreenState<T>, screen: Screen, action: Action<T>) -> DispatchResult {
    match action {
        Action::Submit(query) => {
            let ticket = state.issue_ticket();
            let previous = std::mem::take(&mut state.view).into_snapshot();

            state.view = ViewState::Loading { previous };
            state.query = query.clone();
            state.pending = Some(ticket);

            debug!(%ticket, %query, "lookup submitted");
            DispatchResult::changed_with(Effect::Fetch { ticket, query })
        }

        Action::Settled { ticket, query, result } => {
            if state.pending != Some(ticket) {
                debug!(%ticket, %query, latest = ?state.pending, "discarding superseded response");
                return DispatchResult::unchanged();
            }
            state.pending = None;

            match result {
                Ok(snapshot) => {
                    state.view = ViewState::Loaded(snapshot);
                    debug!(%ticket, %query, "lookup loaded");

                    if screen.syncs_location() {
                        DispatchResult::changed_with(Effect::SyncLocation(query))
                    } else {
                        DispatchResult::changed()
                    }
                }
                Err(error) => {
                    warn!(%ticket, %query, kind = %error.kind(), %error, "lookup failed");
                    let previous = std::mem::take(&mut state.view).into_snapshot();
                    state.view = ViewState::Failed { error, previous };
                    DispatchResult::changed()
                }
            }
        }
    }
}
