//! Screen state - single source of truth for what a screen shows.
//!
//! Only [`crate::store::reduce`] mutates it.

use crate::{FetchError, LocationQuery};

/// Sequence number attached to each submission.
///
/// Tickets are issued in increasing order per screen, so a larger ticket always
/// belongs to a later submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the screen is showing. Exactly one case is active.
///
/// `Loading` and `Failed` keep the last displayed snapshot so it stays visible
/// until a newer one replaces it.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading { previous: Option<T> },
    Failed { error: FetchError, previous: Option<T> },
    Loaded(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Snapshot to display, fresh or stale.
    pub fn snapshot(&self) -> Option<&T> {
        match self {
            ViewState::Idle => None,
            ViewState::Loading { previous } | ViewState::Failed { previous, .. } => {
                previous.as_ref()
            }
            ViewState::Loaded(snapshot) => Some(snapshot),
        }
    }

    /// Consume the state, keeping only the displayable snapshot.
    pub fn into_snapshot(self) -> Option<T> {
        match self {
            ViewState::Idle => None,
            ViewState::Loading { previous } | ViewState::Failed { previous, .. } => previous,
            ViewState::Loaded(snapshot) => Some(snapshot),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading { .. } => "loading",
            ViewState::Failed { .. } => "failed",
            ViewState::Loaded(_) => "loaded",
        }
    }
}

/// Everything one screen needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState<T> {
    /// Contents of the location field.
    pub query: LocationQuery,

    pub view: ViewState<T>,

    /// Ticket of the most recent submission, while its response is outstanding.
    pub(crate) pending: Option<Ticket>,

    next_ticket: u64,
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            query: LocationQuery::default(),
            view: ViewState::Idle,
            pending: None,
            next_ticket: 0,
        }
    }
}

impl<T> ScreenState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket whose response will be applied next, if any.
    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    /// Most recently issued ticket.
    pub(crate) fn latest_ticket(&self) -> Ticket {
        Ticket(self.next_ticket)
    }

    pub(crate) fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }
}
