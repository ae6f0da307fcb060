//! Drives one screen: dispatches actions through the reducer and carries out
//! the effects it returns.
//!
//! Each fetch runs as its own task. Nothing is cancelled; a superseded request
//! finishes and its result is dropped by the reducer.

use std::{collections::HashMap, sync::Arc};

use tokio::task::{Id, JoinSet};
use tracing::{debug, info, warn};

use crate::{
    FetchError, LocationQuery,
    address::ShareableAddress,
    provider::WeatherProvider,
    screen::Snapshot,
    state::{ScreenState, Ticket},
    store::{Action, DispatchResult, Effect, reduce},
};

/// What happened to a settled request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The result replaced the screen's view.
    Applied(Ticket),
    /// A newer submission exists; the result was dropped.
    Discarded(Ticket),
}

#[derive(Debug)]
pub struct ScreenRuntime<T: Snapshot> {
    state: ScreenState<T>,
    provider: Arc<dyn WeatherProvider>,
    address: Option<ShareableAddress>,
    tasks: JoinSet<Result<T, FetchError>>,
    /// Ticket and query of every task still in `tasks`.
    requests: HashMap<Id, (Ticket, LocationQuery)>,
    mounted: bool,
}

impl<T: Snapshot> ScreenRuntime<T> {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            state: ScreenState::new(),
            provider,
            address: None,
            tasks: JoinSet::new(),
            requests: HashMap::new(),
            mounted: false,
        }
    }

    /// Attach the screen's address. Ignored by screens that don't sync location.
    pub fn with_address(mut self, address: ShareableAddress) -> Self {
        self.address = Some(address);
        self
    }

    pub fn state(&self) -> &ScreenState<T> {
        &self.state
    }

    pub fn address(&self) -> Option<&ShareableAddress> {
        self.address.as_ref()
    }

    /// Requests still running, including superseded ones.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// First-render hook. Runs once; later calls do nothing.
    ///
    /// Returns the ticket of the automatic lookup if the address carried a
    /// location.
    pub fn mount(&mut self) -> Option<Ticket> {
        if std::mem::replace(&mut self.mounted, true) {
            return None;
        }
        if !T::SCREEN.syncs_location() {
            return None;
        }

        let location = self.address.as_ref()?.location()?;
        info!(%location, "restoring location from address");
        Some(self.submit(location))
    }

    /// Submit the location form. Must be called inside a Tokio runtime.
    pub fn submit(&mut self, query: impl Into<LocationQuery>) -> Ticket {
        self.dispatch(Action::Submit(query.into()));
        self.state.latest_ticket()
    }

    /// Wait for the next request to finish and apply it.
    ///
    /// Returns `None` once nothing is in flight.
    pub async fn settle_next(&mut self) -> Option<Settlement> {
        let (ticket, query, result) = loop {
            // A panicked or aborted task still settles its ticket.
            let (id, result) = match self.tasks.join_next_with_id().await? {
                Ok((id, result)) => (id, result),
                Err(err) => {
                    warn!(error = %err, "fetch task failed");
                    (err.id(), Err(FetchError::Internal(err.to_string())))
                }
            };
            match self.requests.remove(&id) {
                Some((ticket, query)) => break (ticket, query, result),
                None => warn!(task = %id, "settled task has no ticket"),
            }
        };

        let result = self.dispatch(Action::Settled { ticket, query, result });
        Some(if result.changed {
            Settlement::Applied(ticket)
        } else {
            Settlement::Discarded(ticket)
        })
    }

    /// Apply every outstanding request, in completion order.
    pub async fn settle_all(&mut self) -> Vec<Settlement> {
        let mut settled = Vec::new();
        while let Some(s) = self.settle_next().await {
            settled.push(s);
        }
        settled
    }

    fn dispatch(&mut self, action: Action<T>) -> DispatchResult {
        let result = reduce(&mut self.state, T::SCREEN, action);
        for effect in result.effects.iter().cloned() {
            self.run_effect(effect);
        }
        debug!(view = self.state.view.name(), changed = result.changed, "dispatched");
        result
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch { ticket, query } => {
                let provider = Arc::clone(&self.provider);
                let lookup = query.clone();
                let handle =
                    self.tasks.spawn(async move { T::fetch(provider.as_ref(), &lookup).await });
                self.requests.insert(handle.id(), (ticket, query));
            }
            Effect::SyncLocation(query) => {
                if let Some(address) = self.address.as_mut() {
                    address.set_location(query.as_str());
                    debug!(%address, "address updated");
                }
            }
        }
    }
}
