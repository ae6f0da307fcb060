use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    FetchError, ForecastSnapshot, LocationQuery, WeatherSnapshot, provider::WeatherProvider,
};

/// The two lookup screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Current,
    Forecast,
}

impl Screen {
    /// Only the current-conditions screen mirrors its location into the address.
    pub fn syncs_location(&self) -> bool {
        matches!(self, Screen::Current)
    }
}

/// Result type of one screen, and how to fetch it.
#[async_trait]
pub trait Snapshot: Clone + Debug + Send + Sync + 'static {
    const SCREEN: Screen;

    async fn fetch(
        provider: &dyn WeatherProvider,
        query: &LocationQuery,
    ) -> Result<Self, FetchError>;
}

#[async_trait]
impl Snapshot for WeatherSnapshot {
    const SCREEN: Screen = Screen::Current;

    async fn fetch(
        provider: &dyn WeatherProvider,
        query: &LocationQuery,
    ) -> Result<Self, FetchError> {
        provider.current(query).await
    }
}

#[async_trait]
impl Snapshot for ForecastSnapshot {
    const SCREEN: Screen = Screen::Forecast;

    async fn fetch(
        provider: &dyn WeatherProvider,
        query: &LocationQuery,
    ) -> Result<Self, FetchError> {
        provider.forecast(query).await
    }
}
