use crate::{
    Config, FetchError, ForecastSnapshot, LocationQuery, WeatherSnapshot,
    credentials::CredentialProvider, provider::rapidapi::RapidApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod rapidapi;

/// Remote source of weather data.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `query`.
    async fn current(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError>;

    /// Multi-day forecast for `query`; the number of days is provider config.
    async fn forecast(&self, query: &LocationQuery) -> Result<ForecastSnapshot, FetchError>;
}

/// Construct the provider described by `config`, authenticating with `credentials`.
pub fn provider_from_config(
    config: &Config,
    credentials: Arc<dyn CredentialProvider>,
) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = RapidApiProvider::builder()
        .base_url(&config.base_url)
        .api_host(&config.api_host)
        .forecast_days(config.forecast_days)
        .credentials(credentials)
        .build()?;

    Ok(Arc::new(provider))
}
