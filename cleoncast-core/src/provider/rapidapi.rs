use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
    config::{DEFAULT_API_HOST, DEFAULT_BASE_URL, DEFAULT_FORECAST_DAYS},
    credentials::{CredentialProvider, StaticCredentials},
    error::FetchError,
    model::{ForecastDay, ForecastSnapshot, LocationQuery, Place, WeatherSnapshot},
};

use super::WeatherProvider;

const KEY_HEADER: &str = "X-RapidAPI-Key";
const HOST_HEADER: &str = "X-RapidAPI-Host";

/// weatherapi.com reached through the RapidAPI gateway.
#[derive(Debug, Clone)]
pub struct RapidApiProvider {
    http: Client,
    base_url: String,
    api_host: String,
    forecast_days: u8,
    credentials: Arc<dyn CredentialProvider>,
}

impl RapidApiProvider {
    pub fn builder() -> RapidApiProviderBuilder {
        RapidApiProviderBuilder::default()
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(HOST_HEADER, self.api_host.as_str());
        match self.credentials.api_key() {
            Some(key) => req.header(KEY_HEADER, key),
            None => {
                warn!("no RapidAPI key configured, sending unauthenticated request");
                req
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        what: &str,
    ) -> Result<T, FetchError> {
        let res = self.authorize(req).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, what, "weather service rejected request");
            return Err(FetchError::status(status.as_u16(), &body));
        }

        let parsed = serde_json::from_str(&body)?;
        debug!(what, bytes = body.len(), "weather service response decoded");
        Ok(parsed)
    }
}

#[async_trait]
impl WeatherProvider for RapidApiProvider {
    #[instrument(skip_all, fields(query = %query))]
    async fn current(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError> {
        let req = self.http.get(self.endpoint("current.json")).query(&[("q", query.as_str())]);

        let parsed: WaCurrentResponse = self.get_json(req, "current").await?;

        Ok(WeatherSnapshot {
            location: parsed.location.into(),
            temperature_c: parsed.current.temp_c,
            condition: parsed.current.condition.text,
        })
    }

    #[instrument(skip_all, fields(query = %query))]
    async fn forecast(&self, query: &LocationQuery) -> Result<ForecastSnapshot, FetchError> {
        debug!(days = self.forecast_days, "requesting forecast");
        let days = self.forecast_days.to_string();
        let req = self
            .http
            .get(self.endpoint("forecast.json"))
            .query(&[("q", query.as_str()), ("days", days.as_str())]);

        let parsed: WaForecastResponse = self.get_json(req, "forecast").await?;

        let days = parsed
            .forecast
            .forecastday
            .into_iter()
            .map(|d| ForecastDay {
                date: d.date,
                max_temp_c: d.day.maxtemp_c,
                min_temp_c: d.day.mintemp_c,
                condition: d.day.condition.text,
            })
            .collect();

        Ok(ForecastSnapshot { location: parsed.location.into(), days })
    }
}

/// Builder for [`RapidApiProvider`]; every setting has a working default.
#[derive(Debug, Default)]
pub struct RapidApiProviderBuilder {
    base_url: Option<String>,
    api_host: Option<String>,
    forecast_days: Option<u8>,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl RapidApiProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    pub fn forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = Some(days);
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> anyhow::Result<RapidApiProvider> {
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)
            .with_context(|| format!("Invalid weather service base URL: {base_url}"))?;

        Ok(RapidApiProvider {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_host: self.api_host.unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            forecast_days: self.forecast_days.unwrap_or(DEFAULT_FORECAST_DAYS).max(1),
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(StaticCredentials::none())),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

impl From<WaLocation> for Place {
    fn from(loc: WaLocation) -> Self {
        Place { name: loc.name, country: loc.country }
    }
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    forecast: WaForecast,
}
