//! Core library for the `cleoncast` weather client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its RapidAPI implementation
//! - Screen state, the reducer that drives it, and a runtime that performs fetches
//! - Rendering of snapshots into display text
//!
//! It is used by `cleoncast-cli`, but can also back other front ends.

pub mod address;
pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod runtime;
pub mod screen;
pub mod state;
pub mod store;

pub use address::ShareableAddress;
pub use config::Config;
pub use credentials::{ChainedCredentials, CredentialProvider, EnvCredentials, StaticCredentials};
pub use error::{FetchError, FetchErrorKind};
pub use model::{ForecastDay, ForecastSnapshot, LocationQuery, Place, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use render::{Render, ScreenView};
pub use runtime::{ScreenRuntime, Settlement};
pub use screen::{Screen, Snapshot};
pub use state::{ScreenState, Ticket, ViewState};
